// Box drawing for parse trees. Every subtree is laid out as a block of equally
// wide lines; a parent puts its label between the two child blocks and draws
// `_` runs and `/` `\` connectors down to the children's labels.
use super::{Leaf, ParseTree, Tree};
use itertools::Itertools;
use std::fmt;

pub struct Rendered {
    lines: Vec<String>,
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut lines: Vec<_> = self.lines.iter().map(|l| l.trim_end()).collect();
        while lines.last().map_or(false, |l| l.is_empty()) {
            lines.pop();
        }
        write!(f, "{}", lines.iter().join("\n"))
    }
}

struct TreeBox {
    lines: Vec<String>,
    width: usize,
    // columns occupied by the label of the box's root
    root_start: usize,
    root_end: usize,
}

pub fn render(tree: &Tree) -> Rendered {
    Rendered {
        lines: build_tree(tree).lines,
    }
}

pub fn render_assignment(tree: &ParseTree) -> Rendered {
    let target = build_leaf(&tree.target);
    let value = build_tree(&tree.value);
    Rendered {
        lines: build_box("=", Some((target, value))).lines,
    }
}

fn build_tree(tree: &Tree) -> TreeBox {
    match tree {
        Tree::Leaf(leaf) => build_leaf(leaf),
        Tree::Binary {
            operator, lhs, rhs, ..
        } => build_box(operator, Some((build_tree(lhs), build_tree(rhs)))),
    }
}

fn build_leaf(leaf: &Leaf) -> TreeBox {
    build_box(&leaf.to_string(), None)
}

fn build_box(label: &str, children: Option<(TreeBox, TreeBox)>) -> TreeBox {
    let label_width = label.chars().count();
    let mut gap = label_width;
    let mut first = String::new();
    let mut second = String::new();

    let (left, right) = match children {
        Some((left, right)) => (Some(left), Some(right)),
        None => (None, None),
    };

    let root_start = if let Some(left) = &left {
        let l_root = (left.root_start + left.root_end) / 2 + 1;
        first.push_str(&" ".repeat(l_root + 1));
        first.push_str(&"_".repeat(left.width.saturating_sub(l_root)));
        second.push_str(&" ".repeat(l_root));
        second.push('/');
        second.push_str(&" ".repeat(left.width.saturating_sub(l_root)));
        gap += 1;
        left.width + 1
    } else {
        0
    };

    first.push_str(label);
    second.push_str(&" ".repeat(label_width));

    if let Some(right) = &right {
        let r_root = (right.root_start + right.root_end) / 2;
        first.push_str(&"_".repeat(r_root));
        first.push_str(&" ".repeat(right.width.saturating_sub(r_root) + 1));
        second.push_str(&" ".repeat(r_root));
        second.push('\\');
        second.push_str(&" ".repeat(right.width.saturating_sub(r_root)));
        gap += 1;
    }

    let root_end = (root_start + label_width).saturating_sub(1);
    let gap = " ".repeat(gap);
    let mut lines = vec![first, second];

    let left_lines = left.as_ref().map_or(&[][..], |b| &b.lines[..]);
    let right_lines = right.as_ref().map_or(&[][..], |b| &b.lines[..]);
    let left_width = left.as_ref().map_or(0, |b| b.width);
    let right_width = right.as_ref().map_or(0, |b| b.width);
    for i in 0..left_lines.len().max(right_lines.len()) {
        let l = left_lines
            .get(i)
            .cloned()
            .unwrap_or_else(|| " ".repeat(left_width));
        let r = right_lines
            .get(i)
            .cloned()
            .unwrap_or_else(|| " ".repeat(right_width));
        lines.push(format!("{l}{gap}{r}"));
    }

    let width = lines[0].chars().count();
    TreeBox {
        lines,
        width,
        root_start,
        root_end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_is_its_label() {
        assert_eq!(render(&Tree::leaf("id1")).to_string(), "id1");
    }

    #[test]
    fn single_operation() {
        let tree = Tree::binary("*", Tree::leaf("2"), Tree::leaf("id2"));
        assert_eq!(render(&tree).to_string(), "  *_\n /  \\\n2   id2");
    }

    #[test]
    fn assignment_root() {
        let tree = ParseTree {
            target: Leaf::operand("id1"),
            value: Tree::binary("*", Tree::leaf("2"), Tree::leaf("id2")),
        };
        let expected = [
            "   _=__",
            "  /    \\",
            "id1     *_",
            "       /  \\",
            "      2   id2",
        ]
        .join("\n");
        assert_eq!(render_assignment(&tree).to_string(), expected);
    }

    #[test]
    fn promoted_leaves_are_rendered_in_full() {
        let tree = ParseTree {
            target: Leaf::operand("id1"),
            value: Tree::Leaf(Leaf::IntToFloat("5".into())),
        };
        let rendered = render_assignment(&tree).to_string();
        assert!(rendered.contains("inttofloat(5)"));
        assert!(rendered.starts_with("   _=___"));
    }
}
