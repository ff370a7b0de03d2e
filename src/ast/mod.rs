//! Parse tree of a single assignment. The shape is whatever the tree builder
//! produced from the token order; no precedence is encoded here.
use std::borrow::Cow;
use std::fmt;

use crate::error::Span;

mod render;

/// `target = value`. Rendered with `=` as the root node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTree<'source> {
    pub target: Leaf<'source>,
    pub value: Tree<'source>,
}

#[derive(Debug, Clone)]
pub enum Tree<'source> {
    Leaf(Leaf<'source>),
    Binary {
        operator: Cow<'source, str>,
        /// Where the operator was written, if the tree came from source.
        span: Option<Span>,
        lhs: Box<Tree<'source>>,
        rhs: Box<Tree<'source>>,
    },
}

// spans are for diagnostics, two trees are equal when their shapes are
impl PartialEq for Tree<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Leaf(a), Self::Leaf(b)) => a == b,
            (
                Self::Binary {
                    operator: op_a,
                    lhs: lhs_a,
                    rhs: rhs_a,
                    ..
                },
                Self::Binary {
                    operator: op_b,
                    lhs: lhs_b,
                    rhs: rhs_b,
                    ..
                },
            ) => op_a == op_b && lhs_a == lhs_b && rhs_a == rhs_b,
            _ => false,
        }
    }
}

impl Eq for Tree<'_> {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leaf<'source> {
    /// Identifier, literal or any other token text.
    Operand(Cow<'source, str>),
    /// An integer literal that has to be converted to floating point.
    IntToFloat(String),
}

impl<'source> Leaf<'source> {
    pub fn operand(text: impl Into<Cow<'source, str>>) -> Self {
        Self::Operand(text.into())
    }

    pub fn into_owned(self) -> Leaf<'static> {
        match self {
            Self::Operand(text) => Leaf::Operand(Cow::Owned(text.into_owned())),
            Self::IntToFloat(value) => Leaf::IntToFloat(value),
        }
    }
}

impl<'source> Tree<'source> {
    pub fn leaf(text: impl Into<Cow<'source, str>>) -> Self {
        Self::Leaf(Leaf::operand(text))
    }

    pub fn binary(
        operator: impl Into<Cow<'source, str>>,
        lhs: Tree<'source>,
        rhs: Tree<'source>,
    ) -> Self {
        Self::Binary {
            operator: operator.into(),
            span: None,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Same as [`Tree::binary`], remembering where the operator was written.
    #[must_use]
    pub fn at(self, operator_span: Span) -> Self {
        match self {
            Self::Binary {
                operator, lhs, rhs, ..
            } => Self::Binary {
                operator,
                span: Some(operator_span),
                lhs,
                rhs,
            },
            leaf @ Self::Leaf(_) => leaf,
        }
    }

    pub fn into_owned(self) -> Tree<'static> {
        match self {
            Self::Leaf(leaf) => Tree::Leaf(leaf.into_owned()),
            Self::Binary {
                operator,
                span,
                lhs,
                rhs,
            } => Tree::Binary {
                operator: Cow::Owned(operator.into_owned()),
                span,
                lhs: Box::new(lhs.into_owned()),
                rhs: Box::new(rhs.into_owned()),
            },
        }
    }

    /// Number of binary nodes.
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Binary { lhs, rhs, .. } => 1 + lhs.depth().max(rhs.depth()),
        }
    }

    /// Visits every leaf, left to right.
    pub fn for_each_leaf_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut Leaf<'source>),
    {
        match self {
            Self::Leaf(leaf) => f(leaf),
            Self::Binary { lhs, rhs, .. } => {
                lhs.for_each_leaf_mut(f);
                rhs.for_each_leaf_mut(f);
            }
        }
    }
}

impl<'source> ParseTree<'source> {
    pub fn into_owned(self) -> ParseTree<'static> {
        ParseTree {
            target: self.target.into_owned(),
            value: self.value.into_owned(),
        }
    }

    pub fn for_each_leaf_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Leaf<'source>),
    {
        f(&mut self.target);
        self.value.for_each_leaf_mut(&mut f);
    }
}

impl fmt::Display for Leaf<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Operand(text) => f.write_str(text),
            Self::IntToFloat(value) => write!(f, "inttofloat({value})"),
        }
    }
}

impl fmt::Display for Tree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", render::render(self))
    }
}

impl fmt::Display for ParseTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", render::render_assignment(self))
    }
}
