use super::lexer::Token;
use crate::ast::{Leaf, ParseTree, Tree};
use crate::error::{CompileError, CompileResult, SourceMetadata, SyntaxError};

/// Builds the assignment tree from enumerated tokens: `target = expression`.
pub fn build_parse_tree<'source>(
    tokens: &[Token<'source>],
    source: &SourceMetadata,
) -> CompileResult<ParseTree<'source>> {
    let (target, value) = super::split_assignment(tokens, source)
        .map_err(|e| e.add_context("building the parse tree"))?;
    let tree = ParseTree {
        target: Leaf::Operand(target.lexeme.clone()),
        value: build_expression_tree(value, source)
            .map_err(|e| e.add_context("building the parse tree"))?,
    };
    tracing::debug!(target: "parser", "tree of depth {}: {tree:?}", tree.value.depth());
    Ok(tree)
}

// The first token is always a leaf, the second is the operator and the rest
// is built the same way, so `a + b * c` nests as `a + (b * c)` and
// `a * b + c` as `a * (b + c)`.
fn build_expression_tree<'source>(
    tokens: &[Token<'source>],
    source: &SourceMetadata,
) -> CompileResult<Tree<'source>> {
    match tokens {
        [] => Err(CompileError::at(
            SyntaxError::InvalidSyntax,
            source.end_span(),
            source,
        )),
        [single] => Ok(Tree::Leaf(Leaf::Operand(single.lexeme.clone()))),
        [_, operator] => Err(CompileError::at(
            SyntaxError::MissingOperand {
                operator: operator.lexeme.to_string(),
            },
            operator.span,
            source,
        )),
        [first, operator, rest @ ..] => Ok(Tree::binary(
            operator.lexeme.clone(),
            Tree::Leaf(Leaf::Operand(first.lexeme.clone())),
            build_expression_tree(rest, source)?,
        )
        .at(operator.span)),
    }
}
