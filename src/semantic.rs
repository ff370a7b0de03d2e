//! Type annotation of the parse tree. The annotated copy is only displayed,
//! code generation keeps reading the original tree.
use crate::ast::{Leaf, ParseTree};
use crate::mode::NumericType;

/// Returns a copy of `tree` where, in float mode, every integer literal leaf
/// is wrapped in an `inttofloat` conversion. `tree` itself is left untouched.
pub fn annotate<'source>(tree: &ParseTree<'source>, numeric: NumericType) -> ParseTree<'source> {
    let mut annotated = tree.clone();
    if numeric.is_float() {
        let mut promoted = 0;
        annotated.for_each_leaf_mut(|leaf| {
            if let Leaf::Operand(text) = leaf {
                if let Some(value) = integer_literal(text) {
                    tracing::trace!(target: "semantic", "promoting {text} to float");
                    *leaf = Leaf::IntToFloat(value);
                    promoted += 1;
                }
            }
        });
        tracing::debug!(target: "semantic", "{promoted} integer leaves promoted");
    }
    annotated
}

/// Canonical decimal text of `text` if it is an integer literal (`007` -> `7`).
pub fn integer_literal(text: &str) -> Option<String> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let trimmed = text.trim_start_matches('0');
    Some(if trimmed.is_empty() { "0" } else { trimmed }.to_string())
}
