//! Front end: everything from the raw line to the parse tree.
mod enumerate;
pub mod lexer;
pub mod normalize;
mod tree;

pub use enumerate::{enumerate_tokens, SymbolTable, SYNTHETIC_PREFIX};
pub use lexer::{tokenize, Lexer, Token, TokenKind};
pub use normalize::normalize;
pub use tree::build_parse_tree;

use crate::error::{CompileError, CompileResult, SourceMetadata, SyntaxError};

/// Splits enumerated tokens into the assignment target and the expression
/// after `=`. Used by the passes that work on the flat token stream.
pub fn split_assignment<'t, 'source>(
    tokens: &'t [Token<'source>],
    source: &SourceMetadata,
) -> CompileResult<(&'t Token<'source>, &'t [Token<'source>])> {
    match tokens {
        [target, assign, expression @ ..] if assign.is("=") && !expression.is_empty() => {
            Ok((target, expression))
        }
        _ => {
            let span = tokens.get(1).map_or_else(|| source.end_span(), |t| t.span);
            Err(CompileError::at(SyntaxError::InvalidSyntax, span, source))
        }
    }
}
