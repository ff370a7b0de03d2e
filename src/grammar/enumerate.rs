use super::lexer::{Token, TokenKind};
use std::collections::HashMap;
use std::fmt;

/// Prefix of every synthetic identifier name.
pub const SYNTHETIC_PREFIX: &str = "id";

/// Maps the identifiers of one compile to `id1`, `id2`, ... in order of first
/// appearance. Lives as long as the compile that built it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    order: Vec<String>,
    names: HashMap<String, String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synthetic name of `lexeme`, allocating the next one on first sight.
    pub fn intern(&mut self, lexeme: &str) -> &str {
        if !self.names.contains_key(lexeme) {
            let name = format!("{}{}", SYNTHETIC_PREFIX, self.order.len() + 1);
            tracing::trace!(target: "enumerate", "{lexeme:?} -> {name}");
            self.order.push(lexeme.to_string());
            self.names.insert(lexeme.to_string(), name);
        }
        &self.names[lexeme]
    }

    pub fn get(&self, lexeme: &str) -> Option<&str> {
        self.names.get(lexeme).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// `(lexeme, synthetic name)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.order
            .iter()
            .map(move |lexeme| (lexeme.as_str(), self.names[lexeme].as_str()))
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, (lexeme, name)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{name} = {lexeme}")?;
        }
        Ok(())
    }
}

/// Replaces every identifier with its synthetic name. The table is built
/// fresh for this call and handed back with the rewritten tokens.
pub fn enumerate_tokens(tokens: Vec<Token<'_>>) -> (Vec<Token<'_>>, SymbolTable) {
    let mut symbols = SymbolTable::new();
    let enumerated: Vec<_> = tokens
        .into_iter()
        .map(|token| match token.kind {
            TokenKind::Identifier => {
                let name = symbols.intern(&token.lexeme).to_string();
                Token::new(TokenKind::Identifier, name, token.span)
            }
            _ => token,
        })
        .collect();
    tracing::debug!(target: "enumerate", "{} distinct identifiers", symbols.len());
    (enumerated, symbols)
}
