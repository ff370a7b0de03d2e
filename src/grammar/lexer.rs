use crate::error::{SourceMetadata, Span};
use lazy_static::lazy_static;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

lazy_static! {
    // recognised but never consumed past the lexer
    static ref RESERVED_WORDS: HashSet<&'static str> = [
        "if", "then", "else", "end", "repeat", "until", "read", "write"
    ]
    .into_iter()
    .collect();
}

const SPECIAL_SYMBOLS: &str = "+-*/=<>();";

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::ReservedWord => "reserved word",
            Self::SpecialSymbol => "special symbol",
            Self::AssignmentOperator => "assignment operator",
            Self::Comment => "comment",
            Self::Number => "number",
            Self::Identifier => "identifier",
        })
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.lexeme)
    }
}

pub struct LexerIter<'a> {
    lexer: Lexer<'a>,
    eof: bool,
}

impl<'a> Iterator for LexerIter<'a> {
    type Item = Token<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.eof {
            None
        } else {
            let next = self.lexer.next_token();
            if next.is_none() {
                self.eof = true;
            }
            next
        }
    }
}

impl<'a> std::iter::FusedIterator for LexerIter<'a> {}

impl<'a> IntoIterator for Lexer<'a> {
    type IntoIter = LexerIter<'a>;
    type Item = <Self::IntoIter as Iterator>::Item;
    fn into_iter(self) -> Self::IntoIter {
        LexerIter {
            lexer: self,
            eof: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'source> {
    pub kind: TokenKind,
    pub lexeme: Cow<'source, str>,
    pub span: Span,
}

impl<'source> Token<'source> {
    pub fn new(kind: TokenKind, lexeme: impl Into<Cow<'source, str>>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }
    pub fn is(&self, lexeme: &str) -> bool {
        self.lexeme == lexeme
    }
}

/// Lexical classes, in the order they are tried at each position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    ReservedWord,
    SpecialSymbol,
    AssignmentOperator,
    Comment,
    Number,
    Identifier,
}

pub struct Lexer<'a> {
    input: std::iter::Peekable<std::str::CharIndices<'a>>,
    previous: Option<char>,
    metadata: &'a SourceMetadata<'a>,
}

impl<'source> Lexer<'source> {
    pub fn new(input: &'source SourceMetadata<'source>) -> Self {
        Self {
            input: input.input().char_indices().peekable(),
            previous: None,
            metadata: input,
        }
    }

    /// Next token, silently skipping characters no lexical class accepts.
    pub fn next_token(&mut self) -> Option<Token<'source>> {
        loop {
            let (pos, ch) = self.input.peek().copied()?;
            if let Some(token) = self.match_token() {
                tracing::trace!(target: "lexer", "{} {:?} at {}", token.kind, token.lexeme, pos);
                return Some(token);
            }
            tracing::trace!(target: "lexer", "skipping {ch:?} at {pos}");
            self.advance();
        }
    }

    fn match_token(&mut self) -> Option<Token<'source>> {
        let start = self.current_offset();
        let kind = if self.reserved_word() {
            TokenKind::ReservedWord
        } else if self.skip_if(|c| SPECIAL_SYMBOLS.contains(c)).is_some() {
            TokenKind::SpecialSymbol
        } else if self.eat_str(":=") {
            TokenKind::AssignmentOperator
        } else if self.comment() {
            TokenKind::Comment
        } else if self.number() {
            TokenKind::Number
        } else if self.identifier() {
            TokenKind::Identifier
        } else {
            return None;
        };
        Some(self.token_until_current(kind, start))
    }

    fn reserved_word(&mut self) -> bool {
        if !self.at_word_start() {
            return false;
        }
        let word = self.rest().split(|c| !is_word_char(c)).next().unwrap_or("");
        RESERVED_WORDS.contains(word) && self.eat_str(word)
    }

    fn comment(&mut self) -> bool {
        let rest = self.rest();
        let letters = rest
            .strip_prefix("%%")
            .map(|after| after.chars().take_while(char::is_ascii_alphabetic).count())
            .unwrap_or(0);
        if letters == 0 {
            return false;
        }
        // ascii letters are one byte each
        let len = 2 + letters;
        self.eat_str(&rest[..len])
    }

    // digits with an optional fraction, bounded by non-word characters
    fn number(&mut self) -> bool {
        if !self.at_word_start() {
            return false;
        }
        let rest = self.rest();
        let integer = count_ascii_digits(rest);
        if integer == 0 || !is_boundary_at(rest, integer) {
            return false;
        }
        let mut len = integer;
        if let Some(fraction) = rest[integer..].strip_prefix('.') {
            let digits = count_ascii_digits(fraction);
            if digits > 0 && is_boundary_at(fraction, digits) {
                len += 1 + digits;
            }
        }
        self.eat_str(&rest[..len])
    }

    fn identifier(&mut self) -> bool {
        if !self.at_word_start() {
            return false;
        }
        let rest = self.rest();
        if !rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return false;
        }
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        is_boundary_at(rest, len) && self.eat_str(&rest[..len])
    }

    fn at_word_start(&self) -> bool {
        !self.previous.map_or(false, is_word_char)
    }

    fn rest(&mut self) -> &'source str {
        let offset = self.current_offset();
        &self.metadata.input()[offset..]
    }

    fn eat_str(&mut self, str: &str) -> bool {
        if self.rest().starts_with(str) && !str.is_empty() {
            for _ in str.chars() {
                self.advance();
            }
            true
        } else {
            false
        }
    }

    fn skip_if<F>(&mut self, filter: F) -> Option<(usize, char)>
    where
        F: Fn(char) -> bool,
    {
        let (pos, ch) = *self.input.peek()?;
        if filter(ch) {
            self.advance();
            Some((pos, ch))
        } else {
            None
        }
    }

    fn advance(&mut self) {
        if let Some((_, ch)) = self.input.next() {
            self.previous = Some(ch);
        }
    }

    fn token_until_current(&mut self, kind: TokenKind, start: usize) -> Token<'source> {
        let end = self.current_offset();
        Token::new(
            kind,
            &self.metadata.input()[start..end],
            Span {
                offset: start,
                len: end - start,
            },
        )
    }

    fn current_offset(&mut self) -> usize {
        self.input
            .peek()
            .map(|(x, _)| *x)
            .unwrap_or_else(|| self.metadata.input().len())
    }
}

/// Tokenizes a whole line.
pub fn tokenize<'source>(source: &'source SourceMetadata<'source>) -> Vec<Token<'source>> {
    let tokens: Vec<_> = Lexer::new(source).into_iter().collect();
    tracing::debug!(target: "lexer", "{} tokens from {:?}", tokens.len(), source.input());
    tokens
}

#[inline]
fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn count_ascii_digits(s: &str) -> usize {
    s.chars().take_while(char::is_ascii_digit).count()
}

// true when a word boundary follows the first `len` bytes of `s`
fn is_boundary_at(s: &str, len: usize) -> bool {
    !s[len..].chars().next().map_or(false, is_word_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<(TokenKind, String)> {
        let meta = SourceMetadata::new(input);
        tokenize(&meta)
            .into_iter()
            .map(|t| (t.kind, t.lexeme.into_owned()))
            .collect()
    }

    fn lexemes(input: &str) -> Vec<String> {
        lex(input).into_iter().map(|(_, l)| l).collect()
    }

    #[test]
    fn simple_assignment() {
        use TokenKind::*;
        assert_eq!(
            lex("x = 2 * y"),
            vec![
                (Identifier, "x".to_string()),
                (SpecialSymbol, "=".to_string()),
                (Number, "2".to_string()),
                (SpecialSymbol, "*".to_string()),
                (Identifier, "y".to_string()),
            ]
        );
    }

    #[test]
    fn reserved_words_are_not_identifiers() {
        let tokens = lex("if x then y end");
        assert_eq!(tokens[0], (TokenKind::ReservedWord, "if".to_string()));
        assert_eq!(tokens[1].0, TokenKind::Identifier);
        assert_eq!(tokens[2].0, TokenKind::ReservedWord);
        assert_eq!(tokens[4], (TokenKind::ReservedWord, "end".to_string()));
    }

    #[test]
    fn reserved_word_prefix_is_an_identifier() {
        assert_eq!(lex("iffy"), vec![(TokenKind::Identifier, "iffy".to_string())]);
        assert_eq!(lex("ending2"), vec![(TokenKind::Identifier, "ending2".to_string())]);
    }

    #[test]
    fn decimal_numbers() {
        assert_eq!(lex("3.14"), vec![(TokenKind::Number, "3.14".to_string())]);
        assert_eq!(lexemes("1.5.3"), vec!["1.5", "3"]);
    }

    #[test]
    fn fraction_needs_a_boundary() {
        // `12.5a` is not a number with a fraction, only `12` is
        assert_eq!(lexemes("12.5a"), vec!["12"]);
    }

    #[test]
    fn assignment_operator_and_comment() {
        use TokenKind::*;
        assert_eq!(
            lex("a := b %%note"),
            vec![
                (Identifier, "a".to_string()),
                (AssignmentOperator, ":=".to_string()),
                (Identifier, "b".to_string()),
                (Comment, "%%note".to_string()),
            ]
        );
    }

    #[test]
    fn percent_without_letters_is_skipped() {
        assert_eq!(lexemes("%% 1"), vec!["1"]);
    }

    #[test]
    fn unknown_characters_are_dropped() {
        assert_eq!(lexemes("a $ b # 1 ! 2"), vec!["a", "b", "1", "2"]);
    }

    #[test]
    fn words_glued_to_unicode_letters_are_dropped() {
        // `é` is a word character, so neither side has a boundary
        assert_eq!(lexemes("abé + 1"), vec!["+", "1"]);
    }

    #[test]
    fn underscore_blocks_the_following_identifier() {
        assert_eq!(lexemes("_x = y_1"), vec!["=", "y_1"]);
    }

    #[test]
    fn digits_glued_to_letters_are_not_numbers() {
        assert_eq!(lexemes("3y"), Vec::<String>::new());
    }

    #[test]
    fn spans_cover_the_lexeme() {
        let meta = SourceMetadata::new("ab = 12");
        let tokens = tokenize(&meta);
        assert_eq!(tokens[0].span, Span { offset: 0, len: 2 });
        assert_eq!(tokens[2].span, Span { offset: 5, len: 2 });
    }

    #[test]
    fn all_special_symbols() {
        assert_eq!(
            lexemes("+-*/=<>();"),
            vec!["+", "-", "*", "/", "=", "<", ">", "(", ")", ";"]
        );
    }

    #[test]
    fn unknown_characters_are_skipped() {
        assert_eq!(lexemes("x § = ¤ 2"), vec!["x", "=", "2"]);
    }

    #[test]
    fn kinds_read_as_words() {
        assert_eq!(TokenKind::AssignmentOperator.to_string(), "assignment operator");
        assert_eq!(TokenKind::Number.to_string(), "number");
    }
}
