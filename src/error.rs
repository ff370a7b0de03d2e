use std::error;
use std::fmt;

use thiserror::Error as ThisError;

#[derive(Debug, Clone)]
pub struct Error<T> {
    pub kind: T,
    file: Option<std::path::PathBuf>,
    snippet: Option<Snippet>,
    contexts: Vec<&'static str>,
}

pub type CompileError = Error<ErrorKind>;
pub type CompileResult<T> = Result<T, CompileError>;

/// Every way a compile can fail. The three variants are the error classes
/// the front end reports; the inner enums say what exactly went wrong.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("lexical error: {0}")]
    Lexical(#[from] LexicalError),
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("structural error: {0}")]
    Structural(#[from] StructuralError),
}

#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum LexicalError {
    #[error("a number is directly followed by a letter, use '*' explicitly in source code")]
    ImplicitMultiplication,
}

#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("expression ends with a dangling '+'")]
    TrailingOperator,
    #[error("consecutive '++' operators")]
    ConsecutiveOperators,
    #[error("self-assignment detected: {name:?} is assigned to itself")]
    SelfAssignment { name: String },
    #[error("invalid syntax, expected `identifier = expression`")]
    InvalidSyntax,
    #[error("missing operand after {operator:?}")]
    MissingOperand { operator: String },
}

#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("invalid expression structure, no operator found")]
    NoOperator,
    #[error(
        "unsupported expression structure: expected 3 or 5 tokens after '=', found {tokens}"
    )]
    UnsupportedExpressionStructure { tokens: usize },
    #[error("unsupported operator {operator:?}")]
    UnsupportedOperator { operator: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub offset: usize,
    pub len: usize,
}

impl Span {
    pub const fn new(offset: usize) -> Self {
        Self { offset, len: 1 }
    }
    /// The line holding `offset`, with the span's column and its width in
    /// characters. `None` if the offset does not fall on a character.
    pub fn snippet_from_source(&self, source: &SourceMetadata) -> Option<Snippet> {
        let input = source.input();
        let offset = self.offset.min(input.len());
        if !input.is_char_boundary(offset) {
            return None;
        }
        let line_start = input[..offset].rfind('\n').map_or(0, |i| i + 1);
        let line_end = input[offset..].find('\n').map_or(input.len(), |i| offset + i);
        let end = (offset + self.len).min(line_end);
        Some(Snippet {
            position: Position {
                line: input[..line_start].matches('\n').count(),
                col: input[line_start..offset].chars().count(),
            },
            width: input.get(offset..end).map_or(1, |s| s.chars().count().max(1)),
            line: input[line_start..line_end].to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct SourceMetadata<'a> {
    file: Option<std::path::PathBuf>,
    source: &'a str,
}

impl<'a> SourceMetadata<'a> {
    pub const fn input(&self) -> &'a str {
        self.source
    }
    pub const fn new(source: &'a str) -> Self {
        Self { file: None, source }
    }
    #[must_use]
    pub fn with_file(mut self, file: std::path::PathBuf) -> Self {
        self.file = Some(file);
        self
    }
    /// Metadata for a rewritten version of this source, keeping the file name.
    pub fn derive<'b>(&self, source: &'b str) -> SourceMetadata<'b> {
        SourceMetadata {
            file: self.file.clone(),
            source,
        }
    }
    /// Points just past the last character, for errors about missing input.
    pub fn end_span(&self) -> Span {
        Span::new(self.source.len())
    }
}

impl<T> Error<T> {
    pub const fn new(kind: T) -> Self {
        Self {
            kind,
            snippet: None,
            file: None,
            contexts: Vec::new(),
        }
    }
    #[must_use]
    pub fn with_source(mut self, span: Span, source: &SourceMetadata) -> Self {
        self.file = source.file.clone();
        self.snippet = span.snippet_from_source(source);
        self
    }
    #[must_use]
    pub fn add_context(mut self, ctx: &'static str) -> Self {
        self.contexts.push(ctx);
        self
    }
    pub fn position(&self) -> Option<Position> {
        self.snippet.as_ref().map(|snip| snip.position)
    }
}

impl CompileError {
    /// Builds an error of any class located at `span`.
    pub fn at(kind: impl Into<ErrorKind>, span: Span, source: &SourceMetadata) -> Self {
        Self::new(kind.into()).with_source(span, source)
    }
}

#[derive(Debug, Clone)]
pub struct Snippet {
    position: Position,
    // characters to underline, at least one
    width: usize,
    line: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub col: usize,
    pub line: usize,
}

impl<T: error::Error + 'static> error::Error for Error<T> {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.kind)
    }
}

// kind, then `file:line:col` with the line underlined, then the contexts
impl<T: fmt::Display> fmt::Display for Error<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        match &self.snippet {
            Some(snippet) => {
                let Position { line, col } = snippet.position;
                let file = self
                    .file
                    .as_ref()
                    .and_then(|x| x.to_str())
                    .unwrap_or("<input>");
                write!(f, "\n   --> {file}:{}:{}\n    |", line + 1, col + 1)?;
                write!(f, "\n{:3} | {}", line + 1, snippet.line)?;
                write!(
                    f,
                    "\n    | {}{}",
                    " ".repeat(col),
                    "^".repeat(snippet.width)
                )?;
            }
            None => f.write_str("(no location info)")?,
        }
        for context in &self.contexts {
            write!(f, "\nwhile {context}")?;
        }
        Ok(())
    }
}
