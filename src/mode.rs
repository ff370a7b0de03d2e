//! The two selections a compile runs under: how the line was written and which
//! numeric type the generated code works with.
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceForm {
    /// Operators must be written out: `2*y`.
    #[default]
    SourceCode,
    /// Implicit multiplication is allowed: `2y` means `2*y`.
    MathForm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericType {
    #[default]
    Int,
    Float,
}

impl NumericType {
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mode {
    pub form: SourceForm,
    pub numeric: NumericType,
}

impl Mode {
    pub const fn new(form: SourceForm, numeric: NumericType) -> Self {
        Self { form, numeric }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModeParseError {
    #[error("unknown source form {0:?}, expected `source-code` or `math-form`")]
    UnknownForm(String),
    #[error("unknown numeric type {0:?}, expected `int` or `float`")]
    UnknownNumericType(String),
}

impl FromStr for SourceForm {
    type Err = ModeParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "source-code" | "source" | "code" => Ok(Self::SourceCode),
            "math-form" | "math" => Ok(Self::MathForm),
            _ => Err(ModeParseError::UnknownForm(s.to_string())),
        }
    }
}

impl FromStr for NumericType {
    type Err = ModeParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "int" | "integer" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            _ => Err(ModeParseError::UnknownNumericType(s.to_string())),
        }
    }
}

impl fmt::Display for SourceForm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::SourceCode => "source-code",
            Self::MathForm => "math-form",
        })
    }
}

impl fmt::Display for NumericType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Int => "int",
            Self::Float => "float",
        })
    }
}
