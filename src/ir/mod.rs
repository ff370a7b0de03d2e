//! Three-address code. Two passes produce it: `generate` walks the parse tree,
//! `optimize` re-derives it from the flat token stream. Both emit the same
//! instruction type but keep their own temporary numbering.
use std::borrow::Cow;

use crate::output::Output;

mod format;
pub mod generate;
pub mod optimize;

pub type Code<'source> = Output<Instruction<'source>>;

/// `temp<k>`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Temp(pub usize);

/// Hands out `temp1`, `temp2`, ... for one generation pass.
#[derive(Debug)]
pub struct TempCounter {
    next: usize,
}

impl Default for TempCounter {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl TempCounter {
    pub fn next_temp(&mut self) -> Temp {
        let current = self.next;
        self.next += 1;
        Temp(current)
    }
    /// How many temporaries were handed out.
    pub fn allocated(&self) -> usize {
        self.next - 1
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Address<'source> {
    /// Identifier or literal text, as written in the token stream.
    Named(Cow<'source, str>),
    Temp(Temp),
    /// Conversion of the wrapped value to floating point.
    IntToFloat(Box<Address<'source>>),
}

impl<'source> Address<'source> {
    pub fn named(text: impl Into<Cow<'source, str>>) -> Self {
        Self::Named(text.into())
    }
    pub fn int_to_float(self) -> Self {
        Self::IntToFloat(Box::new(self))
    }
}

impl From<Temp> for Address<'_> {
    fn from(temp: Temp) -> Self {
        Self::Temp(temp)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperator {
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        Some(match lexeme {
            "+" => Self::Add,
            "-" => Self::Subtract,
            "*" => Self::Multiply,
            "/" => Self::Divide,
            _ => return None,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction<'source> {
    /// `dest=value`
    Copy {
        dest: Address<'source>,
        value: Address<'source>,
    },
    /// `dest=lhs<op>rhs`
    Binary {
        dest: Address<'source>,
        operator: BinaryOperator,
        lhs: Address<'source>,
        rhs: Address<'source>,
    },
}
