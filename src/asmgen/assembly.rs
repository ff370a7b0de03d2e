use crate::mode::NumericType;
use crate::write_instruction;
use std::borrow::Cow;
use std::fmt;

/// One line of target code. The numeric mode decides the opcode spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly<'source> {
    pub instruction: Instruction<'source>,
    pub numeric: NumericType,
}

impl<'source> Assembly<'source> {
    pub const fn new(instruction: Instruction<'source>, numeric: NumericType) -> Self {
        Self {
            instruction,
            numeric,
        }
    }
}

impl fmt::Display for Assembly<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let float = self.numeric.is_float();
        match &self.instruction {
            Instruction::Ld { register, source } => {
                write_instruction!(f, Mnemonic("LD", float), register, source)
            }
            Instruction::Add { target, lhs, rhs } => {
                write_instruction!(f, Mnemonic("ADD", float), target, lhs, rhs)
            }
            Instruction::Sub { target, lhs, rhs } => {
                write_instruction!(f, Mnemonic("SUB", float), target, lhs, rhs)
            }
            Instruction::Mul { target, lhs, rhs } => {
                write_instruction!(f, Mnemonic("MUL", float), target, lhs, rhs)
            }
            Instruction::Str { variable, register } => {
                write_instruction!(f, Mnemonic("STR", float), variable, register)
            }
        }
    }
}

// float opcodes carry an `F` suffix
struct Mnemonic(&'static str, bool);

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0)?;
        if self.1 {
            f.write_str("F")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction<'source> {
    /// Load a variable or an immediate into a register
    Ld {
        register: Register,
        source: Data<'source>,
    },
    /// Add a register and some data into a register
    Add {
        target: Register,
        lhs: Register,
        rhs: Data<'source>,
    },
    /// Subtract some data from a register into a register
    Sub {
        target: Register,
        lhs: Register,
        rhs: Data<'source>,
    },
    /// Multiply a register by some data into a register
    Mul {
        target: Register,
        lhs: Register,
        rhs: Data<'source>,
    },
    /// Store a register into a variable
    Str {
        variable: Cow<'source, str>,
        register: Register,
    },
}

impl<'source> Instruction<'source> {
    /// `ADD`, `SUB` or `MUL` for the operator text, if it has one.
    pub fn arithmetic(
        operator: &str,
        target: Register,
        lhs: Register,
        rhs: Data<'source>,
    ) -> Option<Self> {
        Some(match operator {
            "+" => Self::Add { target, lhs, rhs },
            "-" => Self::Sub { target, lhs, rhs },
            "*" => Self::Mul { target, lhs, rhs },
            _ => return None,
        })
    }
}

#[macro_export]
macro_rules! format_instr_args {
    () => { "" };
    ($arg:expr) => { "{}" };
    ($first:expr, $($rest:expr),+) => {
        concat!("{}, ", $crate::format_instr_args!($($rest),+))
    }
}

#[macro_export]
macro_rules! format_instr {
    ($name:expr) => { format_args!("{}", $name) };
    ($name:expr, $($args:expr),+) => {
        format_args!(concat!("{} ", $crate::format_instr_args!($($args),+)), $name, $($args),+)
    };
}

#[macro_export]
macro_rules! write_instruction {
    ($formatter:expr, $name:expr) => {
        $formatter.write_fmt($crate::format_instr!($name))
    };
    ($formatter:expr, $name:expr, $($args:expr),+) => { $formatter.write_fmt($crate::format_instr!($name, $($args),+)) }
}

/// Data is something that isn't going to be modified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Data<'source> {
    /// Take data from register
    Register(Register),
    /// Take data from a named variable
    Variable(Cow<'source, str>),
    /// Literal text, written as `#<text>`
    Immediate(Cow<'source, str>),
}

impl fmt::Display for Data<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Immediate(value) => write!(f, "#{}", value),
            Self::Variable(name) => f.write_str(name),
            Self::Register(reg) => write!(f, "{}", reg),
        }
    }
}

impl From<Register> for Data<'_> {
    fn from(register: Register) -> Self {
        Self::Register(register)
    }
}

/// The two registers the generator works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    R1,
    R2,
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::R1 => write!(f, "R1"),
            Self::R2 => write!(f, "R2"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_opcodes() {
        let ld = Assembly::new(
            Instruction::Ld {
                register: Register::R2,
                source: Data::Immediate("2".into()),
            },
            NumericType::Int,
        );
        let mul = Assembly::new(
            Instruction::Mul {
                target: Register::R1,
                lhs: Register::R1,
                rhs: Register::R2.into(),
            },
            NumericType::Int,
        );
        let store = Assembly::new(
            Instruction::Str {
                variable: "id1".into(),
                register: Register::R1,
            },
            NumericType::Int,
        );
        assert_eq!(ld.to_string(), "LD R2, #2");
        assert_eq!(mul.to_string(), "MUL R1, R1, R2");
        assert_eq!(store.to_string(), "STR id1, R1");
    }

    #[test]
    fn float_opcodes_are_suffixed() {
        let sub = Assembly::new(
            Instruction::Sub {
                target: Register::R1,
                lhs: Register::R1,
                rhs: Data::Variable("id3".into()),
            },
            NumericType::Float,
        );
        assert_eq!(sub.to_string(), "SUBF R1, R1, id3");
    }

    #[test]
    fn arithmetic_by_operator() {
        let mul = Instruction::arithmetic("*", Register::R1, Register::R1, Register::R2.into());
        assert!(matches!(mul, Some(Instruction::Mul { .. })));
        assert_eq!(
            Instruction::arithmetic("/", Register::R1, Register::R1, Register::R2.into()),
            None
        );
    }
}
