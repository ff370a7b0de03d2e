use std::fmt;

use super::{Address, BinaryOperator, Instruction, Temp};

// format impls
impl fmt::Display for Temp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "temp{}", self.0)
    }
}

impl fmt::Display for Address<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Named(text) => f.write_str(text),
            Address::Temp(temp) => write!(f, "{temp}"),
            Address::IntToFloat(inner) => write!(f, "inttofloat({inner})"),
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        })
    }
}

impl fmt::Display for Instruction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Copy { dest, value } => write!(f, "{dest}={value}"),
            Instruction::Binary {
                dest,
                operator,
                lhs,
                rhs,
            } => write!(f, "{dest}={lhs}{operator}{rhs}"),
        }
    }
}
