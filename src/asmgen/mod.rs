//! Fixed-pattern target code for one- and two-operator expressions.
pub mod assembly;

use self::assembly::{Assembly, Data, Instruction, Register};
use crate::error::{CompileError, CompileResult, SourceMetadata, StructuralError};
use crate::grammar::{split_assignment, Token, TokenKind, SYNTHETIC_PREFIX};
use crate::mode::NumericType;
use crate::output::Output;

/// Emits register code for the `L op R` and `L op1 M op2 R` shapes. Inside a
/// shape, an operator or operand with no matching instruction is left out;
/// any other token count is rejected.
pub fn generate_assembly<'source>(
    tokens: &[Token<'source>],
    numeric: NumericType,
    source: &SourceMetadata,
) -> CompileResult<Output<Assembly<'source>>> {
    let (result, expression) = split_assignment(tokens, source)
        .map_err(|e| e.add_context("generating assembly"))?;
    let mut generator = AsmGen {
        numeric,
        source,
        output: Output::new(),
    };
    generator
        .expression(expression)
        .map_err(|e| e.add_context("generating assembly"))?;
    generator.emit(Instruction::Str {
        variable: result.lexeme.clone(),
        register: Register::R1,
    });
    tracing::debug!(
        target: "asmgen",
        "{} instructions:\n{}",
        generator.output.len(),
        generator.output
    );
    Ok(generator.output)
}

struct AsmGen<'a, 'source> {
    numeric: NumericType,
    source: &'a SourceMetadata<'a>,
    output: Output<Assembly<'source>>,
}

impl<'source> AsmGen<'_, 'source> {
    fn emit(&mut self, instruction: Instruction<'source>) {
        tracing::trace!(target: "asmgen", "{instruction:?}");
        self.output.push(Assembly::new(instruction, self.numeric));
    }

    fn expression(&mut self, expression: &[Token<'source>]) -> CompileResult<()> {
        match expression {
            [lhs, operator, rhs] => {
                self.load(Register::R2, rhs);
                self.load(Register::R1, lhs);
                let combined = Instruction::arithmetic(
                    &operator.lexeme,
                    Register::R1,
                    Register::R1,
                    Register::R2.into(),
                );
                self.emit_or_skip(combined, operator);
                Ok(())
            }
            [lhs, outer, middle, inner, rhs] => {
                self.load(Register::R2, middle);
                let scaled = inner.is("*").then(|| Instruction::Mul {
                    target: Register::R2,
                    lhs: Register::R2,
                    rhs: Data::Immediate(rhs.lexeme.clone()),
                });
                self.emit_or_skip(scaled, inner);
                self.load(Register::R1, lhs);
                let combined = match outer.lexeme.as_ref() {
                    "+" | "-" => Instruction::arithmetic(
                        &outer.lexeme,
                        Register::R1,
                        Register::R1,
                        Register::R2.into(),
                    ),
                    _ => None,
                };
                self.emit_or_skip(combined, outer);
                Ok(())
            }
            other => Err(CompileError::at(
                StructuralError::UnsupportedExpressionStructure {
                    tokens: other.len(),
                },
                other.first().map_or_else(|| self.source.end_span(), |t| t.span),
                self.source,
            )),
        }
    }

    fn emit_or_skip(&mut self, instruction: Option<Instruction<'source>>, token: &Token) {
        match instruction {
            Some(instruction) => self.emit(instruction),
            None => skip(token),
        }
    }

    // only identifiers and numbers can be loaded, anything else is left out
    fn load(&mut self, register: Register, operand: &Token<'source>) {
        let source = if operand.lexeme.starts_with(SYNTHETIC_PREFIX) {
            Data::Variable(operand.lexeme.clone())
        } else if operand.kind == TokenKind::Number {
            Data::Immediate(operand.lexeme.clone())
        } else {
            return skip(operand);
        };
        self.emit(Instruction::Ld { register, source });
    }
}

fn skip(token: &Token) {
    tracing::debug!(
        target: "asmgen",
        "no instruction for {:?} at {}",
        token.lexeme,
        token.span.offset
    );
}
