use super::{Address, BinaryOperator, Code, Instruction, TempCounter};
use crate::error::{CompileError, CompileResult, SourceMetadata, StructuralError};
use crate::grammar::{split_assignment, Token, TokenKind};
use crate::mode::NumericType;

/// Re-derives three-address code straight from the enumerated tokens.
/// Operators are not copied into temporaries and, in float mode, integer
/// literals are written as floats (`2` becomes `2.0`) instead of converted.
pub fn optimize<'source>(
    tokens: &[Token<'source>],
    numeric: NumericType,
    source: &SourceMetadata,
) -> CompileResult<Code<'source>> {
    let (target, expression) = split_assignment(tokens, source)
        .map_err(|e| e.add_context("optimizing intermediate code"))?;
    let mut optimizer = Optimizer {
        numeric,
        source,
        temps: TempCounter::default(),
        code: Code::new(),
    };
    let result = optimizer
        .reduce(expression)
        .map_err(|e| e.add_context("optimizing intermediate code"))?;
    let Optimizer { temps, code, .. } = optimizer;
    let code = code.chain_single(Instruction::Copy {
        dest: Address::Named(target.lexeme.clone()),
        value: result,
    });
    tracing::debug!(target: "optimize", "{} temporaries:\n{code}", temps.allocated());
    Ok(code)
}

struct Optimizer<'a, 'source> {
    numeric: NumericType,
    source: &'a SourceMetadata<'a>,
    temps: TempCounter,
    code: Code<'source>,
}

impl<'source> Optimizer<'_, 'source> {
    fn reduce(&mut self, window: &[Token<'source>]) -> CompileResult<Address<'source>> {
        if let [single] = window {
            return Ok(self.leaf(single));
        }
        let split = window
            .iter()
            .enumerate()
            .find_map(|(i, token)| Some((i, BinaryOperator::from_lexeme(&token.lexeme)?)));
        let (at, operator) = match split {
            Some(found) => found,
            None => {
                let span = window
                    .first()
                    .map_or_else(|| self.source.end_span(), |token| token.span);
                return Err(CompileError::at(StructuralError::NoOperator, span, self.source));
            }
        };
        tracing::trace!(target: "optimize", "splitting {} tokens at {operator}", window.len());
        let lhs = self.reduce(&window[..at])?;
        let rhs = self.reduce(&window[at + 1..])?;
        let dest = self.temps.next_temp();
        self.code.push(Instruction::Binary {
            dest: dest.into(),
            operator,
            lhs,
            rhs,
        });
        Ok(dest.into())
    }

    fn leaf(&self, token: &Token<'source>) -> Address<'source> {
        if self.numeric.is_float() && is_integer_number(token) {
            Address::named(format!("{}.0", token.lexeme))
        } else {
            Address::Named(token.lexeme.clone())
        }
    }
}

fn is_integer_number(token: &Token) -> bool {
    token.kind == TokenKind::Number && !token.lexeme.contains('.')
}
