use super::{Address, BinaryOperator, Code, Instruction, TempCounter};
use crate::ast::{Leaf, ParseTree, Tree};
use crate::error::{CompileError, CompileResult, SourceMetadata, StructuralError};
use crate::mode::NumericType;

/// Lowers the (unannotated) parse tree to three-address code, children first.
/// A multiplication first copies its right operand into a temporary of its
/// own, converting it in float mode, and multiplies by that temporary.
pub fn generate_intermediate_code<'source>(
    tree: &ParseTree<'source>,
    numeric: NumericType,
    source: &SourceMetadata,
) -> CompileResult<Code<'source>> {
    let mut temps = TempCounter::default();
    let mut code = Code::new();
    let result = compile_expr(&tree.value, numeric, &mut temps, &mut code, source)
        .map_err(|e| e.add_context("generating intermediate code"))?;
    code.push(Instruction::Copy {
        dest: leaf_address(&tree.target),
        value: result,
    });
    tracing::debug!(target: "irgen", "{} temporaries:\n{code}", temps.allocated());
    Ok(code)
}

fn leaf_address<'source>(leaf: &Leaf<'source>) -> Address<'source> {
    match leaf {
        Leaf::Operand(text) => Address::Named(text.clone()),
        Leaf::IntToFloat(value) => Address::named(value.clone()).int_to_float(),
    }
}

fn compile_expr<'source>(
    expr: &Tree<'source>,
    numeric: NumericType,
    temps: &mut TempCounter,
    code: &mut Code<'source>,
    source: &SourceMetadata,
) -> CompileResult<Address<'source>> {
    let (operator, span, lhs, rhs) = match expr {
        Tree::Leaf(leaf) => return Ok(leaf_address(leaf)),
        Tree::Binary {
            operator,
            span,
            lhs,
            rhs,
        } => (operator, span, lhs, rhs),
    };
    // compute first lhs, then rhs
    let lhs = compile_expr(lhs, numeric, temps, code, source)?;
    let rhs = compile_expr(rhs, numeric, temps, code, source)?;
    let operator = BinaryOperator::from_lexeme(operator).ok_or_else(|| {
        CompileError::at(
            StructuralError::UnsupportedOperator {
                operator: operator.to_string(),
            },
            span.unwrap_or_else(|| source.end_span()),
            source,
        )
    })?;
    tracing::trace!(target: "irgen", "{lhs} {operator} {rhs}");
    let rhs = match operator {
        BinaryOperator::Multiply => {
            let copy = temps.next_temp();
            code.push(Instruction::Copy {
                dest: copy.into(),
                value: if numeric.is_float() {
                    rhs.int_to_float()
                } else {
                    rhs
                },
            });
            copy.into()
        }
        BinaryOperator::Add | BinaryOperator::Subtract | BinaryOperator::Divide => rhs,
    };
    let dest = temps.next_temp();
    code.push(Instruction::Binary {
        dest: dest.into(),
        operator,
        lhs,
        rhs,
    });
    Ok(dest.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::grammar::{build_parse_tree, enumerate_tokens, tokenize};

    fn icg(input: &str, numeric: NumericType) -> CompileResult<String> {
        let meta = SourceMetadata::new(input);
        let (tokens, _) = enumerate_tokens(tokenize(&meta));
        let tree = build_parse_tree(&tokens, &meta)?;
        generate_intermediate_code(&tree, numeric, &meta).map(|code| code.to_string())
    }

    #[test]
    fn multiplication_copies_its_right_operand() {
        assert_eq!(
            icg("x=y*2", NumericType::Int).unwrap(),
            "temp1=2\ntemp2=id2*temp1\nid1=temp2"
        );
    }

    #[test]
    fn addition_is_a_single_instruction() {
        assert_eq!(
            icg("x = a + 3", NumericType::Int).unwrap(),
            "temp1=id2+3\nid1=temp1"
        );
    }

    #[test]
    fn float_mode_converts_multiplied_operands() {
        assert_eq!(
            icg("x=y*2", NumericType::Float).unwrap(),
            "temp1=inttofloat(2)\ntemp2=id2*temp1\nid1=temp2"
        );
        // only the right operand of `*` is converted, whatever it is
        assert_eq!(
            icg("x = 2 * y", NumericType::Float).unwrap(),
            "temp1=inttofloat(id2)\ntemp2=2*temp1\nid1=temp2"
        );
        assert_eq!(
            icg("x = a + 3", NumericType::Float).unwrap(),
            "temp1=id2+3\nid1=temp1"
        );
    }

    #[test]
    fn right_subtree_is_lowered_first() {
        assert_eq!(
            icg("a = b + c * d", NumericType::Int).unwrap(),
            "temp1=id4\ntemp2=id3*temp1\ntemp3=id2+temp2\nid1=temp3"
        );
    }

    #[test]
    fn nested_multiplication_wraps_temporaries() {
        assert_eq!(
            icg("a = b * c + 4", NumericType::Float).unwrap(),
            "temp1=id3+4\ntemp2=inttofloat(temp1)\ntemp3=id2*temp2\nid1=temp3"
        );
    }

    #[test]
    fn plain_copy() {
        assert_eq!(icg("a = b", NumericType::Float).unwrap(), "id1=id2");
    }

    #[test]
    fn unknown_operator_is_rejected() {
        let err = icg("a = b < c", NumericType::Int).unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::Structural(StructuralError::UnsupportedOperator {
                operator: "<".into()
            })
        );
        // points at the operator, not at the end of the line
        assert_eq!(err.position().map(|p| p.col), Some(6));
    }

    #[test]
    fn subtraction_and_division() {
        assert_eq!(
            icg("a = b - c / 2", NumericType::Int).unwrap(),
            "temp1=id3/2\ntemp2=id2-temp1\nid1=temp2"
        );
    }
}
