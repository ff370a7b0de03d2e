//! Checks that run on the raw line before lexing, and the textual rewrites
//! (`pi` folding, implicit multiplication) that produce the source the lexer
//! sees.
use crate::error::{CompileError, CompileResult, LexicalError, SourceMetadata, Span, SyntaxError};
use crate::mode::SourceForm;

const PI: (&str, &str) = ("pi", "3.14");

pub fn normalize(source: &SourceMetadata, form: SourceForm) -> CompileResult<String> {
    let input = source.input();
    check_input(source)?;
    let expression = input.replace(PI.0, PI.1);
    let normalized = match form {
        SourceForm::SourceCode => {
            if let Some(offset) = find_digit_before_letter(&expression) {
                // the offset is in the rewritten text
                let rewritten = source.derive(&expression);
                return Err(CompileError::at(
                    LexicalError::ImplicitMultiplication,
                    Span::new(offset),
                    &rewritten,
                ));
            }
            expression
        }
        SourceForm::MathForm => insert_implicit_multiplication(&expression),
    };
    tracing::debug!(target: "normalize", "{input:?} -> {normalized:?} ({form})");
    Ok(normalized)
}

fn check_input(source: &SourceMetadata) -> CompileResult<()> {
    let input = source.input();
    let trimmed = input.trim_end();
    if trimmed.ends_with('+') {
        return Err(CompileError::at(
            SyntaxError::TrailingOperator,
            Span::new(trimmed.len() - 1),
            source,
        ));
    }
    if let Some(offset) = input.find("++") {
        return Err(CompileError::at(
            SyntaxError::ConsecutiveOperators,
            Span::new(offset),
            source,
        ));
    }
    if let Some((offset, name)) = find_self_assignment(input) {
        return Err(CompileError::at(
            SyntaxError::SelfAssignment {
                name: name.to_string(),
            },
            Span::new(offset),
            source,
        ));
    }
    Ok(())
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Finds `name = name` where both sides are the same whole identifier.
/// Returns the offset of the assigned name.
fn find_self_assignment(input: &str) -> Option<(usize, &str)> {
    input.match_indices('=').find_map(|(eq, _)| {
        let before = input[..eq].trim_end();
        let target_start = before
            .char_indices()
            .rev()
            .find(|&(_, c)| !is_identifier_char(c))
            .map_or(0, |(i, c)| i + c.len_utf8());
        let target = &before[target_start..];
        if !target.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return None;
        }
        let after = input[eq + 1..].trim_start();
        let value_len = after
            .find(|c: char| !is_identifier_char(c))
            .unwrap_or(after.len());
        (&after[..value_len] == target).then(|| (target_start, target))
    })
}

fn find_digit_before_letter(expression: &str) -> Option<usize> {
    expression
        .char_indices()
        .zip(expression.chars().skip(1))
        .find(|((_, current), next)| current.is_ascii_digit() && next.is_ascii_alphabetic())
        .map(|((offset, _), _)| offset)
}

/// `2y` -> `2*y` and `y2` -> `y*2`.
fn insert_implicit_multiplication(expression: &str) -> String {
    let mut output = String::with_capacity(expression.len() * 2);
    let mut chars = expression.chars().peekable();
    while let Some(current) = chars.next() {
        output.push(current);
        if let Some(&next) = chars.peek() {
            let digit_letter = current.is_ascii_digit() && next.is_ascii_alphabetic();
            let letter_digit = current.is_ascii_alphabetic() && next.is_ascii_digit();
            if digit_letter || letter_digit {
                output.push('*');
            }
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn run(input: &str, form: SourceForm) -> CompileResult<String> {
        normalize(&SourceMetadata::new(input), form)
    }

    fn syntax_error(input: &str) -> SyntaxError {
        match run(input, SourceForm::SourceCode).unwrap_err().kind {
            ErrorKind::Syntax(e) => e,
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn source_code_passes_through() {
        assert_eq!(run("x = 2 * y", SourceForm::SourceCode).unwrap(), "x = 2 * y");
    }

    #[test]
    fn trailing_plus_is_rejected() {
        assert_eq!(syntax_error("x = y +"), SyntaxError::TrailingOperator);
        assert_eq!(syntax_error("x = y +   "), SyntaxError::TrailingOperator);
    }

    #[test]
    fn double_plus_is_rejected() {
        assert_eq!(syntax_error("x = y ++ z"), SyntaxError::ConsecutiveOperators);
    }

    #[test]
    fn self_assignment_is_rejected() {
        assert_eq!(
            syntax_error("x = x"),
            SyntaxError::SelfAssignment { name: "x".into() }
        );
        assert_eq!(
            syntax_error("total=total*2"),
            SyntaxError::SelfAssignment {
                name: "total".into()
            }
        );
    }

    // a plain textual match would also reject `ab = b` and `x = xy`, those
    // assign one identifier to a different one
    #[test]
    fn self_assignment_compares_whole_identifiers_not_substrings() {
        assert!(run("x = xy", SourceForm::SourceCode).is_ok());
        assert!(run("ab = b", SourceForm::SourceCode).is_ok());
        assert!(run("x = y", SourceForm::SourceCode).is_ok());
    }

    #[test]
    fn non_ascii_characters_next_to_identifiers() {
        assert_eq!(run("éx = y", SourceForm::SourceCode).unwrap(), "éx = y");
        assert_eq!(run("x = y § 2", SourceForm::SourceCode).unwrap(), "x = y § 2");
        assert_eq!(
            syntax_error("€x = x"),
            SyntaxError::SelfAssignment { name: "x".into() }
        );
        let err = run("ü€b = b", SourceForm::SourceCode).unwrap_err();
        // columns count characters
        assert_eq!(err.position().map(|p| p.col), Some(2));
    }

    #[test]
    fn self_assignment_is_checked_before_the_form() {
        let err = run("x = x", SourceForm::MathForm).unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::Syntax(SyntaxError::SelfAssignment { .. })
        ));
    }

    #[test]
    fn pi_is_folded_in_both_forms() {
        assert_eq!(run("a = pi * r", SourceForm::SourceCode).unwrap(), "a = 3.14 * r");
        assert_eq!(run("a = pi * r", SourceForm::MathForm).unwrap(), "a = 3.14 * r");
    }

    #[test]
    fn implicit_multiplication_is_a_lexical_error_in_source_code() {
        let err = run("3y", SourceForm::SourceCode).unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::Lexical(LexicalError::ImplicitMultiplication)
        );
        assert_eq!(err.position().map(|p| p.col), Some(0));
    }

    #[test]
    fn implicit_multiplication_is_desugared_in_math_form() {
        assert_eq!(run("2y+3", SourceForm::MathForm).unwrap(), "2*y+3");
        assert_eq!(run("x = y2", SourceForm::MathForm).unwrap(), "x = y*2");
        assert_eq!(run("a = 2b3", SourceForm::MathForm).unwrap(), "a = 2*b*3");
    }

    #[test]
    fn letters_after_pi_folding_count_as_implicit_multiplication() {
        assert_eq!(run("a = 2pi", SourceForm::MathForm).unwrap(), "a = 23.14");
        assert_eq!(run("a = pir", SourceForm::MathForm).unwrap(), "a = 3.14*r");
        assert!(run("a = pir", SourceForm::SourceCode).is_err());
    }
}
