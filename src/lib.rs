//! Teaching compiler for single assignment statements: normalization,
//! lexing, identifier enumeration, parse trees, type annotation, three-address
//! code (plain and optimized) and a tiny register assembly.
pub mod asmgen;
pub mod ast;
pub mod error;
pub mod grammar;
pub mod ir;
pub mod mode;
pub mod output;
pub mod report;
pub mod semantic;

use itertools::Itertools;

use crate::error::{CompileResult, SourceMetadata};
use crate::mode::Mode;
use crate::report::Report;

/// Compiles one assignment. Nothing is shared between calls.
pub fn compile(expression: &str, mode: Mode) -> CompileResult<Report> {
    compile_source(&SourceMetadata::new(expression), mode)
}

/// Like [`compile`], with diagnostics naming the file the line came from.
pub fn compile_source(source: &SourceMetadata, mode: Mode) -> CompileResult<Report> {
    tracing::debug!(
        target: "compile",
        "compiling {:?} ({}, {})",
        source.input(),
        mode.form,
        mode.numeric
    );
    let normalized = grammar::normalize(source, mode.form)?;
    let metadata = source.derive(&normalized);

    let tokens = grammar::tokenize(&metadata);
    let (tokens, symbols) = grammar::enumerate_tokens(tokens);
    let lexical = tokens.iter().map(|token| &token.lexeme).join(" ");
    tracing::debug!(target: "enumerate", "{lexical}");

    let tree = grammar::build_parse_tree(&tokens, &metadata)?;
    let annotated = semantic::annotate(&tree, mode.numeric);
    let intermediate = ir::generate::generate_intermediate_code(&tree, mode.numeric, &metadata)?;
    let optimized = ir::optimize::optimize(&tokens, mode.numeric, &metadata)?;
    let assembly = asmgen::generate_assembly(&tokens, mode.numeric, &metadata)?;

    Ok(Report {
        source_code: normalized.clone(),
        lexical,
        syntax_tree: tree.to_string(),
        semantic_tree: annotated.to_string(),
        intermediate_code: intermediate.to_string(),
        optimized_code: optimized.to_string(),
        assembly: assembly.to_string(),
        symbols: symbols
            .iter()
            .map(|(lexeme, name)| (name.to_string(), lexeme.to_string()))
            .collect(),
    })
}
