use std::fmt;

/// Everything one compile produces, already rendered to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub source_code: String,
    pub lexical: String,
    pub syntax_tree: String,
    pub semantic_tree: String,
    pub intermediate_code: String,
    pub optimized_code: String,
    pub assembly: String,
    /// `(synthetic name, original lexeme)` in allocation order.
    pub symbols: Vec<(String, String)>,
}

impl Report {
    /// The labelled sections, in print order. The symbol table is not one of
    /// them, see [`Report::symbol_table`].
    pub fn sections(&self) -> [(&'static str, &str); 7] {
        [
            ("Source Code", self.source_code.as_str()),
            ("Lexical Analyzer", self.lexical.as_str()),
            ("Parse Tree (Syntax Analyzer)", self.syntax_tree.as_str()),
            ("Parse Tree (Semantic Analyzer)", self.semantic_tree.as_str()),
            ("Intermediate Code Generator", self.intermediate_code.as_str()),
            ("Code Optimizer", self.optimized_code.as_str()),
            ("Code Generation", self.assembly.as_str()),
        ]
    }

    pub fn symbol_table(&self) -> SymbolListing<'_> {
        SymbolListing(&self.symbols)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, (label, body)) in self.sections().into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{label}:")?;
            writeln!(f, "{body}")?;
        }
        Ok(())
    }
}

/// `Symbol Table:` followed by one `id<k> = <lexeme>` line per identifier.
pub struct SymbolListing<'a>(&'a [(String, String)]);

impl fmt::Display for SymbolListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Symbol Table:")?;
        for (name, lexeme) in self.0 {
            writeln!(f, "{name} = {lexeme}")?;
        }
        Ok(())
    }
}
