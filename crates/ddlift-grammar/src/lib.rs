#![doc = include_str!("../README.md")]

pub mod bnf;
pub mod errors;

use std::path::Path;

pub use bnf::*;
pub use errors::GrammarError;

/// Parse a JSON grammar document.
///
/// Unknown right-hand-side item, bound or term shapes are rejected here, so
/// the lowering engine only ever sees the closed set of variants.
pub fn parse(source: &str, filename: &str) -> Result<Grammar, GrammarError> {
    serde_json::from_str(source).map_err(|err| GrammarError::json(&err, source, filename))
}

/// Read and parse a JSON grammar file.
pub fn load(path: &Path) -> Result<Grammar, GrammarError> {
    let source = std::fs::read_to_string(path).map_err(|source| GrammarError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse(&source, &path.display().to_string())
}

/// Serialize a grammar back to pretty-printed JSON.
pub fn to_json(grammar: &Grammar) -> serde_json::Result<String> {
    serde_json::to_string_pretty(grammar)
}
