#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum GrammarError {
    #[error("Cannot read grammar file '{path}'")]
    #[diagnostic(code(ddlift::grammar::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed grammar: {message}")]
    #[diagnostic(
        code(ddlift::grammar::json),
        help("productions carry `id`, `alternatives` and `assertions`; right-hand-side items are `production` or `interval`; bounds are `constant` or `symbolic`")
    )]
    Json {
        message: String,
        #[label("here")]
        span: Option<miette::SourceSpan>,
        #[source_code]
        src: miette::NamedSource<String>,
    },
}

impl GrammarError {
    pub(crate) fn json(err: &serde_json::Error, source: &str, filename: &str) -> Self {
        let span = byte_offset(source, err.line(), err.column())
            .map(|offset| miette::SourceSpan::new(offset.into(), 0));
        GrammarError::Json {
            message: err.to_string(),
            span,
            src: miette::NamedSource::new(filename, source.to_owned()),
        }
    }
}

/// Byte offset of a 1-based line/column position reported by serde_json.
fn byte_offset(source: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    Some((line_start + column.saturating_sub(1)).min(source.len()))
}
