#![doc = include_str!("../README.md")]

//! Lowering of BNF grammars into DDL source.
//!
//! Each production becomes one DDL definition. Interval edges that are not
//! compile-time constants are bound to fresh index variables, and the
//! production's guard assertions are printed in terms of those variables.

pub mod config;
pub mod document;
pub mod helpers;
pub mod lower;

use std::fmt;
use std::path::PathBuf;

use ddlift_grammar::ProductionId;
use ddlift_smt::printer::RenderError;

pub use config::{ConfigError, LoweringConfig};
pub use document::{dump, render_document, write_document, Destination, WriteOutcome};
pub use lower::{lower_production, Lowerer};

/// Which edge of an interval a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundEdge {
    From,
    To,
}

impl fmt::Display for BoundEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundEdge::From => f.write_str("from"),
            BoundEdge::To => f.write_str("to"),
        }
    }
}

/// Malformed grammar input. Lowering stops at the first one; nothing is
/// written for the document.
#[derive(Debug, thiserror::Error)]
pub enum LoweringError {
    /// An interval edge is absent.
    #[error(
        "production {production}, alternative {alternative}, item {item}: interval has no '{edge}' bound"
    )]
    MissingBound {
        production: ProductionId,
        alternative: usize,
        item: usize,
        edge: BoundEdge,
    },
    /// A bound or assertion contains a term the printer rejects.
    #[error("production {production}: {source}")]
    Render {
        production: ProductionId,
        #[source]
        source: RenderError,
    },
}

/// Failure to persist a rendered document.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("Cannot open the file <{}> for writing", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed writing to <{}>", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors returned by [`dump`].
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    #[error(transparent)]
    Lowering(#[from] LoweringError),
    #[error(transparent)]
    Write(#[from] WriteError),
}
