use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use ddlift_grammar::{Grammar, Production};
use ddlift_smt::index_vars::IndexVarAllocator;

use crate::config::LoweringConfig;
use crate::helpers::generate_primitive_helpers;
use crate::lower::Lowerer;
use crate::{CodegenError, LoweringError, WriteError};

/// Where a rendered document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// The `-` sentinel: render but persist nothing.
    Stdout,
    File(PathBuf),
}

impl Destination {
    pub const STDOUT_SENTINEL: &'static str = "-";
}

impl FromStr for Destination {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::STDOUT_SENTINEL {
            Ok(Destination::Stdout)
        } else {
            Ok(Destination::File(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Stdout => f.write_str(Self::STDOUT_SENTINEL),
            Destination::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    NotPersisted,
    Written { path: PathBuf, bytes: usize },
}

/// Render the whole document: primitive helpers, then one definition per
/// production in the given order.
///
/// Every block is followed by an extra newline. One index-variable
/// allocator serves the whole document, so fresh names never repeat.
pub fn render_document(
    productions: &[Production],
    config: &LoweringConfig,
) -> Result<String, LoweringError> {
    let vars = IndexVarAllocator::with_prefix(&config.index_var_prefix);
    let lowerer = Lowerer::new(config, &vars);

    let mut doc = generate_primitive_helpers();
    doc.push('\n');
    for production in productions {
        doc.push_str(&lowerer.lower(production)?);
        doc.push('\n');
    }
    tracing::debug!(
        productions = productions.len(),
        fresh_vars = vars.allocated(),
        "rendered document"
    );
    Ok(doc)
}

/// Persist a rendered document.
///
/// [`Destination::Stdout`] writes nothing. A file destination is created (or
/// truncated) and receives the whole text in one write.
pub fn write_document(text: &str, destination: &Destination) -> Result<WriteOutcome, WriteError> {
    match destination {
        Destination::Stdout => {
            tracing::debug!("destination is '-', document not persisted");
            Ok(WriteOutcome::NotPersisted)
        }
        Destination::File(path) => {
            let mut file = std::fs::File::create(path).map_err(|source| WriteError::Open {
                path: path.clone(),
                source,
            })?;
            file.write_all(text.as_bytes())
                .and_then(|()| file.flush())
                .map_err(|source| WriteError::Write {
                    path: path.clone(),
                    source,
                })?;
            tracing::info!("{} dumped!", path.display());
            Ok(WriteOutcome::Written {
                path: path.clone(),
                bytes: text.len(),
            })
        }
    }
}

/// Lower `grammar` and write it to `destination`.
///
/// Lowering finishes before the destination is touched, so a malformed
/// grammar never leaves a partial file behind.
pub fn dump(
    grammar: &Grammar,
    destination: &Destination,
    config: &LoweringConfig,
) -> Result<WriteOutcome, CodegenError> {
    let text = render_document(&grammar.productions, config)?;
    Ok(write_document(&text, destination)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddlift_grammar::{Bound, Interval, RhsItem};
    use ddlift_smt::terms::Term;

    #[test]
    fn sentinel_parses_to_stdout() {
        assert_eq!("-".parse::<Destination>().unwrap(), Destination::Stdout);
        assert_eq!(
            "out.ddl".parse::<Destination>().unwrap(),
            Destination::File(PathBuf::from("out.ddl"))
        );
        assert_eq!(Destination::Stdout.to_string(), "-");
    }

    #[test]
    fn empty_grammar_is_helpers_only() {
        let doc = render_document(&[], &LoweringConfig::default()).unwrap();
        assert_eq!(doc, format!("{}\n", generate_primitive_helpers()));
    }

    #[test]
    fn stdout_persists_nothing() {
        let outcome = write_document("def Main = \n", &Destination::Stdout).unwrap();
        assert_eq!(outcome, WriteOutcome::NotPersisted);
    }

    #[test]
    fn lowering_error_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.ddl");
        let bad = Production::new(0).with_alternative(vec![RhsItem::Interval(Interval {
            from: None,
            to: Some(Bound::Symbolic(Term::constant("x"))),
        })]);
        let err = dump(
            &Grammar::new(vec![bad]),
            &Destination::File(path.clone()),
            &LoweringConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CodegenError::Lowering(_)));
        assert!(!path.exists());
    }
}
