//! Fresh index variables for symbolic interval bounds.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::terms::Term;

pub const DEFAULT_INDEX_VAR_PREFIX: &str = "ii";

/// Run-scoped source of fresh index variables.
///
/// Names are `<prefix><n>` with `n` counting up from 1. The counter never
/// resets, so one allocator shared by every production of a document yields
/// names that are unique across the whole document. [`fresh`](Self::fresh)
/// is the only way to obtain a name.
#[derive(Debug)]
pub struct IndexVarAllocator {
    prefix: String,
    next: AtomicU64,
}

impl IndexVarAllocator {
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_INDEX_VAR_PREFIX)
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }

    /// Allocate a new symbolic integer constant.
    pub fn fresh(&self) -> Term {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        let name = format!("{}{n}", self.prefix);
        tracing::trace!(var = %name, "allocated index variable");
        Term::constant(name)
    }

    /// Number of variables handed out so far.
    pub fn allocated(&self) -> u64 {
        self.next.load(Ordering::Relaxed) - 1
    }
}

impl Default for IndexVarAllocator {
    fn default() -> Self {
        Self::new()
    }
}
