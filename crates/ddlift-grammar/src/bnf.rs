//! Grammar model handed over by the discovery pipeline.

use serde::{Deserialize, Serialize};

use ddlift_smt::terms::Term;

/// Identifier of a production. `0` is the entry production.
pub type ProductionId = u32;

pub const ENTRY_PRODUCTION: ProductionId = 0;

/// One edge of a byte interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    Constant(i64),
    Symbolic(Term),
}

/// Byte range read `[from, to]`.
///
/// An absent edge is malformed input; it is kept representable so the
/// lowering engine can reject it with a precise error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub from: Option<Bound>,
    pub to: Option<Bound>,
}

impl Interval {
    pub fn new(from: Bound, to: Bound) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn constant(from: i64, to: i64) -> Self {
        Self::new(Bound::Constant(from), Bound::Constant(to))
    }
}

/// Right-hand-side element of a production alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RhsItem {
    Production(ProductionId),
    Interval(Interval),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Production {
    pub id: ProductionId,
    #[serde(default)]
    pub alternatives: Vec<Vec<RhsItem>>,
    #[serde(default)]
    pub assertions: Vec<Term>,
}

impl Production {
    pub fn new(id: ProductionId) -> Self {
        Self {
            id,
            alternatives: Vec::new(),
            assertions: Vec::new(),
        }
    }

    pub fn with_alternative(mut self, items: Vec<RhsItem>) -> Self {
        self.alternatives.push(items);
        self
    }

    pub fn with_assertion(mut self, assertion: Term) -> Self {
        self.assertions.push(assertion);
        self
    }

    pub fn is_entry(&self) -> bool {
        self.id == ENTRY_PRODUCTION
    }
}

/// Ordered set of productions. The order is trusted and preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grammar {
    pub productions: Vec<Production>,
}

impl Grammar {
    pub fn new(productions: Vec<Production>) -> Self {
        Self { productions }
    }

    pub fn len(&self) -> usize {
        self.productions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }
}
