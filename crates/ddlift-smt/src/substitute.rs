//! Simultaneous term substitution.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::terms::{Term, TermRef};

/// Ordered `before -> to` replacement table applied in one simultaneous pass.
///
/// Keys are compared structurally. Recording the same `before` twice keeps the
/// first replacement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    pairs: IndexMap<Term, Term>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, before: Term, to: Term) {
        self.pairs.entry(before).or_insert(to);
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Replace every occurrence of a recorded `before` term in `term`.
    ///
    /// Matching is top-down and a replacement is never revisited, so a
    /// replacement that itself contains a `before` term stays as recorded.
    pub fn apply(&self, term: &Term) -> Term {
        if self.pairs.is_empty() {
            return term.clone();
        }
        match self.pairs.get(term) {
            Some(to) => to.clone(),
            None => term.map_children(|child| self.apply_ref(child)),
        }
    }

    fn apply_ref(&self, term: &TermRef) -> TermRef {
        match self.pairs.get(term.as_ref()) {
            Some(to) => Arc::new(to.clone()),
            None => {
                let rebuilt = term.map_children(|child| self.apply_ref(child));
                if rebuilt == **term {
                    Arc::clone(term)
                } else {
                    Arc::new(rebuilt)
                }
            }
        }
    }
}

impl FromIterator<(Term, Term)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (Term, Term)>>(iter: I) -> Self {
        let mut subst = Substitution::new();
        for (before, to) in iter {
            subst.push(before, to);
        }
        subst
    }
}
