use ddlift_grammar::{Bound, Production, ProductionId, RhsItem};
use ddlift_smt::index_vars::IndexVarAllocator;
use ddlift_smt::printer::{render, RenderError};
use ddlift_smt::substitute::Substitution;
use ddlift_smt::terms::Term;

use crate::config::LoweringConfig;
use crate::{BoundEdge, LoweringError};

const INDENT: &str = "    ";

/// Lower one production into one DDL definition.
///
/// Fresh index variables come from `vars`, which must be shared by every
/// production of the same document.
pub fn lower_production(
    production: &Production,
    vars: &IndexVarAllocator,
    config: &LoweringConfig,
) -> Result<String, LoweringError> {
    Lowerer::new(config, vars).lower(production)
}

/// Per-document lowering context.
pub struct Lowerer<'a> {
    config: &'a LoweringConfig,
    vars: &'a IndexVarAllocator,
}

impl<'a> Lowerer<'a> {
    pub fn new(config: &'a LoweringConfig, vars: &'a IndexVarAllocator) -> Self {
        Self { config, vars }
    }

    pub fn lower(&self, production: &Production) -> Result<String, LoweringError> {
        let render_err = |source: RenderError| LoweringError::Render {
            production: production.id,
            source,
        };

        let mut out = String::new();
        write_header(&mut out, &self.config.definition_name(production));

        // Bound expressions are mapped to the variables bound for them, across
        // all alternatives of this production.
        let mut subst = Substitution::new();
        let mut conjunctions: Vec<Vec<ProductionId>> = Vec::new();

        for (alternative, items) in production.alternatives.iter().enumerate() {
            let mut conjunction = Vec::new();
            for (item, rhs) in items.iter().enumerate() {
                match rhs {
                    RhsItem::Production(id) => conjunction.push(*id),
                    RhsItem::Interval(interval) => {
                        let missing = |edge| LoweringError::MissingBound {
                            production: production.id,
                            alternative,
                            item,
                            edge,
                        };
                        let from = interval.from.as_ref().ok_or_else(|| missing(BoundEdge::From))?;
                        let to = interval.to.as_ref().ok_or_else(|| missing(BoundEdge::To))?;
                        self.bind_interval(from, to, &mut subst, &mut out)
                            .map_err(render_err)?;
                    }
                }
            }
            if !conjunction.is_empty() {
                conjunctions.push(conjunction);
            }
        }

        write_alternation(&mut out, &conjunctions, self.config);
        write_guards(&mut out, &production.assertions, &subst).map_err(render_err)?;
        out.push_str("\n\n");

        tracing::debug!(
            production = production.id,
            fresh_vars = subst.len(),
            alternatives = conjunctions.len(),
            "lowered production\n{out}"
        );
        Ok(out)
    }

    /// Bind a fresh variable for every symbolic edge, `from` before `to`.
    /// Constant edges are fixed by the surrounding structure and need none.
    fn bind_interval(
        &self,
        from: &Bound,
        to: &Bound,
        subst: &mut Substitution,
        out: &mut String,
    ) -> Result<(), RenderError> {
        match (from, to) {
            (Bound::Constant(_), Bound::Constant(_)) => Ok(()),
            (Bound::Symbolic(lo), Bound::Symbolic(hi)) => {
                self.bind_fresh(lo, subst, out)?;
                self.bind_fresh(hi, subst, out)
            }
            (Bound::Symbolic(lo), Bound::Constant(_)) => self.bind_fresh(lo, subst, out),
            (Bound::Constant(_), Bound::Symbolic(hi)) => self.bind_fresh(hi, subst, out),
        }
    }

    fn bind_fresh(
        &self,
        bound: &Term,
        subst: &mut Substitution,
        out: &mut String,
    ) -> Result<(), RenderError> {
        let var = self.vars.fresh();
        out.push_str(&format!(
            "{INDENT}let {} = {}\n",
            render(&var)?,
            render(bound)?
        ));
        subst.push(bound.clone(), var);
        Ok(())
    }
}

fn write_header(out: &mut String, name: &str) {
    out.push_str(&format!("def {name} = \n"));
    out.push_str("  block\n");
    out.push_str(&format!("{INDENT}let len = Len\n"));
}

/// `{ L1; L2; } <| { L3; }` on one indented line. Always emitted, even with no
/// alternatives.
fn write_alternation(out: &mut String, conjunctions: &[Vec<ProductionId>], config: &LoweringConfig) {
    let alternatives: Vec<String> = conjunctions
        .iter()
        .map(|conjunction| {
            let mut seq = String::from("{ ");
            for id in conjunction {
                seq.push_str(&config.rule_name(*id));
                seq.push_str("; ");
            }
            seq.push('}');
            seq
        })
        .collect();
    out.push_str(INDENT);
    out.push_str(&alternatives.join(" <| "));
    out.push('\n');
}

/// One `(<guard>) is true` line per top-level conjunct, projected through
/// `subst`. Literal `true` conjuncts and conjuncts that print empty (naming
/// equalities) produce nothing.
fn write_guards(out: &mut String, assertions: &[Term], subst: &Substitution) -> Result<(), RenderError> {
    for assertion in assertions {
        for conjunct in assertion.conjuncts() {
            if conjunct.is_true() {
                continue;
            }
            let guard = render(&subst.apply(conjunct))?;
            if guard.is_empty() {
                continue;
            }
            out.push_str(&format!("\n{INDENT}({guard}) is true"));
        }
    }
    Ok(())
}
