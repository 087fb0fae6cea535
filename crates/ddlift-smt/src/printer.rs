use thiserror::Error;

use crate::terms::{Numeral, Param, Term, TermRef};

/// Errors raised when a term cannot be printed as a DDL expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("malformed extract: no arguments and no parameters")]
    MalformedExtract,
}

/// Print a term as a DDL expression.
///
/// Every produced fragment, including those of sub-terms, is traced at
/// `trace` level.
pub fn render(term: &Term) -> Result<String, RenderError> {
    let out = match term {
        Term::Num(n) => hex_numeral(*n),
        Term::Bool(b) => {
            if *b {
                "true".to_string()
            } else {
                "false".to_string()
            }
        }
        Term::Select { index, .. } => match index.as_numeral() {
            Some(Numeral::Signed(i)) => format!("(Select {i})"),
            Some(Numeral::Unsigned(i)) => format!("(Select {i})"),
            None => format!("(Select {})", render(index)?),
        },
        Term::Eq { naming: true, .. } => String::new(),
        Term::Eq { lhs, rhs, .. } => format!("{} == {}", render(lhs)?, render(rhs)?),
        Term::Distinct(lhs, rhs) => format!("{} != {}", render(lhs)?, render(rhs)?),
        Term::Concat(bytes) => render_concat(bytes)?,
        Term::Arith(op, args) => render_nary(args, op.symbol())?,
        Term::Logic(op, args) => render_nary(args, op.symbol())?,
        Term::Cmp(op, lhs, rhs) => {
            format!("({} {} {})", render(lhs)?, op.symbol(), render(rhs)?)
        }
        Term::Not(inner) => format!("!({})", render(inner)?),
        Term::Neg(inner) => format!("-{}", render(inner)?),
        Term::Extract { args, params } => {
            if args.is_empty() && params.is_empty() {
                return Err(RenderError::MalformedExtract);
            }
            format!("(Extract {})", render_operands(args, params)?.join(" "))
        }
        Term::App { name, args, params } => {
            if args.is_empty() && params.is_empty() {
                name.clone()
            } else {
                format!("{name}({})", render_operands(args, params)?.join(", "))
            }
        }
    };
    tracing::trace!(fragment = %out, "rendered");
    Ok(out)
}

/// `0x` followed by the 16 uppercase hex digits of the two's-complement pattern.
pub fn hex_numeral(n: Numeral) -> String {
    format!("0x{:016X}", n.bits())
}

fn render_nary(args: &[TermRef], op: &str) -> Result<String, RenderError> {
    let inner: Vec<String> = args
        .iter()
        .map(|arg| render(arg))
        .collect::<Result<_, _>>()?;
    Ok(format!("({})", inner.join(&format!(" {op} "))))
}

/// Arguments first, then parameters, in declaration order.
fn render_operands(args: &[TermRef], params: &[Param]) -> Result<Vec<String>, RenderError> {
    let mut out = Vec::with_capacity(args.len() + params.len());
    for arg in args {
        out.push(render(arg)?);
    }
    out.extend(params.iter().map(render_param));
    Ok(out)
}

fn render_param(param: &Param) -> String {
    match param {
        Param::Int(n) => n.to_string(),
        Param::Double(_)
        | Param::Rational { .. }
        | Param::Symbol(_)
        | Param::Sort(_)
        | Param::Term(_)
        | Param::FuncDecl(_) => "?".to_string(),
    }
}

/// Big-endian byte concatenation as a base-256 polynomial.
///
/// Leading zero numerals are dropped; the suppression stops at the first
/// byte that is not a zero numeral.
fn render_concat(bytes: &[TermRef]) -> Result<String, RenderError> {
    let significant = bytes
        .iter()
        .skip_while(|b| b.as_numeral().is_some_and(Numeral::is_zero));
    let rendered: Vec<String> = significant.map(|b| render(b)).collect::<Result<_, _>>()?;
    if rendered.is_empty() {
        return Ok("0".to_string());
    }
    let last = rendered.len() - 1;
    let terms: Vec<String> = rendered
        .iter()
        .enumerate()
        .map(|(i, byte)| format!("{}{byte}", "256 * ".repeat(last - i)))
        .collect();
    Ok(terms.join(" + "))
}
