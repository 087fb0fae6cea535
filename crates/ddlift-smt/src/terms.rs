use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Shared handle to an immutable sub-term.
pub type TermRef = Arc<Term>;

/// Integer literal, tagged with the signedness the solver reported it with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Numeral {
    Unsigned(u64),
    Signed(i64),
}

impl Numeral {
    /// The value reinterpreted as an unsigned 64-bit pattern.
    pub fn bits(self) -> u64 {
        match self {
            Numeral::Unsigned(v) => v,
            Numeral::Signed(v) => v as u64,
        }
    }

    pub fn is_zero(self) -> bool {
        self.bits() == 0
    }
}

/// Arithmetic operator spellings. Integer, signed bitvector and unsigned
/// bitvector forms of the same operation print identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArithOp {
    Add,
    BvAdd,
    Sub,
    BvSub,
    Mul,
    BvMul,
    Div,
    BvSDiv,
    BvSDivI,
    BvUDiv,
    BvUDivI,
    Mod,
    Rem,
    BvSMod,
    BvSModI,
    BvSRem,
    BvSRemI,
    BvURem,
    BvURemI,
}

impl ArithOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add | ArithOp::BvAdd => "+",
            ArithOp::Sub | ArithOp::BvSub => "-",
            ArithOp::Mul | ArithOp::BvMul => "*",
            ArithOp::Div
            | ArithOp::BvSDiv
            | ArithOp::BvSDivI
            | ArithOp::BvUDiv
            | ArithOp::BvUDivI => "/",
            ArithOp::Mod
            | ArithOp::Rem
            | ArithOp::BvSMod
            | ArithOp::BvSModI
            | ArithOp::BvSRem
            | ArithOp::BvSRemI
            | ArithOp::BvURem
            | ArithOp::BvURemI => "%",
        }
    }
}

/// Ordering comparisons in integer, signed and unsigned bitvector spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CmpOp {
    Ge,
    SGe,
    UGe,
    Le,
    SLe,
    ULe,
    Gt,
    SGt,
    UGt,
    Lt,
    SLt,
    ULt,
}

impl CmpOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Ge | CmpOp::SGe | CmpOp::UGe => ">=",
            CmpOp::Le | CmpOp::SLe | CmpOp::ULe => "<=",
            CmpOp::Gt | CmpOp::SGt | CmpOp::UGt => ">",
            CmpOp::Lt | CmpOp::SLt | CmpOp::ULt => "<",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicOp {
    And,
    Or,
}

impl LogicOp {
    pub fn symbol(self) -> &'static str {
        match self {
            LogicOp::And => "&&",
            LogicOp::Or => "||",
        }
    }
}

/// Scalar parameter attached to an operator declaration (e.g. the bit
/// positions of an `extract`).
///
/// Only integer parameters have a textual form in DDL; every other kind is
/// carried so the printer can emit a placeholder at the right position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Param {
    Int(i64),
    /// IEEE-754 bit pattern of a double parameter.
    Double(u64),
    Rational { num: i64, den: i64 },
    Symbol(String),
    Sort(String),
    Term(TermRef),
    FuncDecl(String),
}

/// Symbolic-logic expression tree.
///
/// Terms are immutable; sub-terms are reference counted so that assertions of
/// different productions can share them. Equality and hashing are structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    Num(Numeral),
    Bool(bool),
    Arith(ArithOp, Vec<TermRef>),
    Logic(LogicOp, Vec<TermRef>),
    Cmp(CmpOp, TermRef, TermRef),
    /// `naming` marks an equality that ties a byte range to a field name
    /// instead of constraining its value.
    Eq {
        lhs: TermRef,
        rhs: TermRef,
        #[serde(default)]
        naming: bool,
    },
    Distinct(TermRef, TermRef),
    Not(TermRef),
    Neg(TermRef),
    /// Byte read from `array` at `index`.
    Select { array: TermRef, index: TermRef },
    /// Byte concatenation, most significant byte first.
    Concat(Vec<TermRef>),
    Extract {
        args: Vec<TermRef>,
        params: Vec<Param>,
    },
    /// Any other operator. A nullary `App` with no parameters is a free
    /// symbolic constant.
    App {
        name: String,
        #[serde(default)]
        args: Vec<TermRef>,
        #[serde(default)]
        params: Vec<Param>,
    },
}

#[allow(clippy::should_implement_trait)]
impl Term {
    pub fn u64(n: u64) -> Self {
        Term::Num(Numeral::Unsigned(n))
    }

    pub fn i64(n: i64) -> Self {
        Term::Num(Numeral::Signed(n))
    }

    pub fn bool(b: bool) -> Self {
        Term::Bool(b)
    }

    pub fn constant(name: impl Into<String>) -> Self {
        Term::App {
            name: name.into(),
            args: Vec::new(),
            params: Vec::new(),
        }
    }

    pub fn app(name: impl Into<String>, args: Vec<Term>, params: Vec<Param>) -> Self {
        Term::App {
            name: name.into(),
            args: args.into_iter().map(Arc::new).collect(),
            params,
        }
    }

    pub fn arith(op: ArithOp, args: Vec<Term>) -> Self {
        Term::Arith(op, args.into_iter().map(Arc::new).collect())
    }

    pub fn add(self, other: Term) -> Self {
        Term::arith(ArithOp::Add, vec![self, other])
    }

    pub fn sub(self, other: Term) -> Self {
        Term::arith(ArithOp::Sub, vec![self, other])
    }

    pub fn mul(self, other: Term) -> Self {
        Term::arith(ArithOp::Mul, vec![self, other])
    }

    pub fn cmp(self, op: CmpOp, other: Term) -> Self {
        Term::Cmp(op, Arc::new(self), Arc::new(other))
    }

    pub fn ge(self, other: Term) -> Self {
        self.cmp(CmpOp::Ge, other)
    }

    pub fn lt(self, other: Term) -> Self {
        self.cmp(CmpOp::Lt, other)
    }

    pub fn eq(self, other: Term) -> Self {
        Term::Eq {
            lhs: Arc::new(self),
            rhs: Arc::new(other),
            naming: false,
        }
    }

    pub fn naming_eq(self, other: Term) -> Self {
        Term::Eq {
            lhs: Arc::new(self),
            rhs: Arc::new(other),
            naming: true,
        }
    }

    pub fn distinct(self, other: Term) -> Self {
        Term::Distinct(Arc::new(self), Arc::new(other))
    }

    pub fn and(terms: Vec<Term>) -> Self {
        Term::Logic(LogicOp::And, terms.into_iter().map(Arc::new).collect())
    }

    pub fn or(terms: Vec<Term>) -> Self {
        Term::Logic(LogicOp::Or, terms.into_iter().map(Arc::new).collect())
    }

    pub fn not(self) -> Self {
        Term::Not(Arc::new(self))
    }

    pub fn neg(self) -> Self {
        Term::Neg(Arc::new(self))
    }

    pub fn select(array: Term, index: Term) -> Self {
        Term::Select {
            array: Arc::new(array),
            index: Arc::new(index),
        }
    }

    pub fn concat(bytes: Vec<Term>) -> Self {
        Term::Concat(bytes.into_iter().map(Arc::new).collect())
    }

    /// Bits `high..=low` of `value`.
    pub fn extract(high: u32, low: u32, value: Term) -> Self {
        Term::Extract {
            args: vec![Arc::new(value)],
            params: vec![Param::Int(i64::from(high)), Param::Int(i64::from(low))],
        }
    }

    pub fn as_numeral(&self) -> Option<Numeral> {
        match self {
            Term::Num(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Term::Bool(true))
    }

    pub fn is_naming_eq(&self) -> bool {
        matches!(self, Term::Eq { naming: true, .. })
    }

    /// Conjuncts of a top-level `and` chain.
    ///
    /// Nested `and`s directly under the top are flattened; conjunctions
    /// appearing under any other operator are left intact. A term that is
    /// not an `and` is its own single conjunct.
    pub fn conjuncts(&self) -> Vec<&Term> {
        let mut out = Vec::new();
        collect_conjuncts(self, &mut out);
        out
    }

    /// Rebuild this node with every direct child passed through `f`.
    /// Parameters are kept as they are.
    pub fn map_children(&self, mut f: impl FnMut(&TermRef) -> TermRef) -> Term {
        match self {
            Term::Num(_) | Term::Bool(_) => self.clone(),
            Term::Arith(op, args) => Term::Arith(*op, map_each(args, &mut f)),
            Term::Logic(op, args) => Term::Logic(*op, map_each(args, &mut f)),
            Term::Concat(args) => Term::Concat(map_each(args, &mut f)),
            Term::Extract { args, params } => Term::Extract {
                args: map_each(args, &mut f),
                params: params.clone(),
            },
            Term::App { name, args, params } => Term::App {
                name: name.clone(),
                args: map_each(args, &mut f),
                params: params.clone(),
            },
            Term::Cmp(op, lhs, rhs) => Term::Cmp(*op, f(lhs), f(rhs)),
            Term::Eq { lhs, rhs, naming } => Term::Eq {
                lhs: f(lhs),
                rhs: f(rhs),
                naming: *naming,
            },
            Term::Distinct(lhs, rhs) => Term::Distinct(f(lhs), f(rhs)),
            Term::Not(inner) => Term::Not(f(inner)),
            Term::Neg(inner) => Term::Neg(f(inner)),
            Term::Select { array, index } => Term::Select {
                array: f(array),
                index: f(index),
            },
        }
    }
}

fn map_each(args: &[TermRef], f: &mut impl FnMut(&TermRef) -> TermRef) -> Vec<TermRef> {
    args.iter().map(|arg| f(arg)).collect()
}

fn collect_conjuncts<'a>(term: &'a Term, out: &mut Vec<&'a Term>) {
    match term {
        Term::Logic(LogicOp::And, args) => {
            for arg in args {
                collect_conjuncts(arg, out);
            }
        }
        other => out.push(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_numeral_bits_are_twos_complement() {
        assert_eq!(Numeral::Signed(-1).bits(), u64::MAX);
        assert_eq!(Numeral::Signed(-2).bits(), 0xFFFF_FFFF_FFFF_FFFE);
        assert!(Numeral::Unsigned(0).is_zero());
        assert!(!Numeral::Signed(3).is_zero());
    }

    #[test]
    fn conjuncts_flatten_only_top_level_and_chains() {
        let a = Term::constant("a").ge(Term::u64(1));
        let b = Term::constant("b").lt(Term::u64(2));
        let c = Term::constant("c").eq(Term::u64(3));
        let nested_or = Term::or(vec![Term::and(vec![a.clone(), b.clone()]), c.clone()]);
        let term = Term::and(vec![
            a.clone(),
            Term::and(vec![b.clone(), c.clone()]),
            nested_or.clone(),
        ]);
        assert_eq!(term.conjuncts(), vec![&a, &b, &c, &nested_or]);
    }

    #[test]
    fn non_conjunction_is_its_own_conjunct() {
        let t = Term::constant("x").distinct(Term::u64(0));
        assert_eq!(t.conjuncts(), vec![&t]);
    }

    #[test]
    fn structurally_equal_terms_are_equal() {
        let b = Term::constant("B");
        let lhs = Term::select(b.clone(), Term::u64(4)).add(Term::u64(1));
        let rhs = Term::select(b, Term::u64(4)).add(Term::u64(1));
        assert_eq!(lhs, rhs);
        assert_ne!(lhs, Term::constant("B").add(Term::u64(1)));
    }

    #[test]
    fn extract_carries_bit_positions_as_int_params() {
        let t = Term::extract(7, 0, Term::constant("x"));
        match t {
            Term::Extract { args, params } => {
                assert_eq!(args.len(), 1);
                assert_eq!(params, vec![Param::Int(7), Param::Int(0)]);
            }
            other => panic!("expected extract, got {other:?}"),
        }
    }

    #[test]
    fn term_json_roundtrip_keeps_naming_flag() {
        let t = Term::constant("len").naming_eq(Term::constant("field_len"));
        let json = serde_json::to_string(&t).unwrap();
        let back: Term = serde_json::from_str(&json).unwrap();
        assert!(back.is_naming_eq());
        assert_eq!(back, t);
    }
}
