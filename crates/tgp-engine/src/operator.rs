//! Binary operators that recombine two cached output vectors element-wise.
//!
//! Traceless programs are never stored as trees, so recombination works directly on the
//! values each parent produced for every training sample: the offspring's value at
//! sample `i` is `op(parent1[i], parent2[i])`.

use std::fmt;

/// A binary operator over chromosome values.
pub trait Operator<V>: Copy + fmt::Debug + fmt::Display + 'static {
    /// The fixed operator set. Recombination picks uniformly among these.
    const ALL: &'static [Self];

    /// Combines one value of each parent.
    fn apply(self, a: V, b: V) -> V;

    /// Writes `op(a[i], b[i])` for every `i` into `out`, replacing its previous contents.
    fn combine_into(self, a: &[V], b: &[V], out: &mut Vec<V>)
    where
        V: Copy,
    {
        debug_assert_eq!(a.len(), b.len());
        out.clear();
        out.extend(a.iter().zip(b).map(|(&x, &y)| self.apply(x, y)));
    }
}

/// Real arithmetic used by the classification problem.
///
/// Division is not guarded: `x / 0.0` yields an infinity or NaN, which is kept in the
/// offspring and later fails to map to any class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ArithmeticOperator {
    #[display("+")]
    Add,
    #[display("-")]
    Sub,
    #[display("*")]
    Mul,
    #[display("/")]
    Div,
}

impl Operator<f64> for ArithmeticOperator {
    const ALL: &'static [Self] = &[Self::Add, Self::Sub, Self::Mul, Self::Div];

    fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
        }
    }
}

/// Boolean gates used by the parity problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum LogicOperator {
    #[display("AND")]
    And,
    #[display("OR")]
    Or,
    #[display("NAND")]
    Nand,
    #[display("NOR")]
    Nor,
}

impl Operator<bool> for LogicOperator {
    const ALL: &'static [Self] = &[Self::And, Self::Or, Self::Nand, Self::Nor];

    fn apply(self, a: bool, b: bool) -> bool {
        match self {
            Self::And => a & b,
            Self::Or => a | b,
            Self::Nand => !(a & b),
            Self::Nor => !(a | b),
        }
    }
}
