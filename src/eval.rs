//! Operator sugar for building formulas.
//!
//! Formula handles cannot combine themselves without their factory, so the
//! operators build a small expression tree that [`FormulaFactory::eval`]
//! turns into a formula:
//!
//! | operator | meaning     |
//! |----------|-------------|
//! | `!f`     | negation    |
//! | `f & g`  | conjunction |
//! | `f \| g` | disjunction |
//! | `f >> g` | implication |
//! | `f % g`  | equivalence |
//!
//! ```
//! use formula_qe::factory::FormulaFactory;
//!
//! let ff = FormulaFactory::default();
//! let a = ff.variable("a");
//! let b = ff.variable("b");
//!
//! let f = ff.eval((a & b) >> !a);
//! assert_eq!(f, ff.implication(ff.and(a, b), ff.not(a)));
//! ```

use std::ops::{BitAnd, BitOr, Not, Rem, Shr};

use crate::factory::FormulaFactory;
use crate::reference::FormulaRef;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormulaExpr {
    Formula(FormulaRef),
    Not(Box<FormulaExpr>),
    And(Box<FormulaExpr>, Box<FormulaExpr>),
    Or(Box<FormulaExpr>, Box<FormulaExpr>),
    Impl(Box<FormulaExpr>, Box<FormulaExpr>),
    Equiv(Box<FormulaExpr>, Box<FormulaExpr>),
}

impl From<FormulaRef> for FormulaExpr {
    fn from(f: FormulaRef) -> Self {
        FormulaExpr::Formula(f)
    }
}

macro_rules! impl_formula_ops {
    ($t:ty) => {
        impl Not for $t {
            type Output = FormulaExpr;

            fn not(self) -> Self::Output {
                FormulaExpr::Not(Box::new(self.into()))
            }
        }

        impl<R: Into<FormulaExpr>> BitAnd<R> for $t {
            type Output = FormulaExpr;

            fn bitand(self, rhs: R) -> Self::Output {
                FormulaExpr::And(Box::new(self.into()), Box::new(rhs.into()))
            }
        }

        impl<R: Into<FormulaExpr>> BitOr<R> for $t {
            type Output = FormulaExpr;

            fn bitor(self, rhs: R) -> Self::Output {
                FormulaExpr::Or(Box::new(self.into()), Box::new(rhs.into()))
            }
        }

        impl<R: Into<FormulaExpr>> Shr<R> for $t {
            type Output = FormulaExpr;

            fn shr(self, rhs: R) -> Self::Output {
                FormulaExpr::Impl(Box::new(self.into()), Box::new(rhs.into()))
            }
        }

        impl<R: Into<FormulaExpr>> Rem<R> for $t {
            type Output = FormulaExpr;

            fn rem(self, rhs: R) -> Self::Output {
                FormulaExpr::Equiv(Box::new(self.into()), Box::new(rhs.into()))
            }
        }
    };
}

impl_formula_ops!(FormulaRef);
impl_formula_ops!(FormulaExpr);

pub trait Eval {
    fn eval(&self, factory: &FormulaFactory) -> FormulaRef;
}

impl FormulaFactory {
    pub fn eval(&self, value: impl Eval) -> FormulaRef {
        value.eval(self)
    }
}

impl Eval for FormulaRef {
    fn eval(&self, _factory: &FormulaFactory) -> FormulaRef {
        *self
    }
}

impl Eval for FormulaExpr {
    fn eval(&self, factory: &FormulaFactory) -> FormulaRef {
        match self {
            FormulaExpr::Formula(f) => *f,
            FormulaExpr::Not(a) => {
                let a = a.eval(factory);
                factory.not(a)
            }
            FormulaExpr::And(a, b) => {
                let (a, b) = (a.eval(factory), b.eval(factory));
                factory.and(a, b)
            }
            FormulaExpr::Or(a, b) => {
                let (a, b) = (a.eval(factory), b.eval(factory));
                factory.or(a, b)
            }
            FormulaExpr::Impl(a, b) => {
                let (a, b) = (a.eval(factory), b.eval(factory));
                factory.implication(a, b)
            }
            FormulaExpr::Equiv(a, b) => {
                let (a, b) = (a.eval(factory), b.eval(factory));
                factory.equivalence(a, b)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_ref() {
        let ff = FormulaFactory::default();
        let a = ff.variable("a");
        assert_eq!(ff.eval(a), a);
    }

    #[test]
    fn test_eval_operators() {
        let ff = FormulaFactory::default();
        let a = ff.variable("a");
        let b = ff.variable("b");
        let c = ff.variable("c");

        assert_eq!(ff.eval(!a), ff.not(a));
        assert_eq!(ff.eval(a & b), ff.and(a, b));
        assert_eq!(ff.eval(a | b), ff.or(a, b));
        assert_eq!(ff.eval(a >> b), ff.implication(a, b));
        assert_eq!(ff.eval(a % b), ff.equivalence(a, b));
        assert_eq!(ff.eval((a & b) | !c), ff.or(ff.and(a, b), ff.not(c)));
    }

    #[test]
    fn test_eval_simplifies() {
        let ff = FormulaFactory::default();
        let a = ff.variable("a");

        assert_eq!(ff.eval(a & !a), ff.falsum());
        assert_eq!(ff.eval(a | !a), ff.verum());
        assert_eq!(ff.eval(a >> a), ff.verum());
        assert_eq!(ff.eval(!!a), a);
    }
}
