//! Type-safe wrappers for propositional variables and literals.
//!
//! Variables are interned by name inside a [`FormulaFactory`][crate::factory::FormulaFactory],
//! so two variables with the same name in the same factory are the same [`Var`].
//! The wrappers here only carry the interned identifier; use the factory to
//! get the name back.
use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;

/// A variable identifier (1-indexed).
///
/// # Invariants
///
/// - Variable IDs must be >= 1 (0 is reserved, so that literals can be signed)
/// - IDs are assigned in interning order by the owning factory
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(u32);

impl Var {
    /// Creates a new variable with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if `id == 0` or if `id` does not fit into a signed literal.
    pub fn new(id: u32) -> Self {
        assert_ne!(id, 0, "Variable IDs must be >= 1");
        assert!(id <= i32::MAX as u32, "Variable ID {} is too large", id);
        Var(id)
    }

    /// Returns the raw variable ID as a `u32`.
    pub fn id(self) -> u32 {
        self.0
    }

    /// Positive literal of this variable.
    pub fn pos(self) -> Lit {
        Lit::new(self, true)
    }

    /// Negative literal of this variable.
    pub fn neg(self) -> Lit {
        Lit::new(self, false)
    }

    /// Literal of this variable with the given phase.
    pub fn lit(self, phase: bool) -> Lit {
        Lit::new(self, phase)
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<Var> for u32 {
    fn from(var: Var) -> Self {
        var.0
    }
}

/// A literal: a variable together with its phase.
///
/// Stored as a signed integer in DIMACS style: `+v` for the positive literal
/// and `-v` for the negative one.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Lit(i32);

impl Lit {
    pub fn new(var: Var, phase: bool) -> Self {
        let v = var.id() as i32;
        Lit(if phase { v } else { -v })
    }

    /// Creates a literal from its DIMACS representation.
    ///
    /// # Panics
    ///
    /// Panics if `value == 0`.
    pub fn from_dimacs(value: i32) -> Self {
        assert_ne!(value, 0, "Literal 0 is not a valid DIMACS literal");
        Lit(value)
    }

    pub fn var(self) -> Var {
        Var(self.0.unsigned_abs())
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// The phase of the literal: `true` for positive.
    pub fn phase(self) -> bool {
        self.is_positive()
    }

    pub fn to_dimacs(self) -> i32 {
        self.0
    }
}

impl Neg for Lit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Lit(-self.0)
    }
}

// Literals of the same variable are adjacent, positive first.
impl Ord for Lit {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.var(), self.is_negative()).cmp(&(other.var(), other.is_negative()))
    }
}

impl PartialOrd for Lit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "~")?;
        }
        write!(f, "{}", self.var())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_creation() {
        let v1 = Var::new(1);
        let v2 = Var::new(2);
        assert_eq!(v1.id(), 1);
        assert_eq!(v2.id(), 2);
        assert!(v1 < v2);
    }

    #[test]
    #[should_panic(expected = "Variable IDs must be >= 1")]
    fn test_var_zero_panics() {
        Var::new(0);
    }

    #[test]
    fn test_lit_phase() {
        let x = Var::new(3);
        assert!(x.pos().is_positive());
        assert!(x.neg().is_negative());
        assert_eq!(x.pos().var(), x);
        assert_eq!(x.neg().var(), x);
        assert_eq!(-x.pos(), x.neg());
        assert_eq!(x.lit(false), x.neg());
        assert_eq!(x.neg().to_dimacs(), -3);
        assert_eq!(Lit::from_dimacs(-3), x.neg());
    }

    #[test]
    fn test_lit_order() {
        let x1 = Var::new(1);
        let x2 = Var::new(2);
        let mut lits = vec![x2.neg(), x1.neg(), x2.pos(), x1.pos()];
        lits.sort();
        assert_eq!(lits, vec![x1.pos(), x1.neg(), x2.pos(), x2.neg()]);
    }

    #[test]
    fn test_lit_display() {
        let x = Var::new(7);
        assert_eq!(x.pos().to_string(), "v7");
        assert_eq!(x.neg().to_string(), "~v7");
    }
}
