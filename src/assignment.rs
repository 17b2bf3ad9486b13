use std::collections::HashMap;

use crate::error::{FormulaError, Result};
use crate::types::{Lit, Var};

/// A partial assignment of truth values to variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    values: HashMap<Var, bool>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assignment fixing exactly one variable.
    pub fn single(var: Var, value: bool) -> Self {
        Self {
            values: HashMap::from([(var, value)]),
        }
    }

    /// Builds an assignment from literals: a positive literal assigns `true`,
    /// a negative one `false`.
    ///
    /// Repeating a literal is fine; mentioning both phases of a variable is an error.
    pub fn from_literals(literals: impl IntoIterator<Item = Lit>) -> Result<Self> {
        let mut assignment = Self::new();
        for lit in literals {
            match assignment.assign(lit.var(), lit.phase()) {
                Some(old) if old != lit.phase() => {
                    return Err(FormulaError::ContradictoryAssignment(lit.var()));
                }
                _ => {}
            }
        }
        Ok(assignment)
    }

    /// Assign a value, returning the previous one.
    pub fn assign(&mut self, var: Var, value: bool) -> Option<bool> {
        self.values.insert(var, value)
    }

    pub fn value(&self, var: Var) -> Option<bool> {
        self.values.get(&var).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Var, bool)> + '_ {
        self.values.iter().map(|(&v, &b)| (v, b))
    }

    /// The assignment as literals, sorted by variable.
    pub fn literals(&self) -> Vec<Lit> {
        let mut lits: Vec<Lit> = self.iter().map(|(v, b)| v.lit(b)).collect();
        lits.sort();
        lits
    }
}

impl FromIterator<(Var, bool)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (Var, bool)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single() {
        let x = Var::new(1);
        let y = Var::new(2);
        let a = Assignment::single(x, false);
        assert_eq!(a.value(x), Some(false));
        assert_eq!(a.value(y), None);
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_from_literals() {
        let x = Var::new(1);
        let y = Var::new(2);
        let a = Assignment::from_literals([x.pos(), y.neg(), x.pos()]).unwrap();
        assert_eq!(a.value(x), Some(true));
        assert_eq!(a.value(y), Some(false));
        assert_eq!(a.literals(), vec![x.pos(), y.neg()]);
    }

    #[test]
    fn test_from_literals_contradiction() {
        let x = Var::new(1);
        let res = Assignment::from_literals([x.pos(), x.neg()]);
        assert_eq!(res, Err(FormulaError::ContradictoryAssignment(x)));
    }

    #[test]
    fn test_collect() {
        let x = Var::new(1);
        let a: Assignment = [(x, true)].into_iter().collect();
        assert_eq!(a, Assignment::single(x, true));
        assert!(!a.is_empty());
        assert!(Assignment::new().is_empty());
    }
}
