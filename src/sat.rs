use std::collections::HashMap;

use log::debug;
use num_bigint::BigUint;

use crate::assignment::Assignment;
use crate::error::{FormulaError, Result};
use crate::factory::FormulaFactory;
use crate::reference::FormulaRef;
use crate::types::Var;

impl FormulaFactory {
    /// Number of assignments to `vars` that satisfy `f`.
    ///
    /// Counts by Shannon expansion over `vars`, so it is exponential in the
    /// worst case; meant for checking results, not for large instances.
    /// Every variable of `f` must be among `vars`.
    pub fn count_models(&self, f: FormulaRef, vars: &[Var]) -> Result<BigUint> {
        self.check(f)?;

        let mut vars = vars.to_vec();
        vars.sort_unstable();
        vars.dedup();

        if let Some(v) = self
            .variables(f)
            .into_iter()
            .find(|v| vars.binary_search(v).is_err())
        {
            return Err(FormulaError::Unassigned(v));
        }

        let mut cache = HashMap::new();
        let count = self.count_models_(f, &vars, &mut cache)?;
        debug!("count_models(f = {}) -> {}", f, count);
        Ok(count)
    }

    fn count_models_(
        &self,
        f: FormulaRef,
        vars: &[Var],
        cache: &mut HashMap<(FormulaRef, usize), BigUint>,
    ) -> Result<BigUint> {
        if self.is_false(f) {
            return Ok(BigUint::ZERO);
        }
        if self.is_true(f) {
            return Ok(BigUint::from(1u32) << vars.len());
        }

        // `vars` is always a suffix of the same list, so its length identifies it.
        let key = (f, vars.len());
        if let Some(count) = cache.get(&key) {
            return Ok(count.clone());
        }

        let Some((&v, rest)) = vars.split_first() else {
            panic!("Formula {} is not constant after assigning all its variables", f);
        };
        let low = self.restrict(f, &Assignment::single(v, false))?;
        let high = self.restrict(f, &Assignment::single(v, true))?;
        let count = self.count_models_(low, rest, cache)? + self.count_models_(high, rest, cache)?;

        cache.insert(key, count.clone());
        Ok(count)
    }

    /// Check whether `f` holds under every assignment.
    pub fn is_tautology(&self, f: FormulaRef) -> Result<bool> {
        self.check(f)?;
        let mut cache = HashMap::new();
        self.is_tautology_(f, &mut cache)
    }

    fn is_tautology_(&self, f: FormulaRef, cache: &mut HashMap<FormulaRef, bool>) -> Result<bool> {
        if self.is_true(f) {
            return Ok(true);
        }
        if self.is_false(f) {
            return Ok(false);
        }
        if let Some(&res) = cache.get(&f) {
            return Ok(res);
        }

        let Some(v) = self.any_variable(f) else {
            panic!("Formula {} has no variables but is not constant", f);
        };
        let high = self.restrict(f, &Assignment::single(v, true))?;
        let res = if self.is_tautology_(high, cache)? {
            let low = self.restrict(f, &Assignment::single(v, false))?;
            self.is_tautology_(low, cache)?
        } else {
            false
        };

        cache.insert(f, res);
        Ok(res)
    }

    /// Check whether `f` and `g` agree under every assignment.
    pub fn is_equivalent(&self, f: FormulaRef, g: FormulaRef) -> Result<bool> {
        self.check(f)?;
        self.check(g)?;
        self.is_tautology(self.equivalence(f, g))
    }

    /// Check whether every model of `f` is a model of `g`.
    pub fn implies(&self, f: FormulaRef, g: FormulaRef) -> Result<bool> {
        self.check(f)?;
        self.check(g)?;
        self.is_tautology(self.implication(f, g))
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_count_models() {
        let ff = FormulaFactory::default();

        let x1 = ff.variable("x1");
        let x2 = ff.variable("x2");
        let x3 = ff.variable("x3");
        let vars: Vec<Var> = ["x1", "x2", "x3"]
            .iter()
            .map(|name| ff.variable_of(name))
            .collect();

        assert_eq!(ff.count_models(ff.falsum(), &vars), Ok(BigUint::ZERO));
        assert_eq!(ff.count_models(ff.verum(), &vars), Ok(BigUint::from(8u32)));
        assert_eq!(ff.count_models(x1, &vars), Ok(BigUint::from(4u32)));
        assert_eq!(ff.count_models(ff.and(x1, x2), &vars), Ok(BigUint::from(2u32)));
        assert_eq!(
            ff.count_models(ff.or_many([x1, x2, x3]), &vars),
            Ok(BigUint::from(7u32))
        );
        // x1 ^ x2
        let f = ff.not(ff.equivalence(x1, x2));
        assert_eq!(ff.count_models(f, &vars), Ok(BigUint::from(4u32)));
    }

    #[test]
    fn test_count_models_missing_variable() {
        let ff = FormulaFactory::default();

        let x1 = ff.variable("x1");
        let x2 = ff.variable("x2");
        let v1 = ff.variable_of("x1");
        let v2 = ff.variable_of("x2");
        assert_eq!(
            ff.count_models(ff.and(x1, x2), &[v1]),
            Err(FormulaError::Unassigned(v2))
        );
    }

    #[test]
    fn test_count_models_many_variables() {
        let ff = FormulaFactory::default();

        let vars: Vec<Var> = (0..80).map(|i| ff.variable_of(&format!("v{}", i))).collect();
        let f = ff.var(vars[0]);
        let expected = BigUint::from(1u32) << 79;
        assert_eq!(ff.count_models(f, &vars), Ok(expected));
    }

    #[test]
    fn test_tautology() {
        let ff = FormulaFactory::default();

        let a = ff.variable("a");
        let b = ff.variable("b");

        // Peirce's law: ((a => b) => a) => a
        let peirce = ff.implication(ff.implication(ff.implication(a, b), a), a);
        assert_eq!(ff.is_tautology(peirce), Ok(true));
        assert_eq!(ff.is_tautology(ff.implication(a, b)), Ok(false));
    }

    #[test]
    fn test_equivalent_and_implies() {
        let ff = FormulaFactory::default();

        let a = ff.variable("a");
        let b = ff.variable("b");

        // De Morgan
        let f = ff.not(ff.and(a, b));
        let g = ff.or(ff.not(a), ff.not(b));
        assert_eq!(ff.is_equivalent(f, g), Ok(true));
        assert_eq!(ff.is_equivalent(f, a), Ok(false));

        assert_eq!(ff.implies(ff.and(a, b), a), Ok(true));
        assert_eq!(ff.implies(a, ff.and(a, b)), Ok(false));
    }
}
