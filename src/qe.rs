//! Quantifier elimination by Shannon expansion.
//!
//! Eliminating a variable `x` from a formula `f` replaces `f` by a combination
//! of its two cofactors:
//!
//! ```text
//! ∀x. f  =  f[true/x] ∧ f[false/x]
//! ∃x. f  =  f[true/x] ∨ f[false/x]
//! ```
//!
//! Several variables are eliminated one after another, in the order they were
//! given, each step working on the result of the previous one. The order only
//! affects the size of intermediate formulas, never the meaning of the result.
//! In the worst case every step doubles the formula, so the result can be
//! exponential in the number of eliminated variables.
//!
//! # Examples
//!
//! ```
//! use formula_qe::factory::FormulaFactory;
//! use formula_qe::qe::UniversalQuantifierElimination;
//! use formula_qe::transformation::FormulaTransformation;
//!
//! let ff = FormulaFactory::default();
//! let a = ff.variable("a");
//! let x = ff.variable("x");
//!
//! // ∀x. (a ∨ x)  =  a
//! let f = ff.or(a, x);
//! let qe = UniversalQuantifierElimination::new([ff.variable_of("x")]);
//! assert_eq!(qe.apply(&ff, f).unwrap(), a);
//! ```

use std::collections::HashSet;
use std::hash::BuildHasher;

use log::debug;

use crate::assignment::Assignment;
use crate::error::Result;
use crate::factory::FormulaFactory;
use crate::reference::FormulaRef;
use crate::transformation::FormulaTransformation;
use crate::types::Var;

/// Shannon expansion over each variable in turn, joining the two cofactors with `combine`.
fn eliminate(
    factory: &FormulaFactory,
    formula: FormulaRef,
    variables: &[Var],
    combine: fn(&FormulaFactory, FormulaRef, FormulaRef) -> FormulaRef,
) -> Result<FormulaRef> {
    let mut result = formula;
    for &var in variables {
        let high = factory.restrict(result, &Assignment::single(var, true))?;
        let low = factory.restrict(result, &Assignment::single(var, false))?;
        result = combine(factory, high, low);
        debug!(
            "eliminated {}: {} nodes",
            var,
            factory.number_of_nodes(result)
        );
    }
    Ok(result)
}

/// Eliminates universally quantified variables: `∀x1...∀xn. f`.
///
/// The variable sequence is fixed at construction and may contain
/// duplicates; a repeated variable is simply expanded again, which is
/// harmless for the meaning of the result. An empty sequence is the identity.
///
/// The transformation is never cached by the factory: its result depends on
/// the variable sequence, not only on the input formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniversalQuantifierElimination {
    elimination: Vec<Var>,
}

impl UniversalQuantifierElimination {
    /// Eliminate the given variables, in the given order.
    pub fn new(variables: impl IntoIterator<Item = Var>) -> Self {
        Self {
            elimination: variables.into_iter().collect(),
        }
    }

    /// Eliminate the variables of an unordered collection.
    ///
    /// The variables are sorted, so that the expansion order does not depend
    /// on the iteration order of the collection.
    pub fn from_unordered(variables: impl IntoIterator<Item = Var>) -> Self {
        let mut elimination: Vec<Var> = variables.into_iter().collect();
        elimination.sort_unstable();
        Self { elimination }
    }

    /// Eliminate the variables of a hash set, sorted as in [`from_unordered`][Self::from_unordered].
    pub fn from_set<S: BuildHasher>(variables: &HashSet<Var, S>) -> Self {
        Self::from_unordered(variables.iter().copied())
    }

    /// The variables to eliminate, in expansion order.
    pub fn variables(&self) -> &[Var] {
        &self.elimination
    }
}

impl FormulaTransformation for UniversalQuantifierElimination {
    fn apply(&self, factory: &FormulaFactory, formula: FormulaRef) -> Result<FormulaRef> {
        debug!("forall(f = {}, variables = {:?})", formula, self.elimination);
        eliminate(factory, formula, &self.elimination, FormulaFactory::and)
    }
}

/// Eliminates existentially quantified variables: `∃x1...∃xn. f`.
///
/// Same construction rules as [`UniversalQuantifierElimination`], with the
/// cofactors joined by a disjunction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistentialQuantifierElimination {
    elimination: Vec<Var>,
}

impl ExistentialQuantifierElimination {
    /// Eliminate the given variables, in the given order.
    pub fn new(variables: impl IntoIterator<Item = Var>) -> Self {
        Self {
            elimination: variables.into_iter().collect(),
        }
    }

    /// Eliminate the variables of an unordered collection, sorted.
    pub fn from_unordered(variables: impl IntoIterator<Item = Var>) -> Self {
        let mut elimination: Vec<Var> = variables.into_iter().collect();
        elimination.sort_unstable();
        Self { elimination }
    }

    /// Eliminate the variables of a hash set, sorted as in [`from_unordered`][Self::from_unordered].
    pub fn from_set<S: BuildHasher>(variables: &HashSet<Var, S>) -> Self {
        Self::from_unordered(variables.iter().copied())
    }

    /// The variables to eliminate, in expansion order.
    pub fn variables(&self) -> &[Var] {
        &self.elimination
    }
}

impl FormulaTransformation for ExistentialQuantifierElimination {
    fn apply(&self, factory: &FormulaFactory, formula: FormulaRef) -> Result<FormulaRef> {
        debug!("exists(f = {}, variables = {:?})", formula, self.elimination);
        eliminate(factory, formula, &self.elimination, FormulaFactory::or)
    }
}
