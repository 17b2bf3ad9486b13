use std::collections::HashMap;

use log::debug;

use crate::assignment::Assignment;
use crate::error::{FormulaError, Result};
use crate::factory::FormulaFactory;
use crate::node::Node;
use crate::reference::FormulaRef;

impl FormulaFactory {
    /// Restriction `f|assignment`: replace every assigned variable by its
    /// value and simplify.
    ///
    /// The result is rebuilt through the smart constructors, so a fully
    /// assigned formula collapses to `$true` or `$false`. Shared sub-formulas
    /// are restricted once per call.
    ///
    /// # Examples
    ///
    /// ```
    /// use formula_qe::assignment::Assignment;
    /// use formula_qe::factory::FormulaFactory;
    ///
    /// let ff = FormulaFactory::default();
    /// let a = ff.variable("a");
    /// let b = ff.variable("b");
    /// let f = ff.and(a, b);
    ///
    /// let va = ff.variable_of("a");
    /// assert_eq!(ff.restrict(f, &Assignment::single(va, true)).unwrap(), b);
    /// assert_eq!(ff.restrict(f, &Assignment::single(va, false)).unwrap(), ff.falsum());
    /// ```
    pub fn restrict(&self, f: FormulaRef, assignment: &Assignment) -> Result<FormulaRef> {
        self.check(f)?;
        debug!("restrict(f = {}, assignment = {:?})", f, assignment.literals());

        if assignment.is_empty() {
            return Ok(f);
        }

        let mut cache = HashMap::new();
        Ok(self.restrict_(f, assignment, &mut cache))
    }

    fn restrict_(
        &self,
        f: FormulaRef,
        assignment: &Assignment,
        cache: &mut HashMap<FormulaRef, FormulaRef>,
    ) -> FormulaRef {
        if let Some(&res) = cache.get(&f) {
            return res;
        }

        let res = match self.node(f) {
            Node::False | Node::True => f,
            Node::Literal(lit) => match assignment.value(lit.var()) {
                Some(value) => self.constant(value == lit.phase()),
                None => f,
            },
            Node::Not(a) => {
                let a = self.restrict_(a, assignment, cache);
                self.not(a)
            }
            Node::Impl(l, r) => {
                let l = self.restrict_(l, assignment, cache);
                let r = self.restrict_(r, assignment, cache);
                self.implication(l, r)
            }
            Node::Equiv(l, r) => {
                let l = self.restrict_(l, assignment, cache);
                let r = self.restrict_(r, assignment, cache);
                self.equivalence(l, r)
            }
            Node::And(ops) => {
                let ops: Vec<FormulaRef> = ops
                    .iter()
                    .map(|&op| self.restrict_(op, assignment, cache))
                    .collect();
                self.and_many(ops)
            }
            Node::Or(ops) => {
                let ops: Vec<FormulaRef> = ops
                    .iter()
                    .map(|&op| self.restrict_(op, assignment, cache))
                    .collect();
                self.or_many(ops)
            }
        };

        cache.insert(f, res);
        res
    }

    /// Truth value of `f` under the assignment.
    ///
    /// Fails with [`FormulaError::Unassigned`] when evaluation needs a variable
    /// the assignment leaves open.
    pub fn evaluate(&self, f: FormulaRef, assignment: &Assignment) -> Result<bool> {
        self.check(f)?;
        let mut cache = HashMap::new();
        self.evaluate_(f, assignment, &mut cache)
    }

    fn evaluate_(
        &self,
        f: FormulaRef,
        assignment: &Assignment,
        cache: &mut HashMap<FormulaRef, bool>,
    ) -> Result<bool> {
        if let Some(&value) = cache.get(&f) {
            return Ok(value);
        }

        let value = match self.node(f) {
            Node::False => false,
            Node::True => true,
            Node::Literal(lit) => {
                let value = assignment
                    .value(lit.var())
                    .ok_or(FormulaError::Unassigned(lit.var()))?;
                value == lit.phase()
            }
            Node::Not(a) => !self.evaluate_(a, assignment, cache)?,
            Node::Impl(l, r) => {
                !self.evaluate_(l, assignment, cache)? || self.evaluate_(r, assignment, cache)?
            }
            Node::Equiv(l, r) => {
                self.evaluate_(l, assignment, cache)? == self.evaluate_(r, assignment, cache)?
            }
            Node::And(ops) => {
                let mut value = true;
                for &op in ops.iter() {
                    if !self.evaluate_(op, assignment, cache)? {
                        value = false;
                        break;
                    }
                }
                value
            }
            Node::Or(ops) => {
                let mut value = false;
                for &op in ops.iter() {
                    if self.evaluate_(op, assignment, cache)? {
                        value = true;
                        break;
                    }
                }
                value
            }
        };

        cache.insert(f, value);
        Ok(value)
    }
}
