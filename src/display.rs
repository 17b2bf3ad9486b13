use std::fmt;

use crate::factory::FormulaFactory;
use crate::node::{FType, Node};
use crate::reference::FormulaRef;

/// Infix rendering of a formula, borrowed from its factory.
///
/// Operators: `~` (not), `&` (and), `|` (or), `=>` (implication) and `<=>`
/// (equivalence), from the strongest to the weakest binding. Parentheses are
/// only printed where precedence requires them.
pub struct FormulaDisplay<'a> {
    factory: &'a FormulaFactory,
    formula: FormulaRef,
}

impl FormulaFactory {
    pub fn display(&self, f: FormulaRef) -> FormulaDisplay<'_> {
        FormulaDisplay {
            factory: self,
            formula: f,
        }
    }

    pub fn to_string(&self, f: FormulaRef) -> String {
        self.display(f).to_string()
    }
}

impl FormulaDisplay<'_> {
    fn write_formula(&self, out: &mut fmt::Formatter<'_>, f: FormulaRef) -> fmt::Result {
        match self.factory.node(f) {
            Node::False => write!(out, "$false"),
            Node::True => write!(out, "$true"),
            Node::Literal(lit) => {
                if lit.is_negative() {
                    write!(out, "~")?;
                }
                write!(out, "{}", self.factory.name(lit.var()))
            }
            Node::Not(a) => {
                write!(out, "~(")?;
                self.write_formula(out, a)?;
                write!(out, ")")
            }
            Node::Impl(l, r) => self.write_infix(out, FType::Impl, " => ", &[l, r]),
            Node::Equiv(l, r) => self.write_infix(out, FType::Equiv, " <=> ", &[l, r]),
            Node::And(ops) => self.write_infix(out, FType::And, " & ", &ops),
            Node::Or(ops) => self.write_infix(out, FType::Or, " | ", &ops),
        }
    }

    fn write_infix(
        &self,
        out: &mut fmt::Formatter<'_>,
        kind: FType,
        sep: &str,
        operands: &[FormulaRef],
    ) -> fmt::Result {
        for (i, &op) in operands.iter().enumerate() {
            if i > 0 {
                write!(out, "{}", sep)?;
            }
            if self.factory.kind(op).precedence() <= kind.precedence() {
                write!(out, "(")?;
                self.write_formula(out, op)?;
                write!(out, ")")?;
            } else {
                self.write_formula(out, op)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for FormulaDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_formula(f, self.formula)
    }
}
