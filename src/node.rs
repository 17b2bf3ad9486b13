use std::fmt;
use std::rc::Rc;

use crate::reference::FormulaRef;
use crate::types::Lit;
use crate::utils::{pairing2, pairing3, pairing_many, MyHash};

/// The kind of a formula node.
///
/// Variants are declared from the weakest to the strongest binding.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum FType {
    Equiv,
    Impl,
    Or,
    And,
    Not,
    Literal,
    True,
    False,
}

impl FType {
    /// Binding strength used when deciding on parentheses.
    pub fn precedence(self) -> u8 {
        match self {
            FType::Equiv => 1,
            FType::Impl => 2,
            FType::Or => 3,
            FType::And => 4,
            FType::Not => 5,
            FType::Literal | FType::True | FType::False => 6,
        }
    }

    pub fn is_constant(self) -> bool {
        matches!(self, FType::True | FType::False)
    }

    pub fn is_atomic(self) -> bool {
        matches!(self, FType::True | FType::False | FType::Literal)
    }
}

impl fmt::Display for FType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FType::Equiv => "EQUIV",
            FType::Impl => "IMPL",
            FType::Or => "OR",
            FType::And => "AND",
            FType::Not => "NOT",
            FType::Literal => "LITERAL",
            FType::True => "TRUE",
            FType::False => "FALSE",
        };
        write!(f, "{}", s)
    }
}

/// A node of the formula DAG.
///
/// Children are [`FormulaRef`] handles into the same factory. Nodes are
/// immutable once stored; n-ary operands live behind an `Rc` so that reading a
/// node out of the table is cheap.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash)]
pub enum Node {
    // The sentinel cell of the unique table holds a default node.
    #[default]
    False,
    True,
    Literal(Lit),
    Not(FormulaRef),
    Impl(FormulaRef, FormulaRef),
    Equiv(FormulaRef, FormulaRef),
    And(Rc<[FormulaRef]>),
    Or(Rc<[FormulaRef]>),
}

impl Node {
    pub fn kind(&self) -> FType {
        match self {
            Node::False => FType::False,
            Node::True => FType::True,
            Node::Literal(_) => FType::Literal,
            Node::Not(_) => FType::Not,
            Node::Impl(_, _) => FType::Impl,
            Node::Equiv(_, _) => FType::Equiv,
            Node::And(_) => FType::And,
            Node::Or(_) => FType::Or,
        }
    }

    /// Direct children of the node, in stored order.
    pub fn operands(&self) -> Vec<FormulaRef> {
        match self {
            Node::False | Node::True | Node::Literal(_) => Vec::new(),
            Node::Not(a) => vec![*a],
            Node::Impl(l, r) | Node::Equiv(l, r) => vec![*l, *r],
            Node::And(ops) | Node::Or(ops) => ops.to_vec(),
        }
    }
}

impl MyHash for FormulaRef {
    fn hash(&self) -> u64 {
        self.get() as u64
    }
}

impl MyHash for Lit {
    fn hash(&self) -> u64 {
        // Same mapping as AIGER literals: 2*v + sign.
        ((self.var().id() as u64) << 1) | self.is_negative() as u64
    }
}

impl MyHash for Node {
    fn hash(&self) -> u64 {
        match self {
            Node::False => 1,
            Node::True => 2,
            Node::Literal(lit) => pairing2(3, MyHash::hash(lit)),
            Node::Not(a) => pairing2(4, MyHash::hash(a)),
            Node::Impl(l, r) => pairing3(5, MyHash::hash(l), MyHash::hash(r)),
            Node::Equiv(l, r) => pairing3(6, MyHash::hash(l), MyHash::hash(r)),
            Node::And(ops) => pairing_many(7, ops.iter().map(MyHash::hash)),
            Node::Or(ops) => pairing_many(8, ops.iter().map(MyHash::hash)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Var;

    #[test]
    fn test_kind_precedence() {
        assert!(FType::Equiv.precedence() < FType::Impl.precedence());
        assert!(FType::Impl.precedence() < FType::Or.precedence());
        assert!(FType::Or.precedence() < FType::And.precedence());
        assert!(FType::And.precedence() < FType::Not.precedence());
        assert_eq!(FType::Literal.precedence(), FType::True.precedence());
    }

    #[test]
    fn test_operands() {
        let a = FormulaRef::new(3);
        let b = FormulaRef::new(4);
        assert!(Node::True.operands().is_empty());
        assert_eq!(Node::Not(a).operands(), vec![a]);
        assert_eq!(Node::Impl(a, b).operands(), vec![a, b]);
        assert_eq!(Node::Or(Rc::from(vec![b, a])).operands(), vec![b, a]);
    }

    #[test]
    fn test_hash_distinguishes_kinds() {
        let a = FormulaRef::new(3);
        let b = FormulaRef::new(4);
        let ops: Rc<[FormulaRef]> = Rc::from(vec![a, b]);
        assert_ne!(MyHash::hash(&Node::Impl(a, b)), MyHash::hash(&Node::Equiv(a, b)));
        assert_ne!(
            MyHash::hash(&Node::And(ops.clone())),
            MyHash::hash(&Node::Or(ops))
        );
        let x = Var::new(1);
        assert_ne!(
            MyHash::hash(&Node::Literal(x.pos())),
            MyHash::hash(&Node::Literal(x.neg()))
        );
    }
}
