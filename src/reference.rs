use std::fmt::{Display, Formatter};

/// Handle to a formula node stored in a [`FormulaFactory`][crate::factory::FormulaFactory].
///
/// Handles are only meaningful together with the factory that produced them.
/// Because the factory hash-conses every node, two handles from the same
/// factory are equal iff the formulas are structurally equal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FormulaRef(u32);

impl FormulaRef {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Return the index of the node in the factory table.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Return the internal representation of the reference.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Display for FormulaRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}
