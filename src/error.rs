use thiserror::Error;

use crate::reference::FormulaRef;
use crate::types::Var;

/// Errors raised by the formula factory.
///
/// Transformations never create errors of their own; whatever the factory
/// reports is handed back to the caller as is.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FormulaError {
    /// The handle does not belong to this factory.
    #[error("formula {0} is not known to this factory")]
    UnknownFormula(FormulaRef),

    /// An assignment was built from literals that assign both phases of a variable.
    #[error("variable {0} is assigned both true and false")]
    ContradictoryAssignment(Var),

    /// Evaluation reached a variable the assignment does not cover.
    #[error("variable {0} is not assigned")]
    Unassigned(Var),
}

pub type Result<T> = std::result::Result<T, FormulaError>;
