//! Error types for CNF construction.

use thiserror::Error;

/// Errors raised while building or interpreting a CNF instance.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum CnfError {
    /// A variable index was used that this builder never allocated.
    #[error("variable {0} was never allocated by this builder")]
    UnknownVariable(u32),

    /// `at_most_k` or `exactly_one` was called with an empty variable list.
    #[error("cardinality constraint requires at least one variable")]
    EmptyVarList,

    /// A model did not assign a value for a requested variable.
    #[error("model has no assignment for variable {0}")]
    MissingAssignment(u32),
}

/// Result type for CNF operations.
pub type CnfResult<T> = Result<T, CnfError>;
