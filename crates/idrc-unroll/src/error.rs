//! Error types for equivalence-class unrolling.

use thiserror::Error;

/// Errors raised while unrolling a representative circuit's equivalence
/// class.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum UnrollError {
    /// The seed circuit references a wire outside `[0, width)`, or some
    /// other structural defect that must be caught before BFS starts
    /// (§4.6: "rejected up front with `InvalidCircuit`").
    #[error("invalid seed circuit: {0}")]
    InvalidCircuit(String),
}

/// Result type for unroll operations.
pub type UnrollResult<T> = Result<T, UnrollError>;
