//! Error types for SAT backend invocation.

use thiserror::Error;

/// Errors raised while invoking a SAT backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SatError {
    /// The named backend is not one this driver knows how to invoke.
    #[error("unknown SAT backend: {0}")]
    UnknownBackend(String),

    /// The underlying in-process solver library returned an error.
    #[error("solver error: {0}")]
    SolverFailure(String),

    /// An external solver process could not be spawned, or its output
    /// could not be parsed as a DIMACS solution.
    #[error("external solver {backend} failed: {message}")]
    ExternalSolverFailure {
        /// The backend binary name that was invoked.
        backend: String,
        /// A human-readable description of the failure.
        message: String,
    },

    /// I/O error writing the DIMACS instance or reading the solver's
    /// output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for SAT backend operations.
pub type SatResult<T> = Result<T, SatError>;
