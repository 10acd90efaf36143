//! Error types for the synthesis encoding.

use thiserror::Error;

/// Errors raised while building or interpreting a synthesis encoding.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum SynthError {
    /// `width` or the resulting row count exceeds what this encoder
    /// supports (`2^width` rows, one state variable per row per bit per
    /// time step).
    #[error("width {width} with budget {k} exceeds the encoder's supported range")]
    EncodingLimit {
        /// The requested circuit width.
        width: u32,
        /// The requested gate budget.
        k: usize,
    },

    /// The target permutation's width does not match the requested circuit
    /// width.
    #[error("target truth table has width {target_width}, expected {width}")]
    WidthMismatch {
        /// The circuit width the encoding was built for.
        width: u32,
        /// The target truth table's actual width.
        target_width: u32,
    },

    /// A model did not assign exactly one true selector at some time step;
    /// the backend returned a malformed model or the caller passed in a
    /// model for the wrong encoding.
    #[error("time step {0} has no single true gate selector in the model")]
    MalformedModel(usize),

    /// Synthesis is provably impossible within the given gate budget.
    #[error("no {k}-gate circuit realizes the target permutation")]
    Unsat {
        /// The gate budget that was exhausted.
        k: usize,
    },

    /// A caller-supplied `solve` closure (see [`crate::synthesize_minimal`])
    /// failed. This crate does not depend on a solver crate itself, so the
    /// underlying error is flattened to its display string at this
    /// boundary.
    #[error("solver invocation failed: {0}")]
    Backend(String),
}

/// Result type for synthesis-encoding operations.
pub type SynthResult<T> = Result<T, SynthError>;
