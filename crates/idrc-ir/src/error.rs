//! Error types for the reversible-circuit algebra.

use thiserror::Error;

/// Errors raised by circuit construction, simulation, and structural edits.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum IrError {
    /// A gate references a wire outside `[0, width)`.
    #[error("wire {wire} out of bounds for width {width}")]
    WireOutOfBounds {
        /// The offending wire index.
        wire: u32,
        /// The circuit width.
        width: u32,
    },

    /// A gate's target coincides with one of its controls, or a control
    /// repeats within the same gate.
    #[error("gate repeats wire {0} between target and controls")]
    RepeatedWire(u32),

    /// A gate's control count does not match its kind (0 for NOT, 1 for
    /// CNOT, 2 for CCNOT).
    #[error("gate kind {kind} requires {expected} controls, got {got}")]
    ControlCountMismatch {
        /// Name of the gate kind.
        kind: &'static str,
        /// Expected number of controls.
        expected: usize,
        /// Actual number of controls supplied.
        got: usize,
    },

    /// Two circuits of different width cannot be compared or concatenated.
    #[error("width mismatch: {left} vs {right}")]
    WidthMismatch {
        /// Width of the left-hand operand.
        left: u32,
        /// Width of the right-hand operand.
        right: u32,
    },

    /// `swap(i)` was requested at a position where the adjacent gates do not
    /// commute.
    #[error("gates at positions {0} and {1} do not commute")]
    NonCommuting(usize, usize),

    /// A position index (for `slice`, `swap`, `pop`, …) is out of range.
    #[error("position {pos} out of range for circuit of length {len}")]
    PositionOutOfRange {
        /// The offending position.
        pos: usize,
        /// The circuit length.
        len: usize,
    },

    /// The requested width or gate budget exceeds what a truth-table or CNF
    /// encoder can represent (`2^w` would overflow, or `w` is zero).
    #[error("width {0} exceeds the encoder's supported range")]
    EncodingLimit(u32),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
