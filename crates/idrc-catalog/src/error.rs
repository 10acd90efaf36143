//! Error types for catalog storage and folding.

use thiserror::Error;

/// Errors raised by catalog operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// `insert_identity` was called with a circuit whose simulated
    /// permutation is not the identity (I1).
    #[error("circuit does not simulate to the identity permutation")]
    NotIdentity,

    /// `fold_equivalents` referenced a representative id the store has no
    /// record of.
    #[error("unknown representative id {0}")]
    UnknownRepresentative(u64),

    /// The underlying circuit algebra rejected a structural operation
    /// (wire out of bounds, width mismatch, …).
    #[error("invalid circuit: {0}")]
    InvalidCircuit(#[from] idrc_ir::IrError),

    /// JSON (de)serialization of a stored record failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// SQLite backend error.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// I/O error reading or writing the JSON store's files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
