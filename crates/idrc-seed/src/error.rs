//! Error types for the seed-generation orchestrator.

use thiserror::Error;

/// Errors raised while drawing a random forward circuit, synthesizing its
/// inverse, or folding the result into a catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SeedError {
    /// Synthesis of the inverse circuit failed (encoding or CNF issue).
    #[error("synthesis error: {0}")]
    Synth(#[from] idrc_synth::SynthError),

    /// The SAT backend could not produce or reject a model.
    #[error("SAT backend error: {0}")]
    Sat(#[from] idrc_sat::SatError),

    /// Unrolling the resulting identity's equivalence class failed.
    #[error("unroll error: {0}")]
    Unroll(#[from] idrc_unroll::UnrollError),

    /// Cataloging the resulting identity failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] idrc_catalog::CatalogError),

    /// The circuit algebra rejected a structural operation.
    #[error("invalid circuit: {0}")]
    Ir(#[from] idrc_ir::IrError),

    /// No `k`-gate circuit realizes the target permutation; the
    /// orchestrator retries seed generation with a fresh forward circuit on
    /// this error (§7).
    #[error("no {k}-gate inverse exists for the drawn forward circuit")]
    Unsat {
        /// The gate budget that was exhausted.
        k: usize,
    },

    /// Every retry attempt was exhausted without finding a synthesizable
    /// inverse.
    #[error("exhausted {attempts} seed-generation attempts without a synthesizable inverse")]
    RetriesExhausted {
        /// Number of attempts made.
        attempts: usize,
    },
}

/// Result type for seed-generation operations.
pub type SeedResult<T> = Result<T, SeedError>;
