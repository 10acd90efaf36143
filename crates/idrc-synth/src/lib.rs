//! Bounded-length reversible circuit synthesis as a CNF reduction.
//!
//! Given a target permutation and a gate budget `k`, [`encoding::build`]
//! produces a CNF instance whose satisfying models correspond exactly to
//! `k`-gate circuits (over the fixed {NOT, CNOT, CCNOT} library) realizing
//! the target; [`encoding::interpret`] decodes a model back into a
//! [`Circuit`]. This crate owns the reduction only — invoking a solver
//! backend is [`idrc_sat`]'s job, and iterating `k` to find a minimum-length
//! circuit is the orchestrator's (the seed generator uses a fixed budget,
//! per §4.4's "optimal variant" note).

pub mod encoding;
pub mod error;

pub use encoding::{build, interpret, synthesize_minimal, Encoding};
pub use error::{SynthError, SynthResult};

pub use idrc_ir::Circuit;
