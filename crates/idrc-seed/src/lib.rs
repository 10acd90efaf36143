//! Orchestrates random forward-circuit generation, SAT-backed inverse
//! synthesis, catalog insertion, and equivalence-class unrolling into the
//! end-to-end seed-generation pipeline (§6).

pub mod config;
pub mod error;
pub mod generator;
pub mod orchestrator;

pub use config::{SeedConfig, UnrollConfig};
pub use error::{SeedError, SeedResult};
pub use generator::RandomCircuitGenerator;
pub use orchestrator::{run_seed, simulate, synthesize, synthesize_minimal, unroll, SeedOutcome};
