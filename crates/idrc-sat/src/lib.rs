//! Invoking SAT backends and decoding their models (§4.5, §6).
//!
//! Two families of [`SatBackend`] are provided: [`InProcessBackend`] links a
//! `rustsat` solver directly into this process, and [`ExternalProcessBackend`]
//! shells out to a named binary on `PATH`, speaking DIMACS both ways. Named
//! lookup (`"minisat"`, `"glucose"`, `"cadical"`) goes through [`by_name`],
//! matching §6's "the concrete backend is chosen by name" interface.

pub mod backend;
pub mod error;
pub mod external;
pub mod in_process;
pub mod outcome;

pub use backend::SatBackend;
pub use error::{SatError, SatResult};
pub use external::ExternalProcessBackend;
pub use in_process::{InProcessBackend, InProcessKind};
pub use outcome::SatOutcome;

/// Resolve a backend by name (§6: `minisat`, `glucose`, `cadical`).
///
/// `minisat` and `cadical` dispatch to the in-process `rustsat` bindings;
/// any other name (including `glucose`, which has no in-process Rust
/// binding in this stack) falls back to an external-process invocation of
/// a same-named binary on `PATH`.
pub fn by_name(name: &str) -> Box<dyn SatBackend> {
    match name {
        "minisat" => Box::new(InProcessBackend::new(InProcessKind::Minisat)),
        "cadical" => Box::new(InProcessBackend::new(InProcessKind::Cadical)),
        other => Box::new(ExternalProcessBackend::new(other.to_string())),
    }
}
