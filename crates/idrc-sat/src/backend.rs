//! The [`SatBackend`] trait every solver invocation method implements.

use idrc_cnf::CnfBuilder;

use crate::error::SatResult;
use crate::outcome::SatOutcome;

/// A way of handing a CNF instance to a solver and getting back a model or
/// an unsatisfiability proof (§4.5, §6).
///
/// No concurrency contract: one invocation runs to completion per call; the
/// caller serializes successive calls.
pub trait SatBackend {
    /// Solve `cnf`, returning the outcome.
    fn solve(&self, cnf: &CnfBuilder) -> SatResult<SatOutcome>;

    /// The backend's name, as it would be looked up by [`crate::by_name`].
    fn name(&self) -> &str;
}
