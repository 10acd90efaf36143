//! In-process solver backends via the `rustsat` ecosystem.

use rustsat::instances::Cnf as RustSatCnf;
use rustsat::solvers::{Solve, SolverResult};
use rustsat::types::{Clause as RustSatClause, Lit as RustSatLit, TernaryVal};
use rustsat_cadical::CaDiCaL;
use rustsat_minisat::core::Minisat;
use tracing::{debug, instrument};

use idrc_cnf::CnfBuilder;

use crate::backend::SatBackend;
use crate::error::{SatError, SatResult};
use crate::outcome::SatOutcome;

/// Which in-process `rustsat` solver to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InProcessKind {
    /// MiniSat, via `rustsat-minisat`.
    Minisat,
    /// CaDiCaL, via `rustsat-cadical`.
    Cadical,
}

impl InProcessKind {
    /// The backend name used for lookup (§6: chosen by name).
    pub fn name(self) -> &'static str {
        match self {
            InProcessKind::Minisat => "minisat",
            InProcessKind::Cadical => "cadical",
        }
    }
}

/// A [`SatBackend`] that links a solver directly into this process rather
/// than shelling out to a binary.
#[derive(Debug, Clone, Copy)]
pub struct InProcessBackend {
    kind: InProcessKind,
}

impl InProcessBackend {
    /// Build a backend driving the given in-process solver.
    pub fn new(kind: InProcessKind) -> Self {
        Self { kind }
    }
}

fn to_rustsat_clause(clause: &[idrc_cnf::Lit]) -> RustSatClause {
    clause
        .iter()
        .map(|l| {
            RustSatLit::new(l.var().index() - 1, !l.is_positive())
        })
        .collect()
}

fn build_cnf(cnf: &CnfBuilder) -> RustSatCnf {
    let mut out = RustSatCnf::new();
    for clause in cnf.clauses() {
        out.add_clause(to_rustsat_clause(clause));
    }
    out
}

fn run_solver<S: Solve + Default>(cnf: &CnfBuilder, backend_name: &str) -> SatResult<SatOutcome> {
    let mut solver = S::default();
    solver
        .add_cnf(build_cnf(cnf))
        .map_err(|e| SatError::SolverFailure(e.to_string()))?;
    let result = solver
        .solve()
        .map_err(|e| SatError::SolverFailure(e.to_string()))?;
    match result {
        SolverResult::Unsat => Ok(SatOutcome::Unsatisfiable),
        SolverResult::Sat => {
            let num_vars = cnf.num_vars();
            let mut model = Vec::with_capacity(num_vars as usize);
            for idx in 0..num_vars {
                let lit = RustSatLit::new(idx, false);
                let val = solver
                    .lit_val(lit)
                    .map_err(|e| SatError::SolverFailure(e.to_string()))?;
                model.push(matches!(val, TernaryVal::True));
            }
            Ok(SatOutcome::Satisfiable { model })
        }
        SolverResult::Interrupted => Err(SatError::SolverFailure(format!(
            "{backend_name} was interrupted before reaching a verdict"
        ))),
    }
}

impl SatBackend for InProcessBackend {
    #[instrument(skip(self, cnf), fields(backend = self.name(), vars = cnf.num_vars(), clauses = cnf.num_clauses()))]
    fn solve(&self, cnf: &CnfBuilder) -> SatResult<SatOutcome> {
        debug!("dispatching to in-process solver");
        match self.kind {
            InProcessKind::Minisat => run_solver::<Minisat>(cnf, self.name()),
            InProcessKind::Cadical => run_solver::<CaDiCaL>(cnf, self.name()),
        }
    }

    fn name(&self) -> &str {
        self.kind.name()
    }
}
