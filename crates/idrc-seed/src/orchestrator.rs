//! Top-level external interfaces tying synthesis, SAT, unrolling, and the
//! catalog into the seed-generation pipeline (§6).
//!
//! The pipeline per attempt: draw a random forward circuit `F`; encode "does
//! a `k`-gate circuit realize `F`'s inverse permutation" and hand the CNF to
//! the named SAT backend; on `Unsatisfiable`, retry with a fresh `F` (§7);
//! on a model, decode the inverse `B`, verify `F ++ B` simulates to the
//! identity, catalog it, unroll its equivalence class, and fold the
//! unrolled circuits back into the catalog.

use rand::Rng;
use tracing::{info, instrument, warn};

use idrc_catalog::{Catalog, CatalogStore, FoldStats, RepresentativeId};
use idrc_ir::{Circuit, TruthTable};
use idrc_unroll::{unroll as bfs_unroll, CancelToken, UnrollReport};

use crate::config::{SeedConfig, UnrollConfig};
use crate::error::{SeedError, SeedResult};
use crate::generator::RandomCircuitGenerator;

/// Simulate a circuit to its exact permutation (§6 `simulate`).
pub fn simulate(circuit: &Circuit) -> SeedResult<TruthTable> {
    Ok(circuit.simulate()?)
}

/// Synthesize a `k`-gate circuit realizing `target`, via CNF reduction and
/// the named SAT backend (§6 `synthesize`).
///
/// Returns [`SeedError::Unsat`] if no such circuit exists.
#[instrument(skip(target), fields(width, k, backend = backend_name))]
pub fn synthesize(width: u32, target: &TruthTable, k: usize, backend_name: &str) -> SeedResult<Circuit> {
    let (cnf, encoding) = idrc_synth::build(width, target, k)?;
    let backend = idrc_sat::by_name(backend_name);
    match backend.solve(&cnf)? {
        idrc_sat::SatOutcome::Unsatisfiable => Err(SeedError::Unsat { k }),
        idrc_sat::SatOutcome::Satisfiable { model } => Ok(idrc_synth::interpret(&encoding, &model)?),
    }
}

/// Find a minimum-length circuit realizing `target` by iterating the gate
/// budget `k = 0, 1, ..., max_k` against the named SAT backend, returning
/// the first satisfiable result (§4.4 "Optimal variant"). The seed pipeline
/// itself never calls this — it is a fixed-budget-only consumer of
/// [`synthesize`] — but it is exposed for callers who want a minimal
/// circuit rather than any circuit within a budget.
#[instrument(skip(target), fields(width, max_k, backend = backend_name))]
pub fn synthesize_minimal(width: u32, target: &TruthTable, max_k: usize, backend_name: &str) -> SeedResult<Circuit> {
    let backend = idrc_sat::by_name(backend_name);
    let circuit = idrc_synth::synthesize_minimal(width, target, max_k, |cnf| {
        let outcome = backend
            .solve(cnf)
            .map_err(|e| idrc_synth::SynthError::Backend(e.to_string()))?;
        Ok(outcome.model().map(<[bool]>::to_vec))
    })?;
    Ok(circuit)
}

/// Enumerate a representative's equivalence class (§6 `unroll`).
pub fn unroll(rep: &Circuit, cfg: UnrollConfig, cancel: &CancelToken) -> SeedResult<UnrollReport> {
    Ok(bfs_unroll(rep, cfg.max_equivalents(), cancel)?)
}

/// The outcome of a single successful seed: the identity circuit `F ++ B`,
/// cataloged and fully folded with its equivalence class.
#[derive(Debug, Clone)]
pub struct SeedOutcome {
    /// The catalog id of the seed's representative circuit.
    pub representative_id: RepresentativeId,
    /// The composed identity circuit `F ++ B`.
    pub identity: Circuit,
    /// Statistics from folding the unrolled equivalence class.
    pub fold_stats: FoldStats,
    /// Whether the equivalence class was enumerated to completion.
    pub fully_unrolled: bool,
    /// Number of forward-circuit draws this seed took.
    pub attempts: usize,
}

/// Run one draw-synthesize-verify attempt, returning `Ok(None)` on
/// [`SeedError::Unsat`] so the caller can retry with a fresh draw, and
/// propagating every other error as terminal (§7).
fn try_one_attempt(cfg: &SeedConfig, rng: &mut impl Rng) -> SeedResult<Option<Circuit>> {
    let generator = RandomCircuitGenerator::new(cfg.width())?;
    let forward = generator.generate(cfg.forward_length(), rng);
    let target = forward.simulate()?.inverse();

    match synthesize(cfg.width(), &target, cfg.inverse_budget(), cfg.sat_backend()) {
        Ok(inverse) => {
            let identity_gates: Vec<_> = forward
                .gates()
                .iter()
                .chain(inverse.gates())
                .cloned()
                .collect();
            let identity = Circuit::from_gates(cfg.width(), identity_gates)?;
            debug_assert!(identity.simulate()?.is_identity());
            Ok(Some(identity))
        }
        Err(SeedError::Unsat { k }) => {
            warn!(k, "no inverse at this budget, retrying with a fresh forward circuit");
            Ok(None)
        }
        Err(other) => Err(other),
    }
}

/// Run the full seed pipeline: draw forward circuits until one has a
/// synthesizable inverse (up to `cfg.max_attempts()`), catalog the
/// resulting identity, unroll its equivalence class, and fold the
/// unrolled circuits back in.
#[instrument(skip(cfg, catalog, rng, cancel), fields(width = cfg.width()))]
pub fn run_seed<S: CatalogStore>(
    cfg: &SeedConfig,
    unroll_cfg: UnrollConfig,
    catalog: &Catalog<S>,
    rng: &mut impl Rng,
    cancel: &CancelToken,
) -> SeedResult<SeedOutcome> {
    let mut attempts = 0;
    let identity = loop {
        attempts += 1;
        if let Some(identity) = try_one_attempt(cfg, rng)? {
            break identity;
        }
        if attempts >= cfg.max_attempts() {
            return Err(SeedError::RetriesExhausted { attempts });
        }
    };

    let (circuit_id, _was_new) = catalog.insert_identity(&identity)?;
    let rep = catalog
        .store()
        .find_representative_by_circuit(circuit_id)?
        .ok_or(idrc_catalog::CatalogError::UnknownRepresentative(0))?;

    let report = unroll(&identity, unroll_cfg, cancel)?;
    let fold_stats = catalog.fold_equivalents(rep.id, &report.circuits, report.fully_unrolled)?;

    info!(
        attempts,
        inserted = fold_stats.inserted,
        duplicates = fold_stats.duplicates,
        demoted = fold_stats.demoted,
        "seed complete"
    );

    Ok(SeedOutcome {
        representative_id: rep.id,
        identity,
        fold_stats,
        fully_unrolled: report.fully_unrolled,
        attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use idrc_catalog::SqliteCatalogStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_run_seed_produces_a_cataloged_identity() {
        let catalog = Catalog::new(SqliteCatalogStore::in_memory().unwrap());
        let cfg = SeedConfig::new(2, 3, 4).with_max_attempts(16);
        let mut rng = StdRng::seed_from_u64(123);
        let cancel = CancelToken::new();

        let outcome = run_seed(&cfg, UnrollConfig::default(), &catalog, &mut rng, &cancel).unwrap();
        assert!(outcome.identity.simulate().unwrap().is_identity());
        let rep = catalog
            .store()
            .get_representative(outcome.representative_id)
            .unwrap()
            .expect("representative was just inserted");
        assert!(rep.fully_unrolled == outcome.fully_unrolled);
    }

    #[test]
    fn test_synthesize_minimal_finds_smallest_inverse() {
        let mut target = idrc_ir::TruthTable::identity(1).unwrap();
        target.apply_gate(&idrc_ir::Gate::not(idrc_ir::Wire(0))).unwrap();
        let circuit = synthesize_minimal(1, &target, 3, "cadical").unwrap();
        assert_eq!(circuit.len(), 1);
        assert_eq!(circuit.simulate().unwrap(), target);
    }

    #[test]
    fn test_simulate_matches_circuit_simulate() {
        let mut c = Circuit::new(1);
        c.push(idrc_ir::Gate::not(idrc_ir::Wire(0))).unwrap();
        c.push(idrc_ir::Gate::not(idrc_ir::Wire(0))).unwrap();
        assert!(simulate(&c).unwrap().is_identity());
    }
}
