//! Breadth-first enumeration of a representative circuit's equivalence
//! class under commutation swaps, rotation, reversal, and relabeling
//! (§4.6).

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tracing::{debug, instrument};

use idrc_ir::Circuit;

use crate::cancel::CancelToken;
use crate::error::{UnrollError, UnrollResult};
use crate::permutation::LexicographicPermutations;

/// The result of an `unroll` call: every distinct circuit reached (including
/// the seed representative itself) and whether the frontier fully drained.
#[derive(Debug, Clone)]
pub struct UnrollReport {
    /// Every distinct circuit reached, in discovery order. The first
    /// element is always the seed representative.
    pub circuits: Vec<Circuit>,
    /// `true` iff the BFS frontier drained on its own; `false` if it
    /// stopped early because of the equivalents bound or cancellation.
    pub fully_unrolled: bool,
}

/// Breadth-first exploration of `rep`'s equivalence class, bounded by
/// `max_equivalents` distinct circuits and a cooperative `cancel` token.
///
/// Moves are emitted in a fixed order — commutation swaps by ascending
/// position, rotations by ascending shift, reversal, then relabelings in
/// lexicographic order — so two calls over the same inputs always produce
/// the same `circuits` list (§4.6 "tie-breaks and ordering").
#[instrument(skip(rep, cancel), fields(width = rep.width(), len = rep.len(), max_equivalents))]
pub fn unroll(rep: &Circuit, max_equivalents: usize, cancel: &CancelToken) -> UnrollResult<UnrollReport> {
    for gate in rep.gates() {
        gate.validate(rep.width())
            .map_err(|e| UnrollError::InvalidCircuit(e.to_string()))?;
    }

    let mut seen: FxHashSet<Vec<u8>> = FxHashSet::default();
    let mut circuits = Vec::new();
    let mut frontier: VecDeque<Circuit> = VecDeque::new();

    seen.insert(rep.fingerprint());
    circuits.push(rep.clone());
    frontier.push_back(rep.clone());

    let mut fully_unrolled = true;
    let width = rep.width() as usize;

    'outer: loop {
        if circuits.len() >= max_equivalents {
            fully_unrolled = false;
            break;
        }
        if cancel.is_cancelled() {
            fully_unrolled = false;
            break;
        }
        let Some(current) = frontier.pop_front() else {
            break;
        };

        let n = current.len();

        // 1. Adjacent commutation swaps, ascending position.
        for i in 0..n.saturating_sub(1) {
            if current.commutes_at(i).unwrap_or(false) {
                let swapped = current.swap(i).expect("commutes_at(i) implies swap(i) succeeds");
                if !offer(&mut seen, &mut circuits, &mut frontier, swapped, max_equivalents) {
                    fully_unrolled = false;
                    break 'outer;
                }
            }
        }

        // 2. Cyclic rotations, ascending shift 1..n.
        for k in 1..n {
            let rotated = current.rotate(k);
            if !offer(&mut seen, &mut circuits, &mut frontier, rotated, max_equivalents) {
                fully_unrolled = false;
                break 'outer;
            }
        }

        // 3. Reversal.
        let reversed = current.reverse();
        if !offer(&mut seen, &mut circuits, &mut frontier, reversed, max_equivalents) {
            fully_unrolled = false;
            break 'outer;
        }

        // 4. Qubit relabelings, lexicographic order.
        for sigma in LexicographicPermutations::new(width) {
            let relabeled = current
                .relabel(&sigma)
                .expect("sigma has exactly width elements");
            if !offer(&mut seen, &mut circuits, &mut frontier, relabeled, max_equivalents) {
                fully_unrolled = false;
                break 'outer;
            }
        }
    }

    debug!(found = circuits.len(), fully_unrolled, "unroll finished");
    Ok(UnrollReport {
        circuits,
        fully_unrolled,
    })
}

/// Record `candidate` if its fingerprint is new, respecting `limit`.
/// Returns `false` when the caller should stop enumerating entirely because
/// the bound was reached.
fn offer(
    seen: &mut FxHashSet<Vec<u8>>,
    circuits: &mut Vec<Circuit>,
    frontier: &mut VecDeque<Circuit>,
    candidate: Circuit,
    limit: usize,
) -> bool {
    if circuits.len() >= limit {
        return false;
    }
    let fp = candidate.fingerprint();
    if seen.insert(fp) {
        circuits.push(candidate.clone());
        frontier.push_back(candidate);
    }
    circuits.len() < limit
}

#[cfg(test)]
mod tests {
    use super::*;
    use idrc_ir::{Gate, Wire};

    fn two_not_w2() -> Circuit {
        let mut c = Circuit::new(2);
        c.push(Gate::not(Wire(0))).unwrap();
        c.push(Gate::not(Wire(0))).unwrap();
        c
    }

    fn two_cnot_w2() -> Circuit {
        let mut c = Circuit::new(2);
        c.push(Gate::cnot(Wire(0), Wire(1)).unwrap()).unwrap();
        c.push(Gate::cnot(Wire(0), Wire(1)).unwrap()).unwrap();
        c
    }

    #[test]
    fn test_scenario_s1_two_not_relabeling() {
        let rep = two_not_w2();
        let report = unroll(&rep, usize::MAX, &CancelToken::new()).unwrap();
        assert!(report.fully_unrolled);
        assert_eq!(report.circuits.len(), 2);
        for c in &report.circuits {
            assert!(c.simulate().unwrap().is_identity());
            assert_eq!(c.composition(), (2, 0, 0));
        }
    }

    #[test]
    fn test_scenario_s2_two_cnot() {
        let rep = two_cnot_w2();
        let report = unroll(&rep, usize::MAX, &CancelToken::new()).unwrap();
        assert!(report.fully_unrolled);
        assert_eq!(report.circuits.len(), 2);
        for c in &report.circuits {
            assert!(c.simulate().unwrap().is_identity());
            assert_eq!(c.composition(), (0, 2, 0));
        }
    }

    #[test]
    fn test_empty_circuit_unrolls_to_itself_only() {
        let rep = Circuit::new(3);
        let report = unroll(&rep, 10, &CancelToken::new()).unwrap();
        assert!(report.fully_unrolled);
        assert_eq!(report.circuits.len(), 1);
        assert!(report.circuits[0].is_empty());
    }

    #[test]
    fn test_bound_truncates_and_reports_not_fully_unrolled() {
        let rep = two_not_w2();
        let report = unroll(&rep, 1, &CancelToken::new()).unwrap();
        assert!(!report.fully_unrolled);
        assert_eq!(report.circuits.len(), 1);
    }

    #[test]
    fn test_cancellation_stops_the_bfs() {
        let rep = two_not_w2();
        let token = CancelToken::new();
        token.cancel();
        let report = unroll(&rep, usize::MAX, &token).unwrap();
        assert!(!report.fully_unrolled);
        assert_eq!(report.circuits.len(), 1);
    }

    #[test]
    fn test_every_equivalent_shares_dimension_and_identity() {
        let rep = two_cnot_w2();
        let report = unroll(&rep, usize::MAX, &CancelToken::new()).unwrap();
        for c in &report.circuits {
            assert_eq!(c.width(), rep.width());
            assert_eq!(c.len(), rep.len());
            assert!(c.simulate().unwrap().is_identity());
        }
    }

    #[test]
    fn test_deterministic_across_runs() {
        let rep = two_cnot_w2();
        let a = unroll(&rep, usize::MAX, &CancelToken::new()).unwrap();
        let b = unroll(&rep, usize::MAX, &CancelToken::new()).unwrap();
        let fps_a: Vec<_> = a.circuits.iter().map(|c| c.fingerprint()).collect();
        let fps_b: Vec<_> = b.circuits.iter().map(|c| c.fingerprint()).collect();
        assert_eq!(fps_a, fps_b);
    }
}
