//! Enumeration of candidate gates for a given width.
//!
//! Shared by the synthesis encoding (each candidate becomes one
//! gate-selector variable per time step, §4.4) and the unroller (sanity
//! checks during qubit relabeling, §4.6).

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::wire::Wire;

/// All valid `(kind, target, controls)` gates for a fixed width, in a fixed
/// enumeration order: every NOT, then every CNOT, then every CCNOT.
///
/// Sizes match §4.4 exactly: `w` NOTs, `w(w-1)` CNOTs, `w * C(w-1,2)`
/// CCNOTs.
#[derive(Debug, Clone)]
pub struct GateLibrary {
    width: u32,
    gates: Vec<Gate>,
}

impl GateLibrary {
    /// Enumerate the full candidate-gate library for `width`.
    pub fn for_width(width: u32) -> IrResult<Self> {
        if width == 0 {
            return Err(IrError::EncodingLimit(width));
        }
        let w = width as usize;
        let mut gates = Vec::with_capacity(w + w * (w - 1) + w * binom2(w.saturating_sub(1)));

        // NOT: one per target.
        for t in 0..w {
            gates.push(Gate::not(Wire::from(t)));
        }

        // CNOT: every ordered (control, target) pair with control != target.
        for t in 0..w {
            for c in 0..w {
                if c == t {
                    continue;
                }
                gates.push(Gate::cnot(Wire::from(c), Wire::from(t)).expect("control != target"));
            }
        }

        // CCNOT: every target with every unordered pair of controls among
        // the remaining wires.
        for t in 0..w {
            let others: Vec<usize> = (0..w).filter(|&x| x != t).collect();
            for i in 0..others.len() {
                for j in (i + 1)..others.len() {
                    gates.push(
                        Gate::ccnot(Wire::from(others[i]), Wire::from(others[j]), Wire::from(t))
                            .expect("controls != target and distinct"),
                    );
                }
            }
        }

        Ok(Self { width, gates })
    }

    /// The width this library was built for.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The candidate gates, in enumeration order.
    #[inline]
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// The number of candidate gates (`w + w(w-1) + w*C(w-1,2)`).
    #[inline]
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Whether the library is empty (never true for `width >= 1`).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}

fn binom2(n: usize) -> usize {
    if n < 2 { 0 } else { n * (n - 1) / 2 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_1_not_only() {
        // §8 boundary: w=1 allows NOT only.
        let lib = GateLibrary::for_width(1).unwrap();
        assert_eq!(lib.len(), 1);
    }

    #[test]
    fn test_width_2_no_ccnot_candidates() {
        // §8 boundary: w=2 has no CCNOT candidates.
        let lib = GateLibrary::for_width(2).unwrap();
        // 2 NOT + 2 CNOT + 0 CCNOT = 4
        assert_eq!(lib.len(), 4);
    }

    #[test]
    fn test_width_3_sizes() {
        let lib = GateLibrary::for_width(3).unwrap();
        // 3 NOT + 6 CNOT + 3 CCNOT = 12
        assert_eq!(lib.len(), 12);
    }

    #[test]
    fn test_zero_width_rejected() {
        assert!(GateLibrary::for_width(0).is_err());
    }
}
