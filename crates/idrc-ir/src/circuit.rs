//! Ordered gate sequences and their structural edits.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, GateKind};
use crate::truth_table::TruthTable;

/// The unordered tally `(#NOT, #CNOT, #CCNOT)` of a circuit.
pub type Composition = (usize, usize, usize);

/// An ordered, finite sequence of gates over a fixed number of wires.
///
/// Circuits are created by the seed generator or the unroller and are never
/// mutated in place once shared: every structural edit (`slice`, `reverse`,
/// `rotate`, `relabel`, `swap`) returns a new `Circuit` (§3 Lifecycle).
/// `push`/`pop` are the exception, used only while a circuit is still being
/// built by its sole owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    width: u32,
    gates: Vec<Gate>,
}

impl Circuit {
    /// An empty circuit over `width` wires.
    pub fn new(width: u32) -> Self {
        Self {
            width,
            gates: Vec::new(),
        }
    }

    /// Build a circuit from a width and a pre-validated gate sequence.
    pub fn from_gates(width: u32, gates: Vec<Gate>) -> IrResult<Self> {
        for g in &gates {
            g.validate(width)?;
        }
        Ok(Self { width, gates })
    }

    /// The number of wires.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The number of gates (the circuit's "length" `n`, §3).
    #[inline]
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Whether this circuit has no gates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// The gate sequence, in order.
    #[inline]
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Append a gate, validating it against this circuit's width.
    pub fn push(&mut self, gate: Gate) -> IrResult<()> {
        gate.validate(self.width)?;
        self.gates.push(gate);
        Ok(())
    }

    /// Remove and return the last gate.
    pub fn pop(&mut self) -> Option<Gate> {
        self.gates.pop()
    }

    /// A new circuit containing gates `[i, j)`.
    pub fn slice(&self, i: usize, j: usize) -> IrResult<Circuit> {
        if i > j || j > self.gates.len() {
            return Err(IrError::PositionOutOfRange {
                pos: j,
                len: self.gates.len(),
            });
        }
        Ok(Circuit {
            width: self.width,
            gates: self.gates[i..j].to_vec(),
        })
    }

    /// A new circuit with the gate order reversed.
    ///
    /// For the {NOT, CNOT, CCNOT} library every gate is self-inverse, so
    /// reversing the order (without inverting any individual gate) already
    /// produces the inverse circuit (§8 invariant 4, §4.6 move 3).
    pub fn reverse(&self) -> Circuit {
        let mut gates = self.gates.clone();
        gates.reverse();
        Circuit {
            width: self.width,
            gates,
        }
    }

    /// A new circuit cyclically shifted by `k` positions: gate at position
    /// `i` moves to position `(i + gates.len() - k) % gates.len()`, i.e. the
    /// first `k` gates move to the end.
    ///
    /// Valid for any `k`; `k` is taken modulo the circuit length so callers
    /// need not pre-reduce it. Rationale (§4.6 move 2): conjugating an
    /// identity circuit by any prefix preserves identity semantics, because
    /// `simulate(C) = I` implies the prefix and its complement are mutual
    /// inverses.
    pub fn rotate(&self, k: usize) -> Circuit {
        if self.gates.is_empty() {
            return self.clone();
        }
        let k = k % self.gates.len();
        let mut gates = self.gates[k..].to_vec();
        gates.extend_from_slice(&self.gates[..k]);
        Circuit {
            width: self.width,
            gates,
        }
    }

    /// A new circuit with every wire relabeled through the permutation
    /// `sigma` (`sigma[i]` is the new index of wire `i`).
    pub fn relabel(&self, sigma: &[usize]) -> IrResult<Circuit> {
        if sigma.len() != self.width as usize {
            return Err(IrError::WidthMismatch {
                left: self.width,
                right: sigma.len() as u32,
            });
        }
        let gates = self.gates.iter().map(|g| g.relabel(sigma)).collect();
        Ok(Circuit {
            width: self.width,
            gates,
        })
    }

    /// Whether the adjacent gates at positions `i, i+1` commute (§4.2).
    pub fn commutes_at(&self, i: usize) -> IrResult<bool> {
        if i + 1 >= self.gates.len() {
            return Err(IrError::PositionOutOfRange {
                pos: i,
                len: self.gates.len(),
            });
        }
        Ok(self.gates[i].commutes_with(&self.gates[i + 1]))
    }

    /// A new circuit with the adjacent gates at `i, i+1` exchanged, if they
    /// commute. Fails with [`IrError::NonCommuting`] otherwise.
    pub fn swap(&self, i: usize) -> IrResult<Circuit> {
        if !self.commutes_at(i)? {
            return Err(IrError::NonCommuting(i, i + 1));
        }
        let mut gates = self.gates.clone();
        gates.swap(i, i + 1);
        Ok(Circuit {
            width: self.width,
            gates,
        })
    }

    /// Simulate this circuit exactly: the permutation of `{0,1}^w` obtained
    /// by applying gates left to right to every input (§3).
    pub fn simulate(&self) -> IrResult<TruthTable> {
        let mut table = TruthTable::identity(self.width)?;
        for g in &self.gates {
            table.apply_gate(g)?;
        }
        Ok(table)
    }

    /// The unordered gate-kind tally `(#NOT, #CNOT, #CCNOT)`.
    pub fn composition(&self) -> Composition {
        let mut c = (0, 0, 0);
        for g in &self.gates {
            match g.kind() {
                GateKind::Not => c.0 += 1,
                GateKind::Cnot => c.1 += 1,
                GateKind::Ccnot => c.2 += 1,
            }
        }
        c
    }

    /// The canonical byte serialization of the gate sequence: a structural
    /// fingerprint such that two circuits have equal fingerprints iff they
    /// are structurally identical (§3). Width is included so that two empty
    /// circuits of different widths are never confused.
    pub fn fingerprint(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(4 + self.gates.len() * 9);
        buf.extend_from_slice(&self.width.to_le_bytes());
        for g in &self.gates {
            g.write_fingerprint(&mut buf);
        }
        buf
    }
}
