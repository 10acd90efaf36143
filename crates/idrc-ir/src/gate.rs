//! Gate types: NOT, CNOT, CCNOT over a fixed set of wires.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::wire::Wire;

/// The kind of a reversible gate, tagged by its control arity.
///
/// A sum type over pattern matches keeps simulation and commutation total:
/// there is no open hierarchy to extend, only these three shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    /// Single-target NOT. Zero controls.
    Not,
    /// Controlled-NOT. One control.
    Cnot,
    /// Doubly-controlled NOT (Toffoli). Two controls.
    Ccnot,
}

impl GateKind {
    /// Number of controls this kind requires.
    #[inline]
    pub fn num_controls(self) -> usize {
        match self {
            GateKind::Not => 0,
            GateKind::Cnot => 1,
            GateKind::Ccnot => 2,
        }
    }

    /// Short name used in fingerprints and display.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            GateKind::Not => "not",
            GateKind::Cnot => "cnot",
            GateKind::Ccnot => "ccnot",
        }
    }

    /// The tag byte used in the canonical fingerprint encoding.
    #[inline]
    pub(crate) fn tag(self) -> u8 {
        match self {
            GateKind::Not => 0,
            GateKind::Cnot => 1,
            GateKind::Ccnot => 2,
        }
    }
}

/// A single reversible gate: a kind, a target wire, and a sorted set of
/// control wires disjoint from the target.
///
/// Controls are normalized to sorted order at construction so that
/// fingerprinting (which assumes canonical form) never needs to re-sort.
/// Every gate is its own inverse (§8, invariant 1): flipping the target bit
/// twice under the same control pattern is the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gate {
    kind: GateKind,
    target: Wire,
    controls: Vec<Wire>,
}

impl Gate {
    /// Build a gate from a kind, target, and unsorted controls, validating
    /// control arity and disjointness from the target.
    pub fn new(kind: GateKind, target: Wire, mut controls: Vec<Wire>) -> IrResult<Self> {
        if controls.len() != kind.num_controls() {
            return Err(IrError::ControlCountMismatch {
                kind: kind.name(),
                expected: kind.num_controls(),
                got: controls.len(),
            });
        }
        controls.sort_unstable();
        controls.dedup();
        if controls.len() != kind.num_controls() {
            return Err(IrError::RepeatedWire(target.0));
        }
        if controls.contains(&target) {
            return Err(IrError::RepeatedWire(target.0));
        }
        Ok(Self {
            kind,
            target,
            controls,
        })
    }

    /// A single-target NOT gate.
    pub fn not(target: Wire) -> Self {
        Self {
            kind: GateKind::Not,
            target,
            controls: Vec::new(),
        }
    }

    /// A controlled-NOT gate. Panics (via `new`) only on `control == target`,
    /// which cannot happen through this constructor's type, so this never
    /// fails in practice; kept fallible for uniformity with `ccnot`.
    pub fn cnot(control: Wire, target: Wire) -> IrResult<Self> {
        Self::new(GateKind::Cnot, target, vec![control])
    }

    /// A Toffoli (CCNOT) gate.
    pub fn ccnot(c1: Wire, c2: Wire, target: Wire) -> IrResult<Self> {
        Self::new(GateKind::Ccnot, target, vec![c1, c2])
    }

    /// The gate's kind.
    #[inline]
    pub fn kind(&self) -> GateKind {
        self.kind
    }

    /// The gate's target wire.
    #[inline]
    pub fn target(&self) -> Wire {
        self.target
    }

    /// The gate's controls, sorted ascending.
    #[inline]
    pub fn controls(&self) -> &[Wire] {
        &self.controls
    }

    /// Validate that every wire referenced by this gate is within
    /// `[0, width)`.
    pub fn validate(&self, width: u32) -> IrResult<()> {
        if self.target.0 >= width {
            return Err(IrError::WireOutOfBounds {
                wire: self.target.0,
                width,
            });
        }
        for &c in &self.controls {
            if c.0 >= width {
                return Err(IrError::WireOutOfBounds { wire: c.0, width });
            }
        }
        Ok(())
    }

    /// Whether every control bit of `state` is set (i.e. whether this gate
    /// fires on `state`).
    #[inline]
    pub fn fires_on(&self, state: usize) -> bool {
        self.controls
            .iter()
            .all(|c| (state >> c.index()) & 1 == 1)
    }

    /// Apply this gate to `state` (a bit-packed row of `{0,1}^w`), returning
    /// the resulting state. Flips the target bit iff `fires_on(state)`.
    #[inline]
    pub fn apply(&self, state: usize) -> usize {
        if self.fires_on(state) {
            state ^ (1 << self.target.index())
        } else {
            state
        }
    }

    /// Relabel every wire this gate references through the permutation `sigma`
    /// (`sigma[i]` is the new index of wire `i`).
    pub fn relabel(&self, sigma: &[usize]) -> Self {
        let target = Wire::from(sigma[self.target.index()]);
        let mut controls: Vec<Wire> = self
            .controls
            .iter()
            .map(|c| Wire::from(sigma[c.index()]))
            .collect();
        controls.sort_unstable();
        Self {
            kind: self.kind,
            target,
            controls,
        }
    }

    /// Whether `self` (at an earlier position) commutes with `other` (the
    /// immediately following gate): neither gate's target is read or written
    /// by the other (§4.2).
    ///
    /// Two gates commute exactly when neither writes a wire the other reads
    /// or writes — this is symmetric, so `g1.commutes_with(g2) ==
    /// g2.commutes_with(g1)`.
    pub fn commutes_with(&self, other: &Gate) -> bool {
        let self_writes_other_rw = self.target == other.target || other.controls.contains(&self.target);
        let other_writes_self_rw = other.target == self.target || self.controls.contains(&other.target);
        !self_writes_other_rw && !other_writes_self_rw
    }

    /// Append this gate's canonical byte encoding to `buf`: a one-byte kind
    /// tag, the target as little-endian `u32`, then each sorted control as a
    /// little-endian `u32`.
    pub(crate) fn write_fingerprint(&self, buf: &mut Vec<u8>) {
        buf.push(self.kind.tag());
        buf.extend_from_slice(&self.target.0.to_le_bytes());
        for c in &self.controls {
            buf.extend_from_slice(&c.0.to_le_bytes());
        }
    }
}
