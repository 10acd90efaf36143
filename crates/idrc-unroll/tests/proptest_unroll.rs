//! Property-based test for §8 invariant 6: every circuit `unroll(R, L)`
//! emits simulates to the identity whenever `R` does.

use proptest::prelude::*;

use idrc_ir::{Circuit, GateLibrary};
use idrc_unroll::{unroll, CancelToken};

/// Every valid gate for `width`, picked uniformly from the candidate
/// library (same enumeration the synthesis encoding selects over).
fn arb_gate(width: u32) -> impl Strategy<Value = idrc_ir::Gate> {
    let gates = GateLibrary::for_width(width).unwrap().gates().to_vec();
    let n = gates.len();
    (0..n).prop_map(move |i| gates[i].clone())
}

/// An identity circuit built as `F ++ reverse(F)` for a random forward
/// circuit `F`: every gate in this library is self-inverse (§3), so
/// reversing `F`'s gate order is exactly its inverse (§8 invariant 4).
fn arb_identity_circuit(width: u32, half_len: usize) -> impl Strategy<Value = Circuit> {
    proptest::collection::vec(arb_gate(width), 0..=half_len).prop_map(move |forward| {
        let mut gates = forward.clone();
        let mut inverse = forward;
        inverse.reverse();
        gates.extend(inverse);
        Circuit::from_gates(width, gates).unwrap()
    })
}

fn arb_width_identity_circuit() -> impl Strategy<Value = (u32, Circuit)> {
    (2_u32..=3).prop_flat_map(|width| (Just(width), arb_identity_circuit(width, 3)))
}

proptest! {
    /// §8 invariant 6: unrolling an identity representative only ever
    /// emits identity circuits, all sharing its `(width, length)`.
    #[test]
    fn invariant_6_unroll_preserves_identity((width, rep) in arb_width_identity_circuit()) {
        prop_assume!(rep.simulate().unwrap().is_identity());

        let report = unroll(&rep, 30, &CancelToken::new()).unwrap();
        for circuit in &report.circuits {
            prop_assert!(circuit.simulate().unwrap().is_identity());
            prop_assert_eq!(circuit.width(), width);
            prop_assert_eq!(circuit.len(), rep.len());
        }
    }
}
