//! Random forward circuit generation with a local diversity rule (§9:
//! "avoid trivial repetition patterns ... that short-circuit the SAT
//! phase").

use rand::Rng;

use idrc_ir::{Circuit, GateLibrary};

/// Draws random forward circuits over a fixed-width gate library, rejecting
/// immediate repeats that would make the SAT phase trivial: no two
/// consecutive gates are identical, and no two consecutive gates share a
/// target wire.
pub struct RandomCircuitGenerator {
    library: GateLibrary,
}

impl RandomCircuitGenerator {
    /// Build a generator drawing from the full candidate library for
    /// `width`.
    pub fn new(width: u32) -> idrc_ir::IrResult<Self> {
        Ok(Self {
            library: GateLibrary::for_width(width)?,
        })
    }

    /// The width this generator draws circuits for.
    pub fn width(&self) -> u32 {
        self.library.width()
    }

    /// Draw a random circuit of exactly `length` gates, honoring the local
    /// diversity rule at every step.
    pub fn generate(&self, length: usize, rng: &mut impl Rng) -> Circuit {
        let mut circuit = Circuit::new(self.library.width());
        let gates = self.library.gates();

        for _ in 0..length {
            loop {
                let candidate = &gates[rng.gen_range(0..gates.len())];
                let last = circuit.gates().last();
                let repeats_last_gate = last.is_some_and(|g| g == candidate);
                let repeats_last_target = last.is_some_and(|g| g.target() == candidate.target());
                if repeats_last_gate || repeats_last_target {
                    continue;
                }
                circuit.push(candidate.clone()).expect("candidate drawn from this width's library");
                break;
            }
        }

        circuit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generated_circuit_has_requested_length_and_width() {
        let gen = RandomCircuitGenerator::new(3).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let c = gen.generate(10, &mut rng);
        assert_eq!(c.len(), 10);
        assert_eq!(c.width(), 3);
    }

    #[test]
    fn test_no_two_consecutive_gates_are_identical() {
        let gen = RandomCircuitGenerator::new(2).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let c = gen.generate(200, &mut rng);
        for w in c.gates().windows(2) {
            assert_ne!(w[0], w[1]);
            assert_ne!(w[0].target(), w[1].target());
        }
    }

    #[test]
    fn test_zero_length_circuit_is_empty() {
        let gen = RandomCircuitGenerator::new(2).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let c = gen.generate(0, &mut rng);
        assert!(c.is_empty());
    }
}
