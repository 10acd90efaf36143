//! Reversible circuit algebra and truth-table model.
//!
//! This crate provides the foundation for the identity-circuit catalog: the
//! gate and circuit types over the fixed generator set {NOT, CNOT, CCNOT},
//! exact permutation simulation, and the commutation/move primitives the
//! unroller and synthesis encoder build on.
//!
//! # Example
//!
//! ```rust
//! use idrc_ir::{Circuit, Gate, Wire};
//!
//! let mut c = Circuit::new(2);
//! c.push(Gate::not(Wire(0))).unwrap();
//! c.push(Gate::not(Wire(0))).unwrap();
//!
//! assert!(c.simulate().unwrap().is_identity());
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod library;
pub mod truth_table;
pub mod wire;

pub use circuit::{Circuit, Composition};
pub use error::{IrError, IrResult};
pub use gate::{Gate, GateKind};
pub use library::GateLibrary;
pub use truth_table::TruthTable;
pub use wire::Wire;
