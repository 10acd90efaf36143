//! Breadth-first enumeration of a circuit's equivalence class under
//! commutation swaps, rotation, reversal, and qubit relabeling (§4.6).

pub mod bfs;
pub mod cancel;
pub mod error;
pub mod permutation;

pub use bfs::{unroll, UnrollReport};
pub use cancel::CancelToken;
pub use error::{UnrollError, UnrollResult};
pub use permutation::LexicographicPermutations;
