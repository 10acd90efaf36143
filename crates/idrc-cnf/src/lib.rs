//! CNF construction primitives shared by the synthesis encoder.
//!
//! This crate knows nothing about circuits or gates: it is a small,
//! solver-agnostic toolkit for allocating variables, emitting Tseytin-style
//! clauses for the boolean connectives, encoding cardinality constraints,
//! and serializing the result to DIMACS. [`idrc_sat`] backends consume the
//! output of [`CnfBuilder::to_dimacs`] or the raw clause list directly.

pub mod builder;
pub mod error;
pub mod lit;

pub use builder::CnfBuilder;
pub use error::{CnfError, CnfResult};
pub use lit::{Clause, Lit, Var};
