//! Wire identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A zero-based wire index within a circuit of fixed width `w`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Wire(pub u32);

impl fmt::Display for Wire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

impl From<u32> for Wire {
    fn from(id: u32) -> Self {
        Wire(id)
    }
}

impl From<usize> for Wire {
    fn from(id: usize) -> Self {
        Wire(u32::try_from(id).expect("Wire overflow: exceeds u32::MAX"))
    }
}

impl Wire {
    /// Get the wire index as a `usize` for array indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
