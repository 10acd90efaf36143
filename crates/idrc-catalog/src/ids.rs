//! Newtype identifiers for catalog records.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! catalog_id {
    ($name:ident) => {
        /// An opaque, monotonically assigned catalog identifier.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                $name(id)
            }
        }
    };
}

catalog_id!(CircuitId);
catalog_id!(DimGroupId);
catalog_id!(RepresentativeId);
