//! Stored record shapes (§4.7, §6 "Catalog schema").

use serde::{Deserialize, Serialize};

use idrc_ir::Composition;

use crate::ids::{CircuitId, DimGroupId, RepresentativeId};

/// A cataloged circuit: `circuits` table (§6).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitRecord {
    pub id: CircuitId,
    pub width: u32,
    pub length: usize,
    pub composition: Composition,
    /// Canonical fingerprint bytes (also serves as `gates_blob`, per §6:
    /// "gates_blob is the fingerprint bytes").
    pub fingerprint: Vec<u8>,
    /// Set iff this circuit is an equivalent pointing back to a
    /// representative; `None` for representative circuits themselves.
    pub representative_id: Option<RepresentativeId>,
}

/// A dimension group: `dim_groups` table (§6).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimGroupRecord {
    pub id: DimGroupId,
    pub width: u32,
    pub length: usize,
    pub circuit_count: u64,
}

/// An elected representative for a `(dim_group, composition)` key:
/// `representatives` table (§6).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepresentativeRecord {
    pub id: RepresentativeId,
    pub dim_group_id: DimGroupId,
    pub circuit_id: CircuitId,
    pub composition: Composition,
    pub fully_unrolled: bool,
}

/// Statistics returned by [`crate::catalog::Catalog::fold_equivalents`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FoldStats {
    /// Equivalents newly inserted into the catalog.
    pub inserted: usize,
    /// Equivalents that already existed by fingerprint (idempotent no-op).
    pub duplicates: usize,
    /// Other representatives demoted to equivalents of this fold's
    /// representative.
    pub demoted: usize,
}
