//! The abstract key/row store the catalog is built over (§6: "the core
//! does not assume SQL").

use idrc_ir::Composition;

use crate::error::CatalogResult;
use crate::ids::{CircuitId, DimGroupId, RepresentativeId};
use crate::types::{CircuitRecord, RepresentativeRecord};

/// The storage operations the catalog's fold/insert logic needs. Each
/// top-level `Catalog` operation is expected to execute as one logical
/// transaction against a conforming backend (§5).
pub trait CatalogStore {
    /// Allocate the next circuit id.
    fn next_circuit_id(&self) -> CatalogResult<CircuitId>;

    /// Allocate the next representative id.
    fn next_representative_id(&self) -> CatalogResult<RepresentativeId>;

    /// Insert a new circuit record. The caller guarantees the fingerprint
    /// is not already present.
    fn insert_circuit(&self, record: &CircuitRecord) -> CatalogResult<()>;

    /// Update an existing circuit record in place (used by demotion, which
    /// sets `representative_id`).
    fn update_circuit(&self, record: &CircuitRecord) -> CatalogResult<()>;

    /// Find a circuit by its canonical fingerprint, if cataloged (I2: at
    /// most one per dimension group, so fingerprint alone suffices).
    fn find_circuit_by_fingerprint(&self, fingerprint: &[u8]) -> CatalogResult<Option<CircuitRecord>>;

    /// Fetch a circuit record by id.
    fn get_circuit(&self, id: CircuitId) -> CatalogResult<Option<CircuitRecord>>;

    /// Return the dimension group id for `(width, length)`, creating the
    /// group record if this is its first circuit.
    fn get_or_create_dim_group(&self, width: u32, length: usize) -> CatalogResult<DimGroupId>;

    /// Increment a dimension group's stored circuit count.
    fn increment_dim_group_count(&self, id: DimGroupId) -> CatalogResult<()>;

    /// Find the current representative for a `(dim_group, composition)`
    /// key, if one has been elected.
    fn find_representative(
        &self,
        dim_group: DimGroupId,
        composition: Composition,
    ) -> CatalogResult<Option<RepresentativeRecord>>;

    /// Find the representative record whose elected circuit is `circuit_id`,
    /// if any (used to detect demotion candidates during folding).
    fn find_representative_by_circuit(&self, circuit_id: CircuitId) -> CatalogResult<Option<RepresentativeRecord>>;

    /// Fetch a representative record by id.
    fn get_representative(&self, id: RepresentativeId) -> CatalogResult<Option<RepresentativeRecord>>;

    /// Insert a new representative record.
    fn insert_representative(&self, record: &RepresentativeRecord) -> CatalogResult<()>;

    /// Overwrite an existing representative record (used to flip
    /// `fully_unrolled`, and to demote by deletion elsewhere).
    fn update_representative(&self, record: &RepresentativeRecord) -> CatalogResult<()>;

    /// Remove a representative record (its circuit becomes a plain
    /// equivalent via [`CatalogStore::update_circuit`]).
    fn delete_representative(&self, id: RepresentativeId) -> CatalogResult<()>;

    /// Record that `circuit_id` is an equivalent of `representative_id`
    /// (`equivalents` table).
    fn insert_equivalent(&self, representative_id: RepresentativeId, circuit_id: CircuitId) -> CatalogResult<()>;

    /// All currently-true representatives for a `(width, length)` dimension
    /// group.
    fn list_representatives(&self, width: u32, length: usize) -> CatalogResult<Vec<RepresentativeRecord>>;
}
