//! JSON file-based catalog storage for development and testing.
//!
//! A single snapshot file holds every table; each mutating call rewrites it
//! under the store's mutex. Suitable for small catalogs and tests, not
//! production scale — see [`crate::sqlite_store::SqliteCatalogStore`] for
//! that.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use idrc_ir::Composition;

use crate::error::CatalogResult;
use crate::ids::{CircuitId, DimGroupId, RepresentativeId};
use crate::store::CatalogStore;
use crate::types::{CircuitRecord, DimGroupRecord, RepresentativeRecord};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    next_circuit_id: u64,
    next_dim_group_id: u64,
    next_representative_id: u64,
    circuits: Vec<CircuitRecord>,
    dim_groups: Vec<DimGroupRecord>,
    representatives: Vec<RepresentativeRecord>,
    /// `(representative_id, circuit_id)` pairs.
    equivalents: Vec<(u64, u64)>,
}

/// JSON file-backed [`CatalogStore`].
pub struct JsonCatalogStore {
    path: PathBuf,
    state: Mutex<Snapshot>,
}

impl JsonCatalogStore {
    /// Open (or create) a catalog snapshot at `path`.
    pub fn open(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref().to_path_buf();
        let snapshot = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            Snapshot::default()
        };
        Ok(Self {
            path,
            state: Mutex::new(snapshot),
        })
    }

    /// A fresh, unbacked-by-disk-until-first-write catalog in `dir`.
    pub fn create_new(dir: impl AsRef<Path>) -> CatalogResult<Self> {
        std::fs::create_dir_all(dir.as_ref())?;
        Self::open(dir.as_ref().join("catalog.json"))
    }

    fn persist(&self, snapshot: &Snapshot) -> CatalogResult<()> {
        let json = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl CatalogStore for JsonCatalogStore {
    fn next_circuit_id(&self) -> CatalogResult<CircuitId> {
        let mut s = self.state.lock().expect("catalog state poisoned");
        let id = s.next_circuit_id;
        s.next_circuit_id += 1;
        Ok(CircuitId(id))
    }

    fn next_representative_id(&self) -> CatalogResult<RepresentativeId> {
        let mut s = self.state.lock().expect("catalog state poisoned");
        let id = s.next_representative_id;
        s.next_representative_id += 1;
        Ok(RepresentativeId(id))
    }

    fn insert_circuit(&self, record: &CircuitRecord) -> CatalogResult<()> {
        let mut s = self.state.lock().expect("catalog state poisoned");
        s.circuits.push(record.clone());
        let snapshot = s.clone_for_persist();
        drop(s);
        self.persist(&snapshot)
    }

    fn update_circuit(&self, record: &CircuitRecord) -> CatalogResult<()> {
        let mut s = self.state.lock().expect("catalog state poisoned");
        if let Some(slot) = s.circuits.iter_mut().find(|c| c.id == record.id) {
            *slot = record.clone();
        }
        let snapshot = s.clone_for_persist();
        drop(s);
        self.persist(&snapshot)
    }

    fn find_circuit_by_fingerprint(&self, fingerprint: &[u8]) -> CatalogResult<Option<CircuitRecord>> {
        let s = self.state.lock().expect("catalog state poisoned");
        Ok(s.circuits.iter().find(|c| c.fingerprint == fingerprint).cloned())
    }

    fn get_circuit(&self, id: CircuitId) -> CatalogResult<Option<CircuitRecord>> {
        let s = self.state.lock().expect("catalog state poisoned");
        Ok(s.circuits.iter().find(|c| c.id == id).cloned())
    }

    fn get_or_create_dim_group(&self, width: u32, length: usize) -> CatalogResult<DimGroupId> {
        let mut s = self.state.lock().expect("catalog state poisoned");
        if let Some(existing) = s.dim_groups.iter().find(|g| g.width == width && g.length == length) {
            return Ok(existing.id);
        }
        let id = DimGroupId(s.next_dim_group_id);
        s.next_dim_group_id += 1;
        s.dim_groups.push(DimGroupRecord {
            id,
            width,
            length,
            circuit_count: 0,
        });
        let snapshot = s.clone_for_persist();
        drop(s);
        self.persist(&snapshot)?;
        Ok(id)
    }

    fn increment_dim_group_count(&self, id: DimGroupId) -> CatalogResult<()> {
        let mut s = self.state.lock().expect("catalog state poisoned");
        if let Some(group) = s.dim_groups.iter_mut().find(|g| g.id == id) {
            group.circuit_count += 1;
        }
        let snapshot = s.clone_for_persist();
        drop(s);
        self.persist(&snapshot)
    }

    fn find_representative(
        &self,
        dim_group: DimGroupId,
        composition: Composition,
    ) -> CatalogResult<Option<RepresentativeRecord>> {
        let s = self.state.lock().expect("catalog state poisoned");
        Ok(s.representatives
            .iter()
            .find(|r| r.dim_group_id == dim_group && r.composition == composition)
            .cloned())
    }

    fn find_representative_by_circuit(&self, circuit_id: CircuitId) -> CatalogResult<Option<RepresentativeRecord>> {
        let s = self.state.lock().expect("catalog state poisoned");
        Ok(s.representatives.iter().find(|r| r.circuit_id == circuit_id).cloned())
    }

    fn get_representative(&self, id: RepresentativeId) -> CatalogResult<Option<RepresentativeRecord>> {
        let s = self.state.lock().expect("catalog state poisoned");
        Ok(s.representatives.iter().find(|r| r.id == id).cloned())
    }

    fn insert_representative(&self, record: &RepresentativeRecord) -> CatalogResult<()> {
        let mut s = self.state.lock().expect("catalog state poisoned");
        s.representatives.push(record.clone());
        let snapshot = s.clone_for_persist();
        drop(s);
        self.persist(&snapshot)
    }

    fn update_representative(&self, record: &RepresentativeRecord) -> CatalogResult<()> {
        let mut s = self.state.lock().expect("catalog state poisoned");
        if let Some(slot) = s.representatives.iter_mut().find(|r| r.id == record.id) {
            *slot = record.clone();
        }
        let snapshot = s.clone_for_persist();
        drop(s);
        self.persist(&snapshot)
    }

    fn delete_representative(&self, id: RepresentativeId) -> CatalogResult<()> {
        let mut s = self.state.lock().expect("catalog state poisoned");
        s.representatives.retain(|r| r.id != id);
        let snapshot = s.clone_for_persist();
        drop(s);
        self.persist(&snapshot)
    }

    fn insert_equivalent(&self, representative_id: RepresentativeId, circuit_id: CircuitId) -> CatalogResult<()> {
        let mut s = self.state.lock().expect("catalog state poisoned");
        s.equivalents.push((representative_id.0, circuit_id.0));
        let snapshot = s.clone_for_persist();
        drop(s);
        self.persist(&snapshot)
    }

    fn list_representatives(&self, width: u32, length: usize) -> CatalogResult<Vec<RepresentativeRecord>> {
        let s = self.state.lock().expect("catalog state poisoned");
        let dim_group = s.dim_groups.iter().find(|g| g.width == width && g.length == length);
        let Some(dim_group) = dim_group else {
            return Ok(Vec::new());
        };
        Ok(s.representatives
            .iter()
            .filter(|r| r.dim_group_id == dim_group.id)
            .cloned()
            .collect())
    }
}

impl Snapshot {
    fn clone_for_persist(&self) -> Snapshot {
        Snapshot {
            next_circuit_id: self.next_circuit_id,
            next_dim_group_id: self.next_dim_group_id,
            next_representative_id: self.next_representative_id,
            circuits: self.circuits.clone(),
            dim_groups: self.dim_groups.clone(),
            representatives: self.representatives.clone(),
            equivalents: self.equivalents.clone(),
        }
    }
}

/// Load the full `representative_id -> circuit_id` equivalents relation
/// cataloged so far, for maintenance tooling outside the core operations.
pub fn load_equivalents_index(store: &JsonCatalogStore) -> FxHashMap<u64, Vec<u64>> {
    let s = store.state.lock().expect("catalog state poisoned");
    let mut index: FxHashMap<u64, Vec<u64>> = FxHashMap::default();
    for (rep, circuit) in &s.equivalents {
        index.entry(*rep).or_default().push(*circuit);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use idrc_ir::{Circuit, Gate, Wire};
    use tempfile_dir::TempDir;

    mod tempfile_dir {
        use std::path::{Path, PathBuf};

        /// Minimal scratch-directory helper (avoids a `tempfile` dev
        /// dependency for what is otherwise a handful of catalog tests).
        pub struct TempDir(PathBuf);

        impl TempDir {
            pub fn new(label: &str) -> Self {
                let nanos = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .unwrap()
                    .as_nanos();
                let path = std::env::temp_dir().join(format!("idrc-catalog-{label}-{nanos}"));
                std::fs::create_dir_all(&path).unwrap();
                Self(path)
            }

            pub fn path(&self) -> &Path {
                &self.0
            }
        }

        impl Drop for TempDir {
            fn drop(&mut self) {
                let _ = std::fs::remove_dir_all(&self.0);
            }
        }
    }

    fn two_not_circuit() -> Circuit {
        let mut c = Circuit::new(2);
        c.push(Gate::not(Wire(0))).unwrap();
        c.push(Gate::not(Wire(0))).unwrap();
        c
    }

    #[test]
    fn test_insert_and_reopen_round_trips() {
        let dir = TempDir::new("reopen");
        let path = dir.path().join("catalog.json");

        {
            let store = JsonCatalogStore::open(&path).unwrap();
            let circuit = two_not_circuit();
            let id = store.next_circuit_id().unwrap();
            let dim_group = store.get_or_create_dim_group(2, 2).unwrap();
            store
                .insert_circuit(&CircuitRecord {
                    id,
                    width: 2,
                    length: 2,
                    composition: circuit.composition(),
                    fingerprint: circuit.fingerprint(),
                    representative_id: None,
                })
                .unwrap();
            store.increment_dim_group_count(dim_group).unwrap();
        }

        let reopened = JsonCatalogStore::open(&path).unwrap();
        let found = reopened
            .find_circuit_by_fingerprint(&two_not_circuit().fingerprint())
            .unwrap();
        assert!(found.is_some());
    }
}
