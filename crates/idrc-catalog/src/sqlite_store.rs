//! SQLite-backed catalog storage for production use (§6 schema, column for
//! column).

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};

use idrc_ir::Composition;

use crate::error::CatalogResult;
use crate::ids::{CircuitId, DimGroupId, RepresentativeId};
use crate::store::CatalogStore;
use crate::types::{CircuitRecord, RepresentativeRecord};

/// SQLite-backed [`CatalogStore`]. One connection, guarded by a mutex —
/// the core is single-threaded (§5), so this never contends in practice;
/// the mutex exists for `Send + Sync` rather than for real concurrency.
pub struct SqliteCatalogStore {
    conn: Mutex<Connection>,
}

impl SqliteCatalogStore {
    /// Open (or create) a catalog database at `path`.
    pub fn open(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn: Mutex::new(conn) };
        store.init_schema()?;
        Ok(store)
    }

    /// An in-memory catalog database, useful for tests.
    pub fn in_memory() -> CatalogResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn: Mutex::new(conn) };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> CatalogResult<()> {
        let conn = self.conn.lock().expect("sqlite connection poisoned");
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS circuits (
                id INTEGER PRIMARY KEY,
                width INTEGER NOT NULL,
                length INTEGER NOT NULL,
                comp_not INTEGER NOT NULL,
                comp_cnot INTEGER NOT NULL,
                comp_ccnot INTEGER NOT NULL,
                fingerprint BLOB NOT NULL UNIQUE,
                representative_id INTEGER
            );

            CREATE TABLE IF NOT EXISTS dim_groups (
                id INTEGER PRIMARY KEY,
                width INTEGER NOT NULL,
                length INTEGER NOT NULL,
                circuit_count INTEGER NOT NULL DEFAULT 0,
                UNIQUE(width, length)
            );

            CREATE TABLE IF NOT EXISTS representatives (
                id INTEGER PRIMARY KEY,
                dim_group_id INTEGER NOT NULL,
                circuit_id INTEGER NOT NULL,
                comp_not INTEGER NOT NULL,
                comp_cnot INTEGER NOT NULL,
                comp_ccnot INTEGER NOT NULL,
                fully_unrolled INTEGER NOT NULL DEFAULT 0,
                UNIQUE(dim_group_id, comp_not, comp_cnot, comp_ccnot)
            );

            CREATE TABLE IF NOT EXISTS equivalents (
                representative_id INTEGER NOT NULL,
                circuit_id INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_representatives_dim_group
                ON representatives(dim_group_id);
            CREATE INDEX IF NOT EXISTS idx_representatives_circuit
                ON representatives(circuit_id);
            "#,
        )?;
        Ok(())
    }
}

fn row_to_circuit(row: &rusqlite::Row) -> rusqlite::Result<CircuitRecord> {
    let representative_id: Option<u64> = row.get(7)?;
    Ok(CircuitRecord {
        id: CircuitId(row.get(0)?),
        width: row.get(1)?,
        length: row.get::<_, i64>(2)? as usize,
        composition: (
            row.get::<_, i64>(3)? as usize,
            row.get::<_, i64>(4)? as usize,
            row.get::<_, i64>(5)? as usize,
        ),
        fingerprint: row.get(6)?,
        representative_id: representative_id.map(RepresentativeId),
    })
}

fn row_to_representative(row: &rusqlite::Row) -> rusqlite::Result<RepresentativeRecord> {
    Ok(RepresentativeRecord {
        id: RepresentativeId(row.get(0)?),
        dim_group_id: DimGroupId(row.get(1)?),
        circuit_id: CircuitId(row.get(2)?),
        composition: (
            row.get::<_, i64>(3)? as usize,
            row.get::<_, i64>(4)? as usize,
            row.get::<_, i64>(5)? as usize,
        ),
        fully_unrolled: row.get::<_, i64>(6)? != 0,
    })
}

impl CatalogStore for SqliteCatalogStore {
    fn next_circuit_id(&self) -> CatalogResult<CircuitId> {
        let conn = self.conn.lock().expect("sqlite connection poisoned");
        let next: i64 = conn.query_row("SELECT COALESCE(MAX(id), -1) + 1 FROM circuits", [], |r| r.get(0))?;
        Ok(CircuitId(next as u64))
    }

    fn next_representative_id(&self) -> CatalogResult<RepresentativeId> {
        let conn = self.conn.lock().expect("sqlite connection poisoned");
        let next: i64 = conn.query_row(
            "SELECT COALESCE(MAX(id), -1) + 1 FROM representatives",
            [],
            |r| r.get(0),
        )?;
        Ok(RepresentativeId(next as u64))
    }

    fn insert_circuit(&self, record: &CircuitRecord) -> CatalogResult<()> {
        let conn = self.conn.lock().expect("sqlite connection poisoned");
        conn.execute(
            "INSERT INTO circuits (id, width, length, comp_not, comp_cnot, comp_ccnot, fingerprint, representative_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                record.id.0,
                record.width,
                record.length as i64,
                record.composition.0 as i64,
                record.composition.1 as i64,
                record.composition.2 as i64,
                record.fingerprint,
                record.representative_id.map(|r| r.0),
            ],
        )?;
        Ok(())
    }

    fn update_circuit(&self, record: &CircuitRecord) -> CatalogResult<()> {
        let conn = self.conn.lock().expect("sqlite connection poisoned");
        conn.execute(
            "UPDATE circuits SET representative_id = ?1 WHERE id = ?2",
            params![record.representative_id.map(|r| r.0), record.id.0],
        )?;
        Ok(())
    }

    fn find_circuit_by_fingerprint(&self, fingerprint: &[u8]) -> CatalogResult<Option<CircuitRecord>> {
        let conn = self.conn.lock().expect("sqlite connection poisoned");
        conn.query_row(
            "SELECT id, width, length, comp_not, comp_cnot, comp_ccnot, fingerprint, representative_id
             FROM circuits WHERE fingerprint = ?1",
            params![fingerprint],
            row_to_circuit,
        )
        .optional()
        .map_err(Into::into)
    }

    fn get_circuit(&self, id: CircuitId) -> CatalogResult<Option<CircuitRecord>> {
        let conn = self.conn.lock().expect("sqlite connection poisoned");
        conn.query_row(
            "SELECT id, width, length, comp_not, comp_cnot, comp_ccnot, fingerprint, representative_id
             FROM circuits WHERE id = ?1",
            params![id.0],
            row_to_circuit,
        )
        .optional()
        .map_err(Into::into)
    }

    fn get_or_create_dim_group(&self, width: u32, length: usize) -> CatalogResult<DimGroupId> {
        let conn = self.conn.lock().expect("sqlite connection poisoned");
        if let Some(id) = conn
            .query_row(
                "SELECT id FROM dim_groups WHERE width = ?1 AND length = ?2",
                params![width, length as i64],
                |r| r.get::<_, i64>(0),
            )
            .optional()?
        {
            return Ok(DimGroupId(id as u64));
        }
        let next: i64 = conn.query_row("SELECT COALESCE(MAX(id), -1) + 1 FROM dim_groups", [], |r| r.get(0))?;
        conn.execute(
            "INSERT INTO dim_groups (id, width, length, circuit_count) VALUES (?1, ?2, ?3, 0)",
            params![next, width, length as i64],
        )?;
        Ok(DimGroupId(next as u64))
    }

    fn increment_dim_group_count(&self, id: DimGroupId) -> CatalogResult<()> {
        let conn = self.conn.lock().expect("sqlite connection poisoned");
        conn.execute(
            "UPDATE dim_groups SET circuit_count = circuit_count + 1 WHERE id = ?1",
            params![id.0],
        )?;
        Ok(())
    }

    fn find_representative(
        &self,
        dim_group: DimGroupId,
        composition: Composition,
    ) -> CatalogResult<Option<RepresentativeRecord>> {
        let conn = self.conn.lock().expect("sqlite connection poisoned");
        conn.query_row(
            "SELECT id, dim_group_id, circuit_id, comp_not, comp_cnot, comp_ccnot, fully_unrolled
             FROM representatives
             WHERE dim_group_id = ?1 AND comp_not = ?2 AND comp_cnot = ?3 AND comp_ccnot = ?4",
            params![dim_group.0, composition.0 as i64, composition.1 as i64, composition.2 as i64],
            row_to_representative,
        )
        .optional()
        .map_err(Into::into)
    }

    fn find_representative_by_circuit(&self, circuit_id: CircuitId) -> CatalogResult<Option<RepresentativeRecord>> {
        let conn = self.conn.lock().expect("sqlite connection poisoned");
        conn.query_row(
            "SELECT id, dim_group_id, circuit_id, comp_not, comp_cnot, comp_ccnot, fully_unrolled
             FROM representatives WHERE circuit_id = ?1",
            params![circuit_id.0],
            row_to_representative,
        )
        .optional()
        .map_err(Into::into)
    }

    fn get_representative(&self, id: RepresentativeId) -> CatalogResult<Option<RepresentativeRecord>> {
        let conn = self.conn.lock().expect("sqlite connection poisoned");
        conn.query_row(
            "SELECT id, dim_group_id, circuit_id, comp_not, comp_cnot, comp_ccnot, fully_unrolled
             FROM representatives WHERE id = ?1",
            params![id.0],
            row_to_representative,
        )
        .optional()
        .map_err(Into::into)
    }

    fn insert_representative(&self, record: &RepresentativeRecord) -> CatalogResult<()> {
        let conn = self.conn.lock().expect("sqlite connection poisoned");
        conn.execute(
            "INSERT INTO representatives (id, dim_group_id, circuit_id, comp_not, comp_cnot, comp_ccnot, fully_unrolled)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                record.id.0,
                record.dim_group_id.0,
                record.circuit_id.0,
                record.composition.0 as i64,
                record.composition.1 as i64,
                record.composition.2 as i64,
                record.fully_unrolled as i64,
            ],
        )?;
        Ok(())
    }

    fn update_representative(&self, record: &RepresentativeRecord) -> CatalogResult<()> {
        let conn = self.conn.lock().expect("sqlite connection poisoned");
        conn.execute(
            "UPDATE representatives SET fully_unrolled = ?1 WHERE id = ?2",
            params![record.fully_unrolled as i64, record.id.0],
        )?;
        Ok(())
    }

    fn delete_representative(&self, id: RepresentativeId) -> CatalogResult<()> {
        let conn = self.conn.lock().expect("sqlite connection poisoned");
        conn.execute("DELETE FROM representatives WHERE id = ?1", params![id.0])?;
        Ok(())
    }

    fn insert_equivalent(&self, representative_id: RepresentativeId, circuit_id: CircuitId) -> CatalogResult<()> {
        let conn = self.conn.lock().expect("sqlite connection poisoned");
        conn.execute(
            "INSERT INTO equivalents (representative_id, circuit_id) VALUES (?1, ?2)",
            params![representative_id.0, circuit_id.0],
        )?;
        Ok(())
    }

    fn list_representatives(&self, width: u32, length: usize) -> CatalogResult<Vec<RepresentativeRecord>> {
        let conn = self.conn.lock().expect("sqlite connection poisoned");
        let mut stmt = conn.prepare(
            "SELECT r.id, r.dim_group_id, r.circuit_id, r.comp_not, r.comp_cnot, r.comp_ccnot, r.fully_unrolled
             FROM representatives r
             JOIN dim_groups g ON g.id = r.dim_group_id
             WHERE g.width = ?1 AND g.length = ?2",
        )?;
        let rows = stmt
            .query_map(params![width, length as i64], row_to_representative)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
