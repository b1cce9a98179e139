// Path: crates/storage/src/redb_store.rs
//! A durable state backend on a single redb table.

use endorse_api::state::{StateAccess, StateKVPair, StateScanIter};
use endorse_types::error::StateError;
use redb::{Database, ReadableTable, TableDefinition};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const STATE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("STATE");

fn backend<E: std::fmt::Display>(e: E) -> StateError {
    StateError::Backend(e.to_string())
}

/// State persisted in a redb database file.
///
/// Every mutating call is its own write transaction; `batch_apply` stages all
/// of its deletes and inserts in one transaction, so a crash leaves either
/// the whole batch or none of it.
pub struct RedbStore {
    db: Database,
    path: PathBuf,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").field("path", &self.path).finish()
    }
}

impl RedbStore {
    /// Opens (or creates) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StateError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(backend)?;
            }
        }
        let db = Database::create(&path).map_err(backend)?;
        // Create the table up front so read transactions never miss it.
        {
            let w = db.begin_write().map_err(backend)?;
            w.open_table(STATE).map_err(backend)?;
            w.commit().map_err(backend)?;
        }
        tracing::debug!(target: "storage", path = %path.display(), "opened redb state store");
        Ok(Self { db, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_batch(
        &self,
        inserts: &[(Vec<u8>, Vec<u8>)],
        deletes: &[Vec<u8>],
    ) -> Result<(), StateError> {
        let w = self.db.begin_write().map_err(backend)?;
        {
            let mut table = w.open_table(STATE).map_err(backend)?;
            for key in deletes {
                table
                    .remove(key.as_slice())
                    .map_err(|e| StateError::WriteError(e.to_string()))?;
            }
            for (key, value) in inserts {
                table
                    .insert(key.as_slice(), value.as_slice())
                    .map_err(|e| StateError::WriteError(e.to_string()))?;
            }
        }
        w.commit().map_err(backend)?;
        Ok(())
    }
}

impl StateAccess for RedbStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        let r = self.db.begin_read().map_err(backend)?;
        let table = r.open_table(STATE).map_err(backend)?;
        let value = table.get(key).map_err(backend)?.map(|g| g.value().to_vec());
        Ok(value)
    }

    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        self.write_batch(&[(key.to_vec(), value.to_vec())], &[])
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
        self.write_batch(&[], &[key.to_vec()])
    }

    fn batch_set(&mut self, updates: &[(Vec<u8>, Vec<u8>)]) -> Result<(), StateError> {
        self.write_batch(updates, &[])
    }

    fn batch_get(&self, keys: &[Vec<u8>]) -> Result<Vec<Option<Vec<u8>>>, StateError> {
        let r = self.db.begin_read().map_err(backend)?;
        let table = r.open_table(STATE).map_err(backend)?;
        keys.iter()
            .map(|k| {
                table
                    .get(k.as_slice())
                    .map(|opt| opt.map(|g| g.value().to_vec()))
                    .map_err(backend)
            })
            .collect()
    }

    fn batch_apply(
        &mut self,
        inserts: &[(Vec<u8>, Vec<u8>)],
        deletes: &[Vec<u8>],
    ) -> Result<(), StateError> {
        self.write_batch(inserts, deletes)?;
        tracing::debug!(
            target: "storage",
            inserts = inserts.len(),
            deletes = deletes.len(),
            "committed state batch"
        );
        Ok(())
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<StateScanIter<'_>, StateError> {
        let r = self.db.begin_read().map_err(backend)?;
        let table = r.open_table(STATE).map_err(backend)?;
        let mut out: Vec<Result<StateKVPair, StateError>> = Vec::new();
        for item in table.range::<&[u8]>(prefix..).map_err(backend)? {
            let (k, v) = item.map_err(backend)?;
            let key = k.value();
            if !key.starts_with(prefix) {
                break;
            }
            out.push(Ok((Arc::from(key), Arc::from(v.value()))));
        }
        Ok(Box::new(out.into_iter()))
    }
}
