// Path: crates/storage/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! State backends for the forwarder.
//!
//! `RedbStore` persists state in a single redb table and commits every
//! `batch_apply` in one write transaction. `MemoryStore` keeps everything in
//! an ordered map for tests and ephemeral instances.

pub mod memory;
pub mod redb_store;

pub use memory::MemoryStore;
pub use redb_store::RedbStore;

use endorse_api::state::{StateAccess, StateScanIter};
use endorse_types::config::StorageConfig;
use endorse_types::error::StateError;

/// A backend chosen at runtime from configuration.
#[derive(Debug)]
pub enum AnyStore {
    Memory(MemoryStore),
    Redb(RedbStore),
}

impl AnyStore {
    /// Opens the store described by `config`: redb at `path`, or memory when absent.
    pub fn open(config: &StorageConfig) -> Result<Self, StateError> {
        match &config.path {
            Some(path) => RedbStore::open(path).map(Self::Redb),
            None => Ok(Self::Memory(MemoryStore::default())),
        }
    }

    fn inner(&self) -> &dyn StateAccess {
        match self {
            Self::Memory(s) => s,
            Self::Redb(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn StateAccess {
        match self {
            Self::Memory(s) => s,
            Self::Redb(s) => s,
        }
    }
}

impl StateAccess for AnyStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        self.inner().get(key)
    }

    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        self.inner_mut().insert(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
        self.inner_mut().delete(key)
    }

    fn batch_set(&mut self, updates: &[(Vec<u8>, Vec<u8>)]) -> Result<(), StateError> {
        self.inner_mut().batch_set(updates)
    }

    fn batch_get(&self, keys: &[Vec<u8>]) -> Result<Vec<Option<Vec<u8>>>, StateError> {
        self.inner().batch_get(keys)
    }

    fn batch_apply(
        &mut self,
        inserts: &[(Vec<u8>, Vec<u8>)],
        deletes: &[Vec<u8>],
    ) -> Result<(), StateError> {
        self.inner_mut().batch_apply(inserts, deletes)
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<StateScanIter<'_>, StateError> {
        self.inner().prefix_scan(prefix)
    }
}
