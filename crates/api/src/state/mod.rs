// Path: crates/api/src/state/mod.rs
//! Key-value state access for the forwarder.
//!
//! - `StateAccess`: basic key-value store operations, including an atomic batch apply.
//! - `StateOverlay`: a copy-on-write layer used to stage a batch before it is committed.
//! - `ScopedState`: the view of a staged batch handed to dispatched calls.

use endorse_types::codec::{from_bytes_canonical, to_bytes_canonical};
use endorse_types::error::StateError;
use parity_scale_codec::{Decode, Encode};
use std::sync::Arc;

/// An atomically reference-counted, owned key slice.
pub type StateKey = Arc<[u8]>;
/// An atomically reference-counted, owned value slice.
pub type StateVal = Arc<[u8]>;
/// An owned key-value pair from the state.
pub type StateKVPair = (StateKey, StateVal);
/// A streaming iterator over key-value pairs in key order.
pub type StateScanIter<'a> = Box<dyn Iterator<Item = Result<StateKVPair, StateError>> + Send + 'a>;

mod overlay;
mod scoped;

#[cfg(test)]
mod tests;

pub use overlay::*;
pub use scoped::ScopedState;

/// A dyn-safe interface for key-value storage operations.
///
/// Services and the executor work against this trait so the same logic runs
/// over the durable store, the in-memory store, or a staged overlay.
pub trait StateAccess: Send + Sync {
    /// Gets a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError>;

    /// Inserts a key-value pair.
    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError>;

    /// Deletes a key-value pair.
    fn delete(&mut self, key: &[u8]) -> Result<(), StateError>;

    /// Sets multiple key-value pairs in a single batch operation.
    fn batch_set(&mut self, updates: &[(Vec<u8>, Vec<u8>)]) -> Result<(), StateError>;

    /// Gets multiple values by keys in a single batch operation.
    fn batch_get(&self, keys: &[Vec<u8>]) -> Result<Vec<Option<Vec<u8>>>, StateError>;

    /// Atomically applies a batch of inserts/updates and deletes.
    ///
    /// Either every change becomes visible or none does. This is the only
    /// method the executor uses to commit a staged batch.
    fn batch_apply(
        &mut self,
        inserts: &[(Vec<u8>, Vec<u8>)],
        deletes: &[Vec<u8>],
    ) -> Result<(), StateError>;

    /// Scans for all key-value pairs starting with the given prefix, in key order.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<StateScanIter<'_>, StateError>;
}

// Blanket implementation to allow `StateAccess` to be used behind a `Box` trait object.
impl<T: StateAccess + ?Sized> StateAccess for Box<T> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        (**self).get(key)
    }

    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        (**self).insert(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
        (**self).delete(key)
    }

    fn batch_set(&mut self, updates: &[(Vec<u8>, Vec<u8>)]) -> Result<(), StateError> {
        (**self).batch_set(updates)
    }

    fn batch_get(&self, keys: &[Vec<u8>]) -> Result<Vec<Option<Vec<u8>>>, StateError> {
        (**self).batch_get(keys)
    }

    fn batch_apply(
        &mut self,
        inserts: &[(Vec<u8>, Vec<u8>)],
        deletes: &[Vec<u8>],
    ) -> Result<(), StateError> {
        (**self).batch_apply(inserts, deletes)
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<StateScanIter<'_>, StateError> {
        (**self).prefix_scan(prefix)
    }
}

/// Reads and SCALE-decodes the value at `key`.
pub fn read_canonical<T: Decode, S: StateAccess + ?Sized>(
    state: &S,
    key: &[u8],
) -> Result<Option<T>, StateError> {
    state
        .get(key)?
        .map(|bytes| from_bytes_canonical(&bytes).map_err(StateError::Decode))
        .transpose()
}

/// SCALE-encodes `value` and writes it at `key`.
pub fn write_canonical<T: Encode, S: StateAccess + ?Sized>(
    state: &mut S,
    key: &[u8],
    value: &T,
) -> Result<(), StateError> {
    let bytes = to_bytes_canonical(value).map_err(StateError::InvalidValue)?;
    state.insert(key, &bytes)
}
