// Path: crates/api/src/state/scoped.rs

//! A state view that fences off the forwarder's reserved namespace.

use crate::state::{StateAccess, StateScanIter};
use endorse_types::error::StateError;
use endorse_types::keys::is_reserved;

/// Wraps the staged state handed to a dispatched call.
///
/// Keys under `endorse::` belong to the forwarder (nonces, proposals,
/// eligibility, outbox). Any read or write of such a key fails with
/// [`StateError::ReservedKey`], except keys under the optional `grant` prefix.
/// Scans silently skip keys the view may not see.
pub struct ScopedState<'a> {
    inner: &'a mut dyn StateAccess,
    grant: Option<&'static [u8]>,
}

impl<'a> ScopedState<'a> {
    pub fn new(inner: &'a mut dyn StateAccess, grant: Option<&'static [u8]>) -> Self {
        Self { inner, grant }
    }

    fn visible(grant: Option<&'static [u8]>, key: &[u8]) -> bool {
        !is_reserved(key) || grant.is_some_and(|g| key.starts_with(g))
    }

    fn check(&self, key: &[u8]) -> Result<(), StateError> {
        if Self::visible(self.grant, key) {
            Ok(())
        } else {
            log::warn!("dispatched call denied access to reserved key {}", String::from_utf8_lossy(key));
            Err(StateError::ReservedKey(String::from_utf8_lossy(key).into_owned()))
        }
    }
}

impl StateAccess for ScopedState<'_> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        self.check(key)?;
        self.inner.get(key)
    }

    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        self.check(key)?;
        self.inner.insert(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
        self.check(key)?;
        self.inner.delete(key)
    }

    fn batch_set(&mut self, updates: &[(Vec<u8>, Vec<u8>)]) -> Result<(), StateError> {
        for (key, _) in updates {
            self.check(key)?;
        }
        self.inner.batch_set(updates)
    }

    fn batch_get(&self, keys: &[Vec<u8>]) -> Result<Vec<Option<Vec<u8>>>, StateError> {
        for key in keys {
            self.check(key)?;
        }
        self.inner.batch_get(keys)
    }

    fn batch_apply(
        &mut self,
        inserts: &[(Vec<u8>, Vec<u8>)],
        deletes: &[Vec<u8>],
    ) -> Result<(), StateError> {
        for key in inserts.iter().map(|(k, _)| k).chain(deletes) {
            self.check(key)?;
        }
        self.inner.batch_apply(inserts, deletes)
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<StateScanIter<'_>, StateError> {
        if is_reserved(prefix) {
            self.check(prefix)?;
        }
        let grant = self.grant;
        let iter = self.inner.prefix_scan(prefix)?.filter(move |entry| match entry {
            Ok((key, _)) => Self::visible(grant, key),
            Err(_) => true,
        });
        Ok(Box::new(iter))
    }
}
