// Path: crates/tx/src/system/nonce.rs

//! Per-subject replay nonces.
//!
//! A subject's nonce starts at 0 and only ever increases by one per accepted
//! endorsement. A missing record reads as 0.

use endorse_api::state::{read_canonical, write_canonical, StateAccess};
use endorse_types::app::Address;
use endorse_types::error::StateError;
use endorse_types::keys::nonce_key;
use tracing::debug;

/// Reads and advances replay nonces stored under `endorse::nonce::`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonceRegistry;

impl NonceRegistry {
    /// The current nonce of `subject`, 0 if it has never been advanced.
    pub fn current<S: StateAccess + ?Sized>(state: &S, subject: &Address) -> Result<u64, StateError> {
        Ok(read_canonical::<u64, _>(state, &nonce_key(subject))?.unwrap_or(0))
    }

    /// Writes an explicit 0 for `subject` if no record exists yet.
    pub fn initialize<S: StateAccess + ?Sized>(state: &mut S, subject: &Address) -> Result<(), StateError> {
        let key = nonce_key(subject);
        if state.get(&key)?.is_none() {
            write_canonical(state, &key, &0u64)?;
        }
        Ok(())
    }

    /// Increments the nonce of `subject` by exactly one and returns the new value.
    pub fn advance<S: StateAccess + ?Sized>(state: &mut S, subject: &Address) -> Result<u64, StateError> {
        let key = nonce_key(subject);
        let current = read_canonical::<u64, _>(state, &key)?.unwrap_or(0);
        let next = current
            .checked_add(1)
            .ok_or_else(|| StateError::InvalidValue(format!("nonce overflow for {subject}")))?;
        write_canonical(state, &key, &next)?;
        debug!(target: "nonce", %subject, from = current, to = next, "advanced nonce");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use endorse_storage::MemoryStore;

    const ALICE: Address = Address([0xa1; 20]);
    const BOB: Address = Address([0xb0; 20]);

    #[test]
    fn missing_record_reads_as_zero() {
        let store = MemoryStore::new();
        assert_eq!(NonceRegistry::current(&store, &ALICE).unwrap(), 0);
    }

    #[test]
    fn advance_increments_by_exactly_one() {
        let mut store = MemoryStore::new();
        assert_eq!(NonceRegistry::advance(&mut store, &ALICE).unwrap(), 1);
        assert_eq!(NonceRegistry::advance(&mut store, &ALICE).unwrap(), 2);
        assert_eq!(NonceRegistry::current(&store, &ALICE).unwrap(), 2);
    }

    #[test]
    fn subjects_are_independent() {
        let mut store = MemoryStore::new();
        NonceRegistry::advance(&mut store, &ALICE).unwrap();
        assert_eq!(NonceRegistry::current(&store, &BOB).unwrap(), 0);
    }

    #[test]
    fn initialize_does_not_reset_an_existing_nonce() {
        let mut store = MemoryStore::new();
        NonceRegistry::initialize(&mut store, &ALICE).unwrap();
        assert_eq!(NonceRegistry::current(&store, &ALICE).unwrap(), 0);
        NonceRegistry::advance(&mut store, &ALICE).unwrap();
        NonceRegistry::initialize(&mut store, &ALICE).unwrap();
        assert_eq!(NonceRegistry::current(&store, &ALICE).unwrap(), 1);
    }

    #[test]
    fn overflow_is_an_error_not_a_wrap() {
        let mut store = MemoryStore::new();
        write_canonical(&mut store, &nonce_key(&ALICE), &u64::MAX).unwrap();
        assert!(matches!(
            NonceRegistry::advance(&mut store, &ALICE),
            Err(StateError::InvalidValue(_))
        ));
        assert_eq!(NonceRegistry::current(&store, &ALICE).unwrap(), u64::MAX);
    }
}
