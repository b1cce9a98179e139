// Path: crates/api/src/state/tests/mod.rs
use crate::state::{
    read_canonical, write_canonical, ScopedState, StateAccess, StateOverlay, StateScanIter,
};
use endorse_types::error::StateError;
use endorse_types::keys::OUTBOX_PREFIX;
use std::collections::BTreeMap;
use std::sync::Arc;

// A minimal ordered store used as the overlay's base.
#[derive(Debug, Clone, Default)]
struct MockState {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl StateAccess for MockState {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        Ok(self.data.get(key).cloned())
    }

    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
        self.data.remove(key);
        Ok(())
    }

    fn batch_set(&mut self, updates: &[(Vec<u8>, Vec<u8>)]) -> Result<(), StateError> {
        for (key, value) in updates {
            self.insert(key, value)?;
        }
        Ok(())
    }

    fn batch_get(&self, keys: &[Vec<u8>]) -> Result<Vec<Option<Vec<u8>>>, StateError> {
        keys.iter().map(|k| self.get(k)).collect()
    }

    fn batch_apply(
        &mut self,
        inserts: &[(Vec<u8>, Vec<u8>)],
        deletes: &[Vec<u8>],
    ) -> Result<(), StateError> {
        for key in deletes {
            self.delete(key)?;
        }
        for (key, value) in inserts {
            self.insert(key, value)?;
        }
        Ok(())
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<StateScanIter<'_>, StateError> {
        let items: Vec<_> = self
            .data
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| Ok((Arc::from(k.as_slice()), Arc::from(v.as_slice()))))
            .collect();
        Ok(Box::new(items.into_iter()))
    }
}

fn collect(iter: StateScanIter<'_>) -> Vec<(Vec<u8>, Vec<u8>)> {
    iter.map(|r| {
        let (k, v) = r.unwrap();
        (k.to_vec(), v.to_vec())
    })
    .collect()
}

#[test]
fn overlay_reads_through_and_shadows_base() {
    let mut base = MockState::default();
    base.insert(b"a", b"1").unwrap();
    base.insert(b"b", b"2").unwrap();

    let mut overlay = StateOverlay::new(&base);
    overlay.insert(b"b", b"20").unwrap();
    overlay.delete(b"a").unwrap();
    overlay.insert(b"c", b"3").unwrap();

    assert_eq!(overlay.get(b"a").unwrap(), None);
    assert_eq!(overlay.get(b"b").unwrap(), Some(b"20".to_vec()));
    assert_eq!(overlay.get(b"c").unwrap(), Some(b"3".to_vec()));
    // The base is untouched.
    assert_eq!(base.get(b"a").unwrap(), Some(b"1".to_vec()));
    assert_eq!(base.get(b"c").unwrap(), None);
}

#[test]
fn dropped_overlay_leaves_no_trace() {
    let base = MockState::default();
    {
        let mut overlay = StateOverlay::new(&base);
        overlay.insert(b"k", b"v").unwrap();
        assert_eq!(overlay.pending_writes(), 1);
    }
    assert!(base.data.is_empty());
}

#[test]
fn ordered_batch_applies_atomically_to_base() {
    let mut base = MockState::default();
    base.insert(b"gone", b"x").unwrap();

    let (inserts, deletes) = {
        let mut overlay = StateOverlay::new(&base);
        overlay.insert(b"z", b"26").unwrap();
        overlay.insert(b"m", b"13").unwrap();
        overlay.delete(b"gone").unwrap();
        overlay.into_ordered_batch()
    };
    assert_eq!(
        inserts,
        vec![
            (b"m".to_vec(), b"13".to_vec()),
            (b"z".to_vec(), b"26".to_vec())
        ]
    );
    assert_eq!(deletes, vec![b"gone".to_vec()]);

    base.batch_apply(&inserts, &deletes).unwrap();
    assert_eq!(base.get(b"gone").unwrap(), None);
    assert_eq!(base.get(b"m").unwrap(), Some(b"13".to_vec()));
}

#[test]
fn prefix_scan_merges_in_key_order() {
    let mut base = MockState::default();
    base.insert(b"p::1", b"base1").unwrap();
    base.insert(b"p::3", b"base3").unwrap();
    base.insert(b"p::4", b"base4").unwrap();
    base.insert(b"q::1", b"other").unwrap();

    let mut overlay = StateOverlay::new(&base);
    overlay.insert(b"p::2", b"new2").unwrap();
    overlay.insert(b"p::3", b"new3").unwrap();
    overlay.delete(b"p::4").unwrap();

    let got = collect(overlay.prefix_scan(b"p::").unwrap());
    assert_eq!(
        got,
        vec![
            (b"p::1".to_vec(), b"base1".to_vec()),
            (b"p::2".to_vec(), b"new2".to_vec()),
            (b"p::3".to_vec(), b"new3".to_vec()),
        ]
    );
}

#[test]
fn next_prefix_handles_saturated_bytes() {
    use crate::state::next_prefix;
    assert_eq!(next_prefix(b"ab"), Some(b"ac".to_vec()));
    assert_eq!(next_prefix(&[0x01, 0xFF]), Some(vec![0x02]));
    assert_eq!(next_prefix(&[0xFF, 0xFF]), None);
    assert_eq!(next_prefix(&[]), None);
}

#[test]
fn canonical_helpers_roundtrip_and_report_decode_errors() {
    let mut base = MockState::default();
    write_canonical(&mut base, b"n", &7u64).unwrap();
    assert_eq!(read_canonical::<u64, _>(&base, b"n").unwrap(), Some(7));
    assert_eq!(read_canonical::<u64, _>(&base, b"missing").unwrap(), None);

    base.insert(b"bad", &[1, 2]).unwrap();
    assert!(matches!(
        read_canonical::<u64, _>(&base, b"bad"),
        Err(StateError::Decode(_))
    ));
}

#[test]
fn scoped_view_refuses_reserved_keys() {
    let mut base = MockState::default();
    base.insert(b"endorse::nonce::x", &[1]).unwrap();
    base.insert(b"app::k", &[2]).unwrap();
    {
        let mut view = ScopedState::new(&mut base, None);
        assert_eq!(view.get(b"app::k").unwrap(), Some(vec![2]));
        view.insert(b"app::k2", &[3]).unwrap();

        assert!(matches!(view.get(b"endorse::nonce::x"), Err(StateError::ReservedKey(_))));
        assert!(matches!(view.insert(b"endorse::nonce::x", &[0]), Err(StateError::ReservedKey(_))));
        assert!(matches!(view.delete(b"endorse::nonce::x"), Err(StateError::ReservedKey(_))));
        assert!(matches!(
            view.batch_apply(&[(b"app::ok".to_vec(), vec![1])], &[b"endorse::eligibility".to_vec()]),
            Err(StateError::ReservedKey(_))
        ));
        assert!(matches!(
            view.batch_set(&[(b"endorse::proposal::next_id".to_vec(), vec![0])]),
            Err(StateError::ReservedKey(_))
        ));
        assert!(matches!(
            view.prefix_scan(b"endorse::nonce::"),
            Err(StateError::ReservedKey(_))
        ));
    }
    assert_eq!(base.get(b"endorse::nonce::x").unwrap(), Some(vec![1]));
    assert_eq!(base.get(b"app::k2").unwrap(), Some(vec![3]));
    assert_eq!(base.get(b"app::ok").unwrap(), None);
}

#[test]
fn scoped_view_allows_only_its_grant() {
    let mut base = MockState::default();
    let mut view = ScopedState::new(&mut base, Some(OUTBOX_PREFIX));
    view.insert(b"endorse::outbox::msg::1", &[9]).unwrap();
    assert_eq!(view.get(b"endorse::outbox::msg::1").unwrap(), Some(vec![9]));
    assert!(matches!(
        view.insert(b"endorse::nonce::x", &[0]),
        Err(StateError::ReservedKey(_))
    ));
    assert_eq!(collect(view.prefix_scan(b"endorse::outbox::").unwrap()).len(), 1);
}

#[test]
fn scoped_scan_skips_reserved_entries() {
    let mut base = MockState::default();
    base.insert(b"endorse::nonce::x", &[1]).unwrap();
    base.insert(b"endorse::outbox::msg::0", &[2]).unwrap();
    base.insert(b"env", &[3]).unwrap();

    let mut base_for_grant = base.clone();
    let view = ScopedState::new(&mut base, None);
    let keys: Vec<_> = collect(view.prefix_scan(b"en").unwrap())
        .into_iter()
        .map(|(k, _)| k)
        .collect();
    assert_eq!(keys, vec![b"env".to_vec()]);

    let granted = ScopedState::new(&mut base_for_grant, Some(OUTBOX_PREFIX));
    assert_eq!(collect(granted.prefix_scan(b"").unwrap()).len(), 2);
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Put(Vec<u8>, Vec<u8>),
        Del(Vec<u8>),
    }

    fn key() -> impl Strategy<Value = Vec<u8>> {
        prop::collection::vec(0u8..4, 1..4)
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (key(), prop::collection::vec(any::<u8>(), 0..4)).prop_map(|(k, v)| Op::Put(k, v)),
            key().prop_map(Op::Del),
        ]
    }

    proptest! {
        // Staging writes and committing them must match applying them directly.
        #[test]
        fn committed_overlay_matches_direct_application(
            seed in prop::collection::vec((key(), prop::collection::vec(any::<u8>(), 0..4)), 0..8),
            ops in prop::collection::vec(op(), 0..16),
        ) {
            let mut base = MockState::default();
            for (k, v) in &seed {
                base.insert(k, v).unwrap();
            }
            let mut direct = base.clone();
            for o in &ops {
                match o {
                    Op::Put(k, v) => direct.insert(k, v).unwrap(),
                    Op::Del(k) => direct.delete(k).unwrap(),
                }
            }

            let (inserts, deletes) = {
                let mut overlay = StateOverlay::new(&base);
                for o in &ops {
                    match o {
                        Op::Put(k, v) => overlay.insert(k, v).unwrap(),
                        Op::Del(k) => overlay.delete(k).unwrap(),
                    }
                }
                // The merged scan already shows the final picture.
                prop_assert_eq!(collect(overlay.prefix_scan(&[]).unwrap()), collect(direct.prefix_scan(&[]).unwrap()));
                overlay.into_ordered_batch()
            };
            base.batch_apply(&inserts, &deletes).unwrap();
            prop_assert_eq!(base.data, direct.data);
        }
    }
}
