// Path: crates/types/src/keys/mod.rs
//! Defines constants and helpers for the forwarder's state key layout.
//!
//! Every key lives under the `endorse::` namespace so a forwarder can share a
//! backing store with other components without collisions.

use crate::app::{Address, ProposalId};

/// The namespace owned by the forwarder itself. Dispatched calls may not touch
/// it unless granted a sub-prefix.
pub const RESERVED_PREFIX: &[u8] = b"endorse::";
/// The state key for the persisted eligibility set (single endorser or committee).
pub const ELIGIBILITY_KEY: &[u8] = b"endorse::eligibility";
/// The state key prefix for per-subject replay nonces.
pub const NONCE_PREFIX: &[u8] = b"endorse::nonce::";
/// The state key for the next available proposal identifier.
pub const PROPOSAL_NEXT_ID_KEY: &[u8] = b"endorse::proposal::next_id";
/// The state key prefix for stored proposals.
pub const PROPOSAL_KEY_PREFIX: &[u8] = b"endorse::proposal::record::";
/// The sub-namespace holding the outbox, granted to cross-boundary callables.
pub const OUTBOX_PREFIX: &[u8] = b"endorse::outbox::";
/// The state key for the next outbound message sequence number.
pub const OUTBOX_NEXT_SEQ_KEY: &[u8] = b"endorse::outbox::next_seq";
/// The state key prefix for outbound messages awaiting relay.
pub const OUTBOX_KEY_PREFIX: &[u8] = b"endorse::outbox::msg::";

/// Builds the nonce key for a subject.
pub fn nonce_key(subject: &Address) -> Vec<u8> {
    [NONCE_PREFIX, subject.as_ref()].concat()
}

/// Builds the record key for a proposal.
///
/// Identifiers are big-endian so a prefix scan yields proposals in creation order.
pub fn proposal_key(id: ProposalId) -> Vec<u8> {
    [PROPOSAL_KEY_PREFIX, &id.0.to_be_bytes()].concat()
}

/// Builds the key of an outbound message by its sequence number.
pub fn outbox_key(seq: u64) -> Vec<u8> {
    [OUTBOX_KEY_PREFIX, &seq.to_be_bytes()].concat()
}

/// Whether `key` lies in the forwarder's reserved namespace.
pub fn is_reserved(key: &[u8]) -> bool {
    key.starts_with(RESERVED_PREFIX)
}
