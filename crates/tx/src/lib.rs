// Path: crates/tx/src/lib.rs
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

//! Replay protection and endorsement checks.
//!
//! `NonceRegistry` owns the per-subject counters, `EndorsementVerifier`
//! decides whether an endorsement authorizes a given digest, and
//! `build_endorsement_payload` assembles the opaque payload requesters submit.

pub mod payload;
pub mod system;

pub use payload::build_endorsement_payload;
pub use system::nonce::NonceRegistry;
pub use system::validation::{EndorsementVerifier, VerifiedEndorsement};
