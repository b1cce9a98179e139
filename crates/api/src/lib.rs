// Path: crates/api/src/lib.rs

//! # Endorse API Crate Lints
//!
//! Panics are disallowed in non-test code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
//! # Endorse API
//!
//! The seams of the forwarder. Concrete hashing, storage and dispatch live in
//! other crates and plug in through the traits defined here.

/// Sources of the monotonic ordinal that validity windows are measured against.
pub mod clock;
/// The parameter codec contract.
pub mod codec;
/// Signature recovery and signing contracts.
pub mod crypto;
/// Callables and the transport for cross-boundary messages.
pub mod execution;
/// Key-value state access and the copy-on-write overlay.
pub mod state;

/// Re-exports the error types used by the traits in this crate.
pub mod error {
    pub use endorse_types::error::*;
}
