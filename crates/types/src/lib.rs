// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
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
//! # Endorse Types
//!
//! Plain data shared by every crate of the endorsement forwarder: identities,
//! endorsements, call descriptors, proposals, configuration and the error
//! taxonomy. Nothing in here performs I/O or cryptography.

/// Application-level data structures.
pub mod app;
/// The canonical SCALE codec used for everything persisted in state.
pub mod codec;
/// Forwarder configuration.
pub mod config;
/// Error types and their stable codes.
pub mod error;
/// State key layout.
pub mod keys;

/// A convenient result alias over the crate's top-level forwarder error.
pub type Result<T, E = error::ForwarderError> = std::result::Result<T, E>;
