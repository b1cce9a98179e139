// Path: crates/test_utils/src/lib.rs
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

//! # Endorse Test Utilities
//!
//! Deterministic keys, endorsement builders, callables and transports for
//! exercising the forwarder without a real network or chain.

pub mod callables;
pub mod keyring;

pub use callables::{
    FailingCallable, GasReportingCallable, KeyWriter, RecordingTransport, TokenLedger,
};
pub use endorse_api::clock::ManualClock;
pub use keyring::{endorse, signer, signers};
