// Path: crates/services/src/lib.rs
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

//! # Endorse Services
//!
//! The stateful half of the forwarder: durable proposals, the atomic call
//! executor with its transactional outbox, and the [`Forwarder`] that puts
//! endorsement verification in front of both.

pub mod executor;
pub mod forwarder;
pub mod proposal;

pub use executor::{CallExecutor, CallRouter, OutboundCallable};
pub use forwarder::request;
pub use forwarder::Forwarder;
pub use proposal::ProposalStore;
