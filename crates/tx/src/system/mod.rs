// Path: crates/tx/src/system/mod.rs
//! Core, non-optional checks applied before any batch runs.

pub mod nonce;
pub mod validation;
