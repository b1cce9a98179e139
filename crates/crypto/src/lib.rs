// Path: crates/crypto/src/lib.rs
//! # Endorse Crypto Crate Lints
//!
//! Panics are disallowed in non-test code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::indexing_slicing
    )
)]
//! # Endorse Cryptography
//!
//! The concrete suite behind endorsements: Keccak-256, secp256k1 recoverable
//! ECDSA with Ethereum-style addresses, the ABI parameter codec and the
//! endorsement digest construction.

pub mod abi;
pub mod digest;
pub mod hash;
pub mod sign;

pub use abi::AbiCodec;
pub use digest::{compute_digest, DigestBuilder};
pub use hash::keccak256;
pub use sign::ecdsa::{Secp256k1Scheme, Secp256k1Signer};
