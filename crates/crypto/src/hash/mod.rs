// Path: crates/crypto/src/hash/mod.rs
//! Keccak-256, the only hash function endorsements use.

use endorse_types::app::Digest;
use sha3::{Digest as _, Keccak256};

/// Hashes `data` with Keccak-256.
pub fn keccak256(data: &[u8]) -> Digest {
    Digest(Keccak256::digest(data).into())
}

/// Hashes the concatenation of `parts` without allocating the joined buffer.
pub fn keccak256_concat(parts: &[&[u8]]) -> Digest {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    Digest(hasher.finalize().into())
}

/// Encodes a `u64` as a 32-byte big-endian word.
pub fn u64_word(n: u64) -> [u8; 32] {
    u128_word(u128::from(n))
}

/// Encodes a `u128` as a 32-byte big-endian word.
pub fn u128_word(n: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    for (dst, src) in word.iter_mut().rev().zip(n.to_le_bytes()) {
        *dst = src;
    }
    word
}
