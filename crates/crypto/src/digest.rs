// Path: crates/crypto/src/digest.rs
//! Construction of the digest an endorsement signs.
//!
//! ```text
//! struct_hash     = keccak256(keccak256(function_signature) || packed_params)
//! validity_digest = keccak256(struct_hash || word(valid_since) || word(valid_by) || word(nonce))
//! ```
//!
//! Every bound field is a 32-byte big-endian word, so the layout is fixed-width
//! after the struct hash and no two distinct inputs share an encoding.

use crate::hash::{keccak256, keccak256_concat, u64_word};
use endorse_types::app::{Digest, DigestInputs, ValidityWindow};

/// Pure functions producing endorsement digests.
#[derive(Debug, Clone, Copy, Default)]
pub struct DigestBuilder;

impl DigestBuilder {
    /// Binds a function signature to its packed parameters.
    pub fn struct_hash(inputs: &DigestInputs) -> Digest {
        let fn_hash = keccak256(inputs.function_signature.as_bytes());
        keccak256_concat(&[&fn_hash.0, &inputs.packed_params])
    }

    /// Binds a struct hash to a validity window and a nonce.
    pub fn validity_digest(struct_hash: &Digest, valid_since: u64, valid_by: u64, nonce: u64) -> Digest {
        keccak256_concat(&[
            &struct_hash.0,
            &u64_word(valid_since),
            &u64_word(valid_by),
            &u64_word(nonce),
        ])
    }

    /// The digest an endorser signs for `inputs` under `window` and `nonce`.
    pub fn compute(inputs: &DigestInputs, window: &ValidityWindow, nonce: u64) -> Digest {
        Self::validity_digest(
            &Self::struct_hash(inputs),
            window.valid_since,
            window.valid_by,
            nonce,
        )
    }
}

/// Computes the endorsement digest from its raw parts.
pub fn compute_digest(
    function_signature: &str,
    packed_params: &[u8],
    valid_since: u64,
    valid_by: u64,
    nonce: u64,
) -> Digest {
    let inputs = DigestInputs::new(function_signature, packed_params.to_vec());
    DigestBuilder::validity_digest(&DigestBuilder::struct_hash(&inputs), valid_since, valid_by, nonce)
}
