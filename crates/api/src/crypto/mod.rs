// Path: crates/api/src/crypto/mod.rs
//! Unified traits for the signature primitives endorsements rely on.

use endorse_types::app::{Address, Digest, Signature};
use endorse_types::error::CryptoError;

/// Recovers the signer of a digest.
pub trait SignatureScheme: Send + Sync {
    /// Returns the address whose key produced `signature` over `digest`.
    fn recover(&self, digest: &Digest, signature: &Signature) -> Result<Address, CryptoError>;

    /// Whether `signature` over `digest` was produced by `expected`.
    fn verify(&self, digest: &Digest, signature: &Signature, expected: &Address) -> bool {
        self.recover(digest, signature)
            .map(|who| &who == expected)
            .unwrap_or(false)
    }
}

/// Produces signatures over digests.
pub trait DigestSigner: Send + Sync {
    /// The address corresponding to this signer's key.
    fn address(&self) -> Address;

    /// Signs a 32-byte digest as-is.
    fn sign_digest(&self, digest: &Digest) -> Result<Signature, CryptoError>;
}
