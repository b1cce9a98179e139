// Path: crates/crypto/src/sign/personal.rs
//! EIP-191 "personal message" hashing, for wallets that refuse to sign raw digests.

use crate::hash::keccak256_concat;
use endorse_api::crypto::{DigestSigner, SignatureScheme};
use endorse_types::app::{Address, Digest, Signature};
use endorse_types::error::CryptoError;

const PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n";

/// `keccak256("\x19Ethereum Signed Message:\n" || len(message) || message)`,
/// with the length written in decimal.
pub fn personal_message_digest(message: &[u8]) -> Digest {
    let len = message.len().to_string();
    keccak256_concat(&[PREFIX, len.as_bytes(), message])
}

/// Signs `message` under the personal-message prefix.
pub fn sign_personal_message(
    signer: &dyn DigestSigner,
    message: &[u8],
) -> Result<Signature, CryptoError> {
    signer.sign_digest(&personal_message_digest(message))
}

/// Recovers the signer of a personal message.
pub fn recover_personal_message(
    scheme: &dyn SignatureScheme,
    message: &[u8],
    signature: &Signature,
) -> Result<Address, CryptoError> {
    scheme.recover(&personal_message_digest(message), signature)
}
