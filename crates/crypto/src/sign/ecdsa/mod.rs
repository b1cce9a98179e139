// Path: crates/crypto/src/sign/ecdsa/mod.rs
//! secp256k1 recoverable ECDSA with Ethereum-style addresses.
//!
//! Signatures are 65 bytes, `r || s || v`, with `v` in {27, 28}. Inputs carrying
//! a raw recovery id of 0 or 1 are accepted as well. Digests are signed as-is.

use crate::hash::keccak256;
use endorse_api::crypto::{DigestSigner, SignatureScheme};
use endorse_types::app::{Address, Digest, Signature};
use endorse_types::error::CryptoError;
use ::secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use ::secp256k1::{All, Message, PublicKey, Secp256k1, SecretKey};

#[cfg(test)]
mod tests;

/// Derives the address of a public key: the last 20 bytes of the Keccak-256
/// hash of its uncompressed encoding, without the `0x04` tag.
pub fn address_from_public_key(public_key: &PublicKey) -> Address {
    let uncompressed = public_key.serialize_uncompressed();
    let (_, body) = uncompressed.split_at(1);
    let hash = keccak256(body);
    let (_, tail) = hash.0.split_at(12);
    let mut out = [0u8; 20];
    out.copy_from_slice(tail);
    Address(out)
}

fn recovery_id_from_v(v: u8) -> Result<RecoveryId, CryptoError> {
    let id = match v {
        27 | 28 => v - 27,
        0 | 1 => v,
        other => {
            return Err(CryptoError::InvalidSignature(format!(
                "unsupported recovery byte {other}"
            )))
        }
    };
    RecoveryId::from_i32(i32::from(id)).map_err(|e| CryptoError::InvalidSignature(e.to_string()))
}

/// Recovers signer addresses from secp256k1 signatures.
#[derive(Clone)]
pub struct Secp256k1Scheme {
    secp: Secp256k1<All>,
}

impl Default for Secp256k1Scheme {
    fn default() -> Self {
        Self {
            secp: Secp256k1::new(),
        }
    }
}

impl std::fmt::Debug for Secp256k1Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secp256k1Scheme")
    }
}

impl Secp256k1Scheme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recovers the full public key behind a signature.
    pub fn recover_public_key(
        &self,
        digest: &Digest,
        signature: &Signature,
    ) -> Result<PublicKey, CryptoError> {
        let rec_id = recovery_id_from_v(signature.v())?;
        let sig = RecoverableSignature::from_compact(signature.compact(), rec_id)
            .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
        let msg = Message::from_digest(digest.0);
        self.secp
            .recover_ecdsa(&msg, &sig)
            .map_err(|e| CryptoError::RecoveryFailed(e.to_string()))
    }
}

impl SignatureScheme for Secp256k1Scheme {
    fn recover(&self, digest: &Digest, signature: &Signature) -> Result<Address, CryptoError> {
        self.recover_public_key(digest, signature)
            .map(|pk| address_from_public_key(&pk))
    }
}

/// A local secp256k1 signing key.
pub struct Secp256k1Signer {
    secp: Secp256k1<All>,
    secret: SecretKey,
    address: Address,
}

impl std::fmt::Debug for Secp256k1Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secp256k1Signer")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl Secp256k1Signer {
    /// Loads a signer from a 32-byte secret scalar.
    pub fn from_secret_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let secret =
            SecretKey::from_slice(bytes).map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
        let secp = Secp256k1::new();
        let address = address_from_public_key(&PublicKey::from_secret_key(&secp, &secret));
        Ok(Self {
            secp,
            secret,
            address,
        })
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_secret_key(&self.secp, &self.secret)
    }
}

impl DigestSigner for Secp256k1Signer {
    fn address(&self) -> Address {
        self.address
    }

    fn sign_digest(&self, digest: &Digest) -> Result<Signature, CryptoError> {
        let msg = Message::from_digest(digest.0);
        let sig = self.secp.sign_ecdsa_recoverable(&msg, &self.secret);
        let (rec_id, compact) = sig.serialize_compact();
        let v = u8::try_from(rec_id.to_i32())
            .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
        let mut out = [0u8; 65];
        out.split_at_mut(64).0.copy_from_slice(&compact);
        if let Some(last) = out.last_mut() {
            *last = v + 27;
        }
        log::trace!("signed digest {} as {}", digest, self.address);
        Ok(Signature(out))
    }
}
