// Path: crates/tx/src/system/validation.rs

//! Endorsement verification.
//!
//! Checks run cheapest first: nonce, then window, then signatures. A
//! rejection never touches state, so a failed verification can be retried
//! with a fresh endorsement at no cost.

use endorse_api::crypto::SignatureScheme;
use endorse_crypto::{DigestBuilder, Secp256k1Scheme};
use endorse_types::app::{Address, Committee, Digest, DigestInputs, EligibilitySet, Endorsement};
use endorse_types::error::EndorsementError;
use std::collections::BTreeSet;
use tracing::debug;

/// The result of a successful verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedEndorsement {
    /// The digest the signatures were checked against.
    pub digest: Digest,
    /// The signers whose signatures were accepted, in submission order.
    pub signers: Vec<Address>,
    /// The nonce the endorsement was bound to.
    pub nonce: u64,
}

/// Decides whether an endorsement authorizes a digest.
#[derive(Debug, Clone, Default)]
pub struct EndorsementVerifier<V: SignatureScheme = Secp256k1Scheme> {
    scheme: V,
}

impl<V: SignatureScheme> EndorsementVerifier<V> {
    pub fn new(scheme: V) -> Self {
        Self { scheme }
    }

    /// Verifies `endorsement` over `inputs`.
    ///
    /// `current_ordinal` is the caller's notion of "now" and `current_nonce`
    /// the subject's nonce as read from state.
    pub fn verify(
        &self,
        inputs: &DigestInputs,
        endorsement: &Endorsement,
        eligibility: &EligibilitySet,
        current_ordinal: u64,
        current_nonce: u64,
    ) -> Result<VerifiedEndorsement, EndorsementError> {
        if endorsement.nonce != current_nonce {
            return Err(EndorsementError::NonceMismatch {
                expected: current_nonce,
                got: endorsement.nonce,
            });
        }

        let window = &endorsement.window;
        if current_ordinal < window.valid_since {
            return Err(EndorsementError::NotYetValid {
                valid_since: window.valid_since,
                current: current_ordinal,
            });
        }
        if current_ordinal > window.valid_by {
            return Err(EndorsementError::Expired {
                valid_by: window.valid_by,
                current: current_ordinal,
            });
        }

        let digest = DigestBuilder::compute(inputs, window, endorsement.nonce);
        let signers = match eligibility {
            EligibilitySet::Single(endorser) => self.check_single(&digest, endorsement, endorser)?,
            EligibilitySet::Committee(committee) => {
                self.check_committee(&digest, endorsement, committee)?
            }
        };

        debug!(
            target: "endorse",
            %digest,
            nonce = endorsement.nonce,
            signers = signers.len(),
            "endorsement verified"
        );
        Ok(VerifiedEndorsement {
            digest,
            signers,
            nonce: endorsement.nonce,
        })
    }

    fn check_single(
        &self,
        digest: &Digest,
        endorsement: &Endorsement,
        endorser: &Address,
    ) -> Result<Vec<Address>, EndorsementError> {
        let pairs = endorsement.pairs()?;
        let [(signer, signature)] = pairs.as_slice() else {
            return Err(EndorsementError::InvalidSignature(format!(
                "single-endorser payload must carry exactly one signature, got {}",
                pairs.len()
            )));
        };
        if *signer != endorser {
            return Err(EndorsementError::InvalidSignature(format!(
                "signer {signer} is not the endorser {endorser}"
            )));
        }
        let recovered = self
            .scheme
            .recover(digest, signature)
            .map_err(|e| EndorsementError::InvalidSignature(e.to_string()))?;
        if recovered != *endorser {
            return Err(EndorsementError::InvalidSignature(format!(
                "signature recovers to {recovered}, expected {endorser}"
            )));
        }
        Ok(vec![*endorser])
    }

    fn check_committee(
        &self,
        digest: &Digest,
        endorsement: &Endorsement,
        committee: &Committee,
    ) -> Result<Vec<Address>, EndorsementError> {
        let threshold = committee.threshold();
        if threshold == 0 || threshold as usize > committee.members().len() {
            return Err(EndorsementError::InvalidEligibility(format!(
                "threshold {threshold} out of range for {} members",
                committee.members().len()
            )));
        }

        let pairs = endorsement.pairs()?;
        let mut seen: BTreeSet<Address> = BTreeSet::new();
        let mut accepted = Vec::with_capacity(pairs.len());
        for (signer, signature) in pairs {
            if !committee.contains(signer) {
                return Err(EndorsementError::IneligibleEndorser(*signer));
            }
            if !seen.insert(*signer) {
                return Err(EndorsementError::DuplicateSigner(*signer));
            }
            let recovered = self
                .scheme
                .recover(digest, signature)
                .map_err(|e| EndorsementError::InvalidSignature(e.to_string()))?;
            if recovered != *signer {
                return Err(EndorsementError::InvalidSignature(format!(
                    "signature recovers to {recovered}, claimed {signer}"
                )));
            }
            accepted.push(*signer);
        }

        let got = u32::try_from(accepted.len()).unwrap_or(u32::MAX);
        if got < threshold {
            return Err(EndorsementError::InsufficientEndorsers { got, threshold });
        }
        Ok(accepted)
    }
}
