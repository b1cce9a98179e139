// Path: crates/types/src/app/endorsement.rs
//! Endorsement payloads and the eligibility rules they are checked against.

use super::identity::{Address, Signature};
use crate::codec::{from_bytes_canonical, to_bytes_canonical};
use crate::error::EndorsementError;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The inclusive range of ordinals during which an endorsement may be accepted.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityWindow {
    /// The first ordinal at which the endorsement is valid.
    pub valid_since: u64,
    /// The last ordinal at which the endorsement is valid.
    pub valid_by: u64,
}

impl ValidityWindow {
    /// Creates a window, rejecting `valid_since > valid_by`.
    pub fn new(valid_since: u64, valid_by: u64) -> Result<Self, EndorsementError> {
        if valid_since > valid_by {
            return Err(EndorsementError::MalformedEndorsement(format!(
                "validity window is empty: since {valid_since} > by {valid_by}"
            )));
        }
        Ok(Self {
            valid_since,
            valid_by,
        })
    }

    /// Whether `ordinal` lies inside the window, both bounds inclusive.
    pub fn contains(&self, ordinal: u64) -> bool {
        self.valid_since <= ordinal && ordinal <= self.valid_by
    }
}

/// The signatures carried by an endorsement.
///
/// The variant tag is the discriminant of the encoded form: a single-endorser
/// payload and a committee payload can never be mistaken for one another.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum EndorsementProof {
    /// One endorser, one signature.
    Single {
        signer: Address,
        signature: Signature,
    },
    /// A committee endorsement. `signers[i]` produced `signatures[i]`.
    Committee {
        signers: Vec<Address>,
        signatures: Vec<Signature>,
    },
}

/// A decoded endorsement: replay nonce, validity window and signatures.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Endorsement {
    pub nonce: u64,
    pub window: ValidityWindow,
    pub proof: EndorsementProof,
}

impl Endorsement {
    /// Returns the `(signer, signature)` pairs in submission order.
    pub fn pairs(&self) -> Result<Vec<(&Address, &Signature)>, EndorsementError> {
        match &self.proof {
            EndorsementProof::Single { signer, signature } => Ok(vec![(signer, signature)]),
            EndorsementProof::Committee {
                signers,
                signatures,
            } => {
                if signers.len() != signatures.len() {
                    return Err(EndorsementError::MalformedEndorsement(format!(
                        "{} signers but {} signatures",
                        signers.len(),
                        signatures.len()
                    )));
                }
                Ok(signers.iter().zip(signatures.iter()).collect())
            }
        }
    }

    /// Encodes the endorsement into its opaque wire form.
    pub fn encode_payload(&self) -> Result<EncodedEndorsement, EndorsementError> {
        to_bytes_canonical(self)
            .map(EncodedEndorsement)
            .map_err(EndorsementError::MalformedEndorsement)
    }

    /// Decodes an endorsement from its wire form.
    ///
    /// An empty validity window is malformed, not merely outside the current ordinal.
    pub fn decode_payload(bytes: &EncodedEndorsement) -> Result<Self, EndorsementError> {
        let decoded: Self =
            from_bytes_canonical(&bytes.0).map_err(EndorsementError::MalformedEndorsement)?;
        ValidityWindow::new(decoded.window.valid_since, decoded.window.valid_by)?;
        Ok(decoded)
    }
}

/// An endorsement in its opaque, transportable byte form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedEndorsement(pub Vec<u8>);

impl AsRef<[u8]> for EncodedEndorsement {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A threshold committee. Construction guarantees `1 <= threshold <= members`.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Committee {
    members: BTreeSet<Address>,
    threshold: u32,
}

impl Committee {
    /// Creates a committee, rejecting empty memberships and out-of-range thresholds.
    pub fn new(
        members: impl IntoIterator<Item = Address>,
        threshold: u32,
    ) -> Result<Self, EndorsementError> {
        let members: BTreeSet<Address> = members.into_iter().collect();
        if members.is_empty() {
            return Err(EndorsementError::InvalidEligibility(
                "committee must have at least one member".into(),
            ));
        }
        let size = u32::try_from(members.len()).unwrap_or(u32::MAX);
        if threshold == 0 || threshold > size {
            return Err(EndorsementError::InvalidEligibility(format!(
                "threshold {threshold} out of range 1..={size}"
            )));
        }
        Ok(Self { members, threshold })
    }

    pub fn members(&self) -> &BTreeSet<Address> {
        &self.members
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn contains(&self, who: &Address) -> bool {
        self.members.contains(who)
    }
}

/// Who may endorse on behalf of a forwarder.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum EligibilitySet {
    /// Exactly one fixed endorser.
    Single(Address),
    /// A committee with a signature threshold.
    Committee(Committee),
}

impl EligibilitySet {
    /// Whether `who` may contribute a signature.
    pub fn is_eligible(&self, who: &Address) -> bool {
        match self {
            Self::Single(endorser) => endorser == who,
            Self::Committee(committee) => committee.contains(who),
        }
    }

    /// The number of distinct valid signatures required.
    pub fn threshold(&self) -> u32 {
        match self {
            Self::Single(_) => 1,
            Self::Committee(committee) => committee.threshold(),
        }
    }
}

/// The pieces an endorsement digest is computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestInputs {
    /// The canonical function signature text, e.g. `"function forward(...)"`.
    pub function_signature: String,
    /// The parameter-codec encoding of the call arguments.
    pub packed_params: Vec<u8>,
}

impl DigestInputs {
    pub fn new(function_signature: impl Into<String>, packed_params: Vec<u8>) -> Self {
        Self {
            function_signature: function_signature.into(),
            packed_params,
        }
    }
}
