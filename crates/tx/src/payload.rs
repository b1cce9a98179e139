// Path: crates/tx/src/payload.rs
//! Assembly of the opaque endorsement payload a requester submits.

use endorse_types::app::{
    Address, EncodedEndorsement, Endorsement, EndorsementProof, Signature, ValidityWindow,
};
use endorse_types::error::EndorsementError;

/// Packs a nonce, a validity window and `(signer, signature)` pairs.
///
/// A single pair produces a single-endorser payload; two or more produce a
/// committee payload. The lists are paired by position.
pub fn build_endorsement_payload(
    nonce: u64,
    valid_since: u64,
    valid_by: u64,
    signers: Vec<Address>,
    signatures: Vec<Signature>,
) -> Result<EncodedEndorsement, EndorsementError> {
    if signers.len() != signatures.len() {
        return Err(EndorsementError::MalformedEndorsement(format!(
            "{} signers but {} signatures",
            signers.len(),
            signatures.len()
        )));
    }
    let window = ValidityWindow::new(valid_since, valid_by)?;
    let proof = match (signers.as_slice(), signatures.as_slice()) {
        ([], []) => {
            return Err(EndorsementError::MalformedEndorsement(
                "an endorsement needs at least one signature".into(),
            ))
        }
        ([signer], [signature]) => EndorsementProof::Single {
            signer: *signer,
            signature: *signature,
        },
        _ => EndorsementProof::Committee {
            signers,
            signatures,
        },
    };
    Endorsement {
        nonce,
        window,
        proof,
    }
    .encode_payload()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(b: u8) -> Signature {
        Signature([b; 65])
    }

    #[test]
    fn one_pair_builds_single_proof() {
        let bytes = build_endorsement_payload(4, 1, 9, vec![Address([1; 20])], vec![sig(7)]).unwrap();
        let decoded = Endorsement::decode_payload(&bytes).unwrap();
        assert_eq!(decoded.nonce, 4);
        assert_eq!(decoded.window, ValidityWindow::new(1, 9).unwrap());
        assert_eq!(
            decoded.proof,
            EndorsementProof::Single {
                signer: Address([1; 20]),
                signature: sig(7)
            }
        );
    }

    #[test]
    fn several_pairs_build_committee_proof() {
        let signers = vec![Address([1; 20]), Address([2; 20])];
        let bytes = build_endorsement_payload(0, 0, 0, signers.clone(), vec![sig(1), sig(2)]).unwrap();
        let decoded = Endorsement::decode_payload(&bytes).unwrap();
        assert!(matches!(decoded.proof, EndorsementProof::Committee { signers: s, .. } if s == signers));
    }

    #[test]
    fn rejects_mismatched_and_empty_inputs() {
        let err = build_endorsement_payload(0, 0, 1, vec![Address([1; 20])], vec![]).unwrap_err();
        assert!(matches!(err, EndorsementError::MalformedEndorsement(_)));
        let err = build_endorsement_payload(0, 0, 1, vec![], vec![]).unwrap_err();
        assert!(matches!(err, EndorsementError::MalformedEndorsement(_)));
    }

    #[test]
    fn rejects_inverted_window() {
        let err = build_endorsement_payload(0, 5, 4, vec![Address([1; 20])], vec![sig(1)]).unwrap_err();
        assert!(matches!(err, EndorsementError::MalformedEndorsement(_)));
    }
}
