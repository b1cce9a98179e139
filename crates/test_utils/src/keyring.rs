// Path: crates/test_utils/src/keyring.rs
//! Deterministic secp256k1 keys and endorsement construction.

use endorse_api::crypto::DigestSigner;
use endorse_crypto::{keccak256, DigestBuilder, Secp256k1Signer};
use endorse_tx::build_endorsement_payload;
use endorse_types::app::{DigestInputs, EncodedEndorsement, ValidityWindow};

/// A signer whose secret key is `keccak256(label)`. The same label always
/// yields the same key.
#[allow(clippy::expect_used)]
pub fn signer(label: &str) -> Secp256k1Signer {
    Secp256k1Signer::from_secret_bytes(&keccak256(label.as_bytes()).0)
        .expect("keccak output is a valid secp256k1 scalar")
}

/// One signer per label, in order.
pub fn signers(labels: &[&str]) -> Vec<Secp256k1Signer> {
    labels.iter().map(|l| signer(l)).collect()
}

/// Signs the digest of `inputs` under `window` and `nonce` with every signer.
///
/// One signer yields a single-endorser payload, several yield a committee payload.
#[allow(clippy::expect_used)]
pub fn endorse(
    inputs: &DigestInputs,
    nonce: u64,
    window: ValidityWindow,
    by: &[&Secp256k1Signer],
) -> EncodedEndorsement {
    let digest = DigestBuilder::compute(inputs, &window, nonce);
    let signatures = by
        .iter()
        .map(|s| s.sign_digest(&digest).expect("signing a digest cannot fail"))
        .collect();
    build_endorsement_payload(
        nonce,
        window.valid_since,
        window.valid_by,
        by.iter().map(|s| s.address()).collect(),
        signatures,
    )
    .expect("at least one signer and a non-empty window")
}

#[cfg(test)]
mod tests {
    use super::*;
    use endorse_types::app::{Endorsement, EndorsementProof};

    #[test]
    fn labels_are_deterministic_and_distinct() {
        assert_eq!(signer("alice").address(), signer("alice").address());
        assert_ne!(signer("alice").address(), signer("bob").address());
    }

    #[test]
    fn single_signer_yields_single_proof() {
        let inputs = DigestInputs::new("function f()", vec![]);
        let window = ValidityWindow::new(0, 10).unwrap();
        let alice = signer("alice");
        let bytes = endorse(&inputs, 0, window, &[&alice]);
        let decoded = Endorsement::decode_payload(&bytes).unwrap();
        assert!(matches!(decoded.proof, EndorsementProof::Single { signer, .. } if signer == alice.address()));
    }

    #[test]
    fn several_signers_yield_committee_proof_in_order() {
        let inputs = DigestInputs::new("function f()", vec![]);
        let window = ValidityWindow::new(3, 9).unwrap();
        let (a, b) = (signer("a"), signer("b"));
        let bytes = endorse(&inputs, 4, window, &[&b, &a]);
        let decoded = Endorsement::decode_payload(&bytes).unwrap();
        assert_eq!(decoded.nonce, 4);
        assert_eq!(decoded.window, window);
        match decoded.proof {
            EndorsementProof::Committee { signers, signatures } => {
                assert_eq!(signers, vec![b.address(), a.address()]);
                assert_eq!(signatures.len(), 2);
            }
            other => panic!("expected a committee proof, got {other:?}"),
        }
    }
}
