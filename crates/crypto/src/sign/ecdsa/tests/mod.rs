// Path: crates/crypto/src/sign/ecdsa/tests/mod.rs
use super::*;

fn key_one() -> Secp256k1Signer {
    let mut sk = [0u8; 32];
    sk[31] = 1;
    Secp256k1Signer::from_secret_bytes(&sk).unwrap()
}

#[test]
fn test_known_address_derivation() {
    // The well-known address of secret key 0x...01.
    let signer = key_one();
    assert_eq!(
        signer.address().to_string(),
        "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
    );
}

#[test]
fn test_sign_recover_roundtrip() {
    let signer = key_one();
    let scheme = Secp256k1Scheme::new();
    let digest = keccak256(b"endorse me");

    let sig = signer.sign_digest(&digest).unwrap();
    assert!(sig.v() == 27 || sig.v() == 28);
    assert_eq!(scheme.recover(&digest, &sig).unwrap(), signer.address());
    assert!(scheme.verify(&digest, &sig, &signer.address()));
}

#[test]
fn test_signatures_are_deterministic() {
    let signer = key_one();
    let digest = keccak256(b"same input");
    assert_eq!(
        signer.sign_digest(&digest).unwrap(),
        signer.sign_digest(&digest).unwrap()
    );
}

#[test]
fn test_raw_recovery_id_is_accepted() {
    let signer = key_one();
    let scheme = Secp256k1Scheme::new();
    let digest = keccak256(b"legacy v");
    let mut sig = signer.sign_digest(&digest).unwrap();
    sig.0[64] -= 27;
    assert_eq!(scheme.recover(&digest, &sig).unwrap(), signer.address());
}

#[test]
fn test_bad_recovery_byte_is_rejected() {
    let signer = key_one();
    let scheme = Secp256k1Scheme::new();
    let digest = keccak256(b"bad v");
    let mut sig = signer.sign_digest(&digest).unwrap();
    sig.0[64] = 35;
    assert!(matches!(
        scheme.recover(&digest, &sig),
        Err(CryptoError::InvalidSignature(_))
    ));
}

#[test]
fn test_other_digest_recovers_someone_else() {
    let signer = key_one();
    let scheme = Secp256k1Scheme::new();
    let sig = signer.sign_digest(&keccak256(b"one")).unwrap();
    let other = keccak256(b"two");
    assert!(!scheme.verify(&other, &sig, &signer.address()));
}

#[test]
fn test_invalid_secret_is_rejected() {
    assert!(matches!(
        Secp256k1Signer::from_secret_bytes(&[0u8; 32]),
        Err(CryptoError::InvalidKey(_))
    ));
    assert!(Secp256k1Signer::from_secret_bytes(&[1u8; 31]).is_err());
}

#[test]
fn test_public_key_matches_address() {
    let signer = key_one();
    assert_eq!(address_from_public_key(&signer.public_key()), signer.address());
}

#[test]
fn test_signature_layout_is_r_s_v() {
    let signer = key_one();
    let digest = keccak256(b"layout");
    let sig = signer.sign_digest(&digest).unwrap();

    let secp = ::secp256k1::Secp256k1::new();
    let mut sk = [0u8; 32];
    sk[31] = 1;
    let secret = ::secp256k1::SecretKey::from_slice(&sk).unwrap();
    let expected = secp.sign_ecdsa_recoverable(&::secp256k1::Message::from_digest(digest.0), &secret);
    let (rec_id, compact) = expected.serialize_compact();

    assert_eq!(&sig.0[..64], &compact[..]);
    assert_eq!(sig.0[64], rec_id.to_i32() as u8 + 27);
}
