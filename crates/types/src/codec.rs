// Path: crates/types/src/codec.rs

//! Canonical, deterministic binary codec for everything written to forwarder state.
//!
//! Thin wrappers around `parity-scale-codec` (SCALE). Nonces, proposals, the
//! eligibility record and outbound messages all go through these two functions
//! so that a value always has exactly one byte representation.

use parity_scale_codec::{Decode, DecodeAll, Encode};

/// Encodes a value into its canonical SCALE byte representation.
pub fn to_bytes_canonical<T: Encode>(v: &T) -> Result<Vec<u8>, String> {
    Ok(v.encode())
}

/// Decodes a value from canonical SCALE bytes.
///
/// Trailing bytes are rejected, so two different inputs never decode to the
/// same value.
pub fn from_bytes_canonical<T: Decode>(b: &[u8]) -> Result<T, String> {
    T::decode_all(&mut &*b).map_err(|e| format!("canonical decode failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[derive(Encode, Decode, Debug, PartialEq, Eq)]
    struct Record {
        id: u64,
        label: String,
        members: BTreeSet<[u8; 20]>,
    }

    #[test]
    fn test_canonical_codec_roundtrip() {
        let mut members = BTreeSet::new();
        members.insert([2u8; 20]);
        members.insert([1u8; 20]);
        let original = Record {
            id: 7,
            label: "committee".into(),
            members,
        };

        let encoded = to_bytes_canonical(&original).unwrap();
        let decoded: Record = from_bytes_canonical(&encoded).unwrap();
        assert_eq!(original, decoded);
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let mut encoded = to_bytes_canonical(&42u64).unwrap();
        encoded.push(0);
        let result: Result<u64, _> = from_bytes_canonical(&encoded);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_rejects_truncated_input() {
        let encoded = to_bytes_canonical(&42u64).unwrap();
        let result: Result<u64, _> = from_bytes_canonical(&encoded[..4]);
        assert!(result.unwrap_err().contains("canonical decode failed"));
    }
}
