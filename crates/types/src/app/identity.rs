// Path: crates/types/src/app/identity.rs
//! Fixed-width identity and hash primitives.

use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Parses a hex string with an optional `0x` prefix into exactly `N` bytes.
fn parse_fixed_hex<const N: usize>(s: &str) -> Result<[u8; N], String> {
    let trimmed = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(trimmed).map_err(|e| format!("invalid hex: {e}"))?;
    <[u8; N]>::try_from(bytes.as_slice())
        .map_err(|_| format!("expected {} bytes, got {}", N, bytes.len()))
}

/// Implements `Display`, `Debug`, `FromStr` and string-form serde for a byte newtype.
macro_rules! hex_newtype {
    ($name:ident, $len:expr) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl FromStr for $name {
            type Err = String;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_fixed_hex::<$len>(s).map(Self)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }
    };
}

/// A 20-byte account identifier, derived from the tail of a Keccak-256 public key hash.
///
/// Addresses name endorsers, call targets and the forwarder subject whose nonce
/// is consumed.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(pub [u8; 20]);

hex_newtype!(Address, 20);

impl Address {
    /// The all-zero address.
    pub const ZERO: Address = Address([0u8; 20]);
}

/// A 32-byte Keccak-256 output.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Digest(pub [u8; 32]);

hex_newtype!(Digest, 32);

/// A recoverable ECDSA signature in `r || s || v` layout.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature(pub [u8; 65]);

hex_newtype!(Signature, 65);

impl Signature {
    /// The 64-byte `r || s` portion.
    pub fn compact(&self) -> &[u8] {
        self.0.get(..64).unwrap_or(&[])
    }

    /// The trailing recovery byte as carried on the wire (27/28 or 0/1).
    pub fn v(&self) -> u8 {
        let [.., v] = self.0;
        v
    }
}
