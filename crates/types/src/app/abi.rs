// Path: crates/types/src/app/abi.rs
//! Type tags and values understood by the parameter codec.

use super::identity::{Address, Digest};
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// The declared type of one function parameter.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum TypeTag {
    /// A 20-byte address, left-padded to one word.
    Address,
    /// An unsigned 256-bit integer. Values are carried as `u128`.
    Uint256,
    /// A boolean, encoded as a 0/1 word.
    Bool,
    /// A fixed 32-byte word.
    Bytes32,
    /// A dynamic byte string.
    Bytes,
    /// A dynamic UTF-8 string.
    String,
    /// A dynamic array of a single element type.
    Array(Box<TypeTag>),
}

impl TypeTag {
    /// Whether the type is encoded out-of-line behind an offset word.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Bytes | Self::String | Self::Array(_))
    }

    /// A shorthand for `T[]`.
    pub fn array_of(inner: TypeTag) -> Self {
        Self::Array(Box::new(inner))
    }

    /// The canonical Solidity-style name of the type.
    pub fn canonical_name(&self) -> String {
        match self {
            Self::Address => "address".into(),
            Self::Uint256 => "uint256".into(),
            Self::Bool => "bool".into(),
            Self::Bytes32 => "bytes32".into(),
            Self::Bytes => "bytes".into(),
            Self::String => "string".into(),
            Self::Array(inner) => format!("{}[]", inner.canonical_name()),
        }
    }
}

/// A concrete parameter value.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Address(Address),
    Uint(u128),
    Bool(bool),
    Word([u8; 32]),
    Bytes(Vec<u8>),
    Str(String),
    Array(Vec<Value>),
}

impl From<Address> for Value {
    fn from(a: Address) -> Self {
        Self::Address(a)
    }
}

impl From<Digest> for Value {
    fn from(d: Digest) -> Self {
        Self::Word(d.0)
    }
}

impl From<u128> for Value {
    fn from(n: u128) -> Self {
        Self::Uint(n)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::Uint(u128::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}
