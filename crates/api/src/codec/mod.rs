// Path: crates/api/src/codec/mod.rs
//! The parameter codec contract.

use endorse_types::app::{TypeTag, Value};
use endorse_types::error::CodecError;

/// Canonically encodes typed function parameters.
///
/// Implementations must be deterministic and injective over well-typed input:
/// two distinct `(types, values)` pairs never produce the same bytes.
pub trait ParameterCodec: Send + Sync {
    /// Encodes `values` against the declared `types`.
    fn encode(&self, types: &[TypeTag], values: &[Value]) -> Result<Vec<u8>, CodecError>;

    /// Decodes `bytes` back into values of the declared `types`.
    fn decode(&self, types: &[TypeTag], bytes: &[u8]) -> Result<Vec<Value>, CodecError>;
}
