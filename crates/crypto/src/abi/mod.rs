// Path: crates/crypto/src/abi/mod.rs
//! Ethereum ABI head/tail encoding of function parameters.
//!
//! Static values occupy one 32-byte word in the head. Dynamic values
//! (`bytes`, `string`, `T[]`) leave an offset word in the head and are
//! appended to the tail as a length word followed by their padded content.

use crate::hash::u128_word;
use endorse_api::codec::ParameterCodec;
use endorse_types::app::{Address, TypeTag, Value};
use endorse_types::error::CodecError;

#[cfg(test)]
mod tests;

const WORD: usize = 32;

/// The ABI implementation of [`ParameterCodec`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AbiCodec;

impl ParameterCodec for AbiCodec {
    fn encode(&self, types: &[TypeTag], values: &[Value]) -> Result<Vec<u8>, CodecError> {
        if types.len() != values.len() {
            return Err(CodecError::ArityMismatch {
                types: types.len(),
                values: values.len(),
            });
        }
        let items: Vec<(&TypeTag, &Value)> = types.iter().zip(values.iter()).collect();
        encode_tuple(&items, 0)
    }

    fn decode(&self, types: &[TypeTag], bytes: &[u8]) -> Result<Vec<Value>, CodecError> {
        decode_tuple(types, bytes, 0)
    }
}

fn usize_word(n: usize) -> [u8; 32] {
    // usize always fits in u128 on supported targets.
    u128_word(n as u128)
}

fn padded(bytes: &[u8]) -> Vec<u8> {
    let mut out = usize_word(bytes.len()).to_vec();
    out.extend_from_slice(bytes);
    let rem = bytes.len() % WORD;
    if rem != 0 {
        out.resize(out.len() + (WORD - rem), 0);
    }
    out
}

fn encode_tuple(items: &[(&TypeTag, &Value)], index_base: usize) -> Result<Vec<u8>, CodecError> {
    let head_len = WORD * items.len();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();
    for (i, (ty, value)) in items.iter().enumerate() {
        let encoded = encode_single(ty, value, index_base + i)?;
        if ty.is_dynamic() {
            head.extend_from_slice(&usize_word(head_len + tail.len()));
            tail.extend(encoded);
        } else {
            head.extend(encoded);
        }
    }
    head.extend(tail);
    Ok(head)
}

fn encode_single(ty: &TypeTag, value: &Value, index: usize) -> Result<Vec<u8>, CodecError> {
    let mismatch = || CodecError::TypeMismatch {
        index,
        expected: ty.canonical_name(),
    };
    Ok(match (ty, value) {
        (TypeTag::Address, Value::Address(addr)) => {
            let mut word = vec![0u8; 12];
            word.extend_from_slice(&addr.0);
            word
        }
        (TypeTag::Uint256, Value::Uint(n)) => u128_word(*n).to_vec(),
        (TypeTag::Bool, Value::Bool(b)) => u128_word(u128::from(*b)).to_vec(),
        (TypeTag::Bytes32, Value::Word(w)) => w.to_vec(),
        (TypeTag::Bytes, Value::Bytes(b)) => padded(b),
        (TypeTag::String, Value::Str(s)) => padded(s.as_bytes()),
        (TypeTag::Array(inner), Value::Array(elems)) => {
            let items: Vec<(&TypeTag, &Value)> =
                elems.iter().map(|v| (inner.as_ref(), v)).collect();
            let mut out = usize_word(elems.len()).to_vec();
            out.extend(encode_tuple(&items, index)?);
            out
        }
        _ => return Err(mismatch()),
    })
}

fn read_word(data: &[u8], at: usize) -> Result<[u8; 32], CodecError> {
    let end = at
        .checked_add(WORD)
        .ok_or_else(|| CodecError::Decode("offset overflow".into()))?;
    let slice = data
        .get(at..end)
        .ok_or_else(|| CodecError::Decode(format!("word at {at} out of bounds")))?;
    let mut word = [0u8; 32];
    word.copy_from_slice(slice);
    Ok(word)
}

fn word_to_u128(word: &[u8; 32]) -> Result<u128, CodecError> {
    let (high, low) = word.split_at(16);
    if high.iter().any(|b| *b != 0) {
        return Err(CodecError::Decode("integer exceeds 128 bits".into()));
    }
    let mut buf = [0u8; 16];
    buf.copy_from_slice(low);
    Ok(u128::from_be_bytes(buf))
}

fn word_to_usize(word: &[u8; 32]) -> Result<usize, CodecError> {
    let n = word_to_u128(word)?;
    usize::try_from(n).map_err(|_| CodecError::Decode(format!("length {n} does not fit")))
}

fn read_dynamic_bytes(data: &[u8], at: usize) -> Result<Vec<u8>, CodecError> {
    let len = word_to_usize(&read_word(data, at)?)?;
    let start = at + WORD;
    let end = start
        .checked_add(len)
        .ok_or_else(|| CodecError::Decode("length overflow".into()))?;
    data.get(start..end)
        .map(<[u8]>::to_vec)
        .ok_or_else(|| CodecError::Decode(format!("{len} bytes at {start} out of bounds")))
}

fn decode_tuple(types: &[TypeTag], data: &[u8], base: usize) -> Result<Vec<Value>, CodecError> {
    let mut values = Vec::with_capacity(types.len());
    for (i, ty) in types.iter().enumerate() {
        let head_at = base + WORD * i;
        let value = if ty.is_dynamic() {
            let offset = word_to_usize(&read_word(data, head_at)?)?;
            let at = base
                .checked_add(offset)
                .ok_or_else(|| CodecError::Decode("offset overflow".into()))?;
            decode_single(ty, data, at)?
        } else {
            decode_single(ty, data, head_at)?
        };
        values.push(value);
    }
    Ok(values)
}

fn decode_single(ty: &TypeTag, data: &[u8], at: usize) -> Result<Value, CodecError> {
    match ty {
        TypeTag::Address => {
            let word = read_word(data, at)?;
            let (pad, body) = word.split_at(12);
            if pad.iter().any(|b| *b != 0) {
                return Err(CodecError::Decode("dirty address padding".into()));
            }
            let mut addr = [0u8; 20];
            addr.copy_from_slice(body);
            Ok(Value::Address(Address(addr)))
        }
        TypeTag::Uint256 => Ok(Value::Uint(word_to_u128(&read_word(data, at)?)?)),
        TypeTag::Bool => match word_to_u128(&read_word(data, at)?)? {
            0 => Ok(Value::Bool(false)),
            1 => Ok(Value::Bool(true)),
            other => Err(CodecError::Decode(format!("invalid bool {other}"))),
        },
        TypeTag::Bytes32 => Ok(Value::Word(read_word(data, at)?)),
        TypeTag::Bytes => Ok(Value::Bytes(read_dynamic_bytes(data, at)?)),
        TypeTag::String => {
            let raw = read_dynamic_bytes(data, at)?;
            String::from_utf8(raw)
                .map(Value::Str)
                .map_err(|e| CodecError::Decode(e.to_string()))
        }
        TypeTag::Array(inner) => {
            let len = word_to_usize(&read_word(data, at)?)?;
            // Every element needs at least one head word.
            if len.saturating_mul(WORD) > data.len() {
                return Err(CodecError::Decode(format!("array length {len} too large")));
            }
            let types = vec![inner.as_ref().clone(); len];
            decode_tuple(&types, data, at + WORD).map(Value::Array)
        }
    }
}
