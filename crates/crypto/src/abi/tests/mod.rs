// Path: crates/crypto/src/abi/tests/mod.rs
use super::*;

fn word(n: u8) -> Vec<u8> {
    let mut w = vec![0u8; 32];
    w[31] = n;
    w
}

#[test]
fn test_static_parameters_are_one_word_each() {
    let addr = Address([0x11; 20]);
    let bytes = AbiCodec
        .encode(
            &[TypeTag::Address, TypeTag::Uint256, TypeTag::Bool],
            &[Value::Address(addr), Value::Uint(5), Value::Bool(true)],
        )
        .unwrap();
    assert_eq!(bytes.len(), 96);
    assert_eq!(&bytes[..12], &[0u8; 12]);
    assert_eq!(&bytes[12..32], &addr.0);
    assert_eq!(&bytes[32..64], word(5).as_slice());
    assert_eq!(&bytes[64..96], word(1).as_slice());
}

#[test]
fn test_dynamic_bytes_use_head_offset_and_padded_tail() {
    let bytes = AbiCodec
        .encode(
            &[TypeTag::Uint256, TypeTag::Bytes],
            &[Value::Uint(5), Value::Bytes(b"abc".to_vec())],
        )
        .unwrap();
    let mut expected = word(5);
    expected.extend(word(64));
    expected.extend(word(3));
    let mut data = b"abc".to_vec();
    data.resize(32, 0);
    expected.extend(data);
    assert_eq!(bytes, expected);
}

#[test]
fn test_dynamic_array_of_static_elements() {
    let bytes = AbiCodec
        .encode(
            &[TypeTag::array_of(TypeTag::Uint256)],
            &[Value::Array(vec![Value::Uint(1), Value::Uint(2)])],
        )
        .unwrap();
    let mut expected = word(32);
    expected.extend(word(2));
    expected.extend(word(1));
    expected.extend(word(2));
    assert_eq!(bytes, expected);
}

#[test]
fn test_roundtrip_of_mixed_signature() {
    let types = vec![
        TypeTag::Address,
        TypeTag::Uint256,
        TypeTag::array_of(TypeTag::Address),
        TypeTag::array_of(TypeTag::Bytes32),
        TypeTag::String,
        TypeTag::array_of(TypeTag::Bytes),
    ];
    let values = vec![
        Value::Address(Address([0xaa; 20])),
        Value::Uint(u128::MAX),
        Value::Array(vec![
            Value::Address(Address([1; 20])),
            Value::Address(Address([2; 20])),
        ]),
        Value::Array(vec![Value::Word([9; 32])]),
        Value::Str("endorsed".into()),
        Value::Array(vec![Value::Bytes(vec![1, 2, 3]), Value::Bytes(vec![0xff; 40])]),
    ];
    let encoded = AbiCodec.encode(&types, &values).unwrap();
    assert_eq!(encoded.len() % 32, 0);
    assert_eq!(AbiCodec.decode(&types, &encoded).unwrap(), values);
}

#[test]
fn test_arity_mismatch_is_rejected() {
    let err = AbiCodec
        .encode(&[TypeTag::Uint256, TypeTag::Bool], &[Value::Uint(1)])
        .unwrap_err();
    assert_eq!(err, CodecError::ArityMismatch { types: 2, values: 1 });
}

#[test]
fn test_type_mismatch_names_the_parameter() {
    let err = AbiCodec
        .encode(
            &[TypeTag::Uint256, TypeTag::Address],
            &[Value::Uint(1), Value::Bool(false)],
        )
        .unwrap_err();
    assert_eq!(
        err,
        CodecError::TypeMismatch {
            index: 1,
            expected: "address".into()
        }
    );
}

#[test]
fn test_distinct_values_encode_distinctly() {
    let types = [TypeTag::array_of(TypeTag::Uint256)];
    let a = AbiCodec
        .encode(&types, &[Value::Array(vec![Value::Uint(1), Value::Uint(2)])])
        .unwrap();
    let b = AbiCodec
        .encode(&types, &[Value::Array(vec![Value::Uint(2), Value::Uint(1)])])
        .unwrap();
    let c = AbiCodec
        .encode(&types, &[Value::Array(vec![Value::Uint(1)])])
        .unwrap();
    assert_ne!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_decode_rejects_truncated_and_oversized_input() {
    let encoded = AbiCodec
        .encode(&[TypeTag::Bytes], &[Value::Bytes(vec![1; 10])])
        .unwrap();
    assert!(AbiCodec
        .decode(&[TypeTag::Bytes], &encoded[..encoded.len() - 32])
        .is_err());

    let mut huge = word(32);
    huge.extend(vec![0xff; 32]);
    assert!(AbiCodec
        .decode(&[TypeTag::array_of(TypeTag::Uint256)], &huge)
        .is_err());
}

#[test]
fn test_decode_rejects_dirty_address_padding() {
    let mut w = vec![0u8; 32];
    w[0] = 1;
    assert!(AbiCodec.decode(&[TypeTag::Address], &w).is_err());
}
