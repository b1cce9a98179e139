// Path: crates/services/src/forwarder/request.rs
//! The digest inputs each forwarder entry point binds an endorsement to.
//!
//! Requesters call these to build the exact digest the forwarder will
//! recompute, then collect signatures over it out of band.

use endorse_api::codec::ParameterCodec;
use endorse_crypto::{keccak256, AbiCodec};
use endorse_types::app::{Address, CallDescriptor, DigestInputs, ProposalId, TypeTag, Value};
use endorse_types::error::CodecError;

pub const FORWARD_BATCH_SIGNATURE: &str =
    "function forward(address[] _dests,uint256[] _values,uint256[] _gasLimits,bytes32[] _payloadHashes)";

pub const FORWARD_SINGLE_SIGNATURE: &str =
    "function forward(address _dest,uint256 _value,uint256 _gasLimit,bytes calldata _calldata)";

pub const CREATE_PROPOSAL_SIGNATURE: &str = "function createProposal(address _proposer,uint256 _value,address[] _dests,uint256[] _values,uint256[] _gasLimits,bytes32[] _payloadHashes)";

pub const EXECUTE_PROPOSAL_SIGNATURE: &str = "function executeProposal(uint256 _proposalId)";

fn batch_types() -> [TypeTag; 4] {
    [
        TypeTag::array_of(TypeTag::Address),
        TypeTag::array_of(TypeTag::Uint256),
        TypeTag::array_of(TypeTag::Uint256),
        TypeTag::array_of(TypeTag::Bytes32),
    ]
}

/// Splits a batch into the parallel `dests, values, gasLimits, payloadHashes` arrays.
fn batch_columns(calls: &[CallDescriptor]) -> [Value; 4] {
    let mut dests = Vec::with_capacity(calls.len());
    let mut values = Vec::with_capacity(calls.len());
    let mut gas_limits = Vec::with_capacity(calls.len());
    let mut hashes = Vec::with_capacity(calls.len());
    for call in calls {
        dests.push(Value::from(call.target));
        values.push(Value::from(call.value));
        gas_limits.push(Value::from(call.gas_limit.0));
        hashes.push(Value::from(keccak256(&call.payload)));
    }
    [
        Value::Array(dests),
        Value::Array(values),
        Value::Array(gas_limits),
        Value::Array(hashes),
    ]
}

/// The packed parameters of a batch `forward`.
pub fn forward_request_params(calls: &[CallDescriptor]) -> Result<Vec<u8>, CodecError> {
    AbiCodec.encode(&batch_types(), &batch_columns(calls))
}

pub fn forward_batch_inputs(calls: &[CallDescriptor]) -> Result<DigestInputs, CodecError> {
    Ok(DigestInputs::new(
        FORWARD_BATCH_SIGNATURE,
        forward_request_params(calls)?,
    ))
}

/// Single-call forwarding binds the payload through its hash.
pub fn forward_single_inputs(call: &CallDescriptor) -> Result<DigestInputs, CodecError> {
    let packed = AbiCodec.encode(
        &[
            TypeTag::Address,
            TypeTag::Uint256,
            TypeTag::Uint256,
            TypeTag::Bytes32,
        ],
        &[
            Value::from(call.target),
            Value::from(call.value),
            Value::from(call.gas_limit.0),
            Value::from(keccak256(&call.payload)),
        ],
    )?;
    Ok(DigestInputs::new(FORWARD_SINGLE_SIGNATURE, packed))
}

pub fn create_proposal_inputs(
    proposer: Address,
    value: u128,
    calls: &[CallDescriptor],
) -> Result<DigestInputs, CodecError> {
    let [dests, values, gas_limits, hashes] = batch_columns(calls);
    let [t_dests, t_values, t_gas, t_hashes] = batch_types();
    let packed = AbiCodec.encode(
        &[
            TypeTag::Address,
            TypeTag::Uint256,
            t_dests,
            t_values,
            t_gas,
            t_hashes,
        ],
        &[
            Value::from(proposer),
            Value::from(value),
            dests,
            values,
            gas_limits,
            hashes,
        ],
    )?;
    Ok(DigestInputs::new(CREATE_PROPOSAL_SIGNATURE, packed))
}

pub fn execute_proposal_inputs(id: ProposalId) -> Result<DigestInputs, CodecError> {
    let packed = AbiCodec.encode(&[TypeTag::Uint256], &[Value::from(id.0)])?;
    Ok(DigestInputs::new(EXECUTE_PROPOSAL_SIGNATURE, packed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use endorse_crypto::DigestBuilder;
    use endorse_types::app::ValidityWindow;

    fn call(b: u8) -> CallDescriptor {
        CallDescriptor::new(Address([b; 20]), u128::from(b), 21_000, vec![b; 3])
    }

    #[test]
    fn batch_params_round_trip_through_the_codec() {
        let calls = vec![call(1), call(2)];
        let packed = forward_request_params(&calls).unwrap();
        let decoded = AbiCodec.decode(&batch_types(), &packed).unwrap();
        assert_eq!(
            decoded[0],
            Value::Array(vec![Value::Address(Address([1; 20])), Value::Address(Address([2; 20]))])
        );
        assert_eq!(
            decoded[3],
            Value::Array(vec![
                Value::Word(keccak256(&[1; 3]).0),
                Value::Word(keccak256(&[2; 3]).0)
            ])
        );
    }

    #[test]
    fn payload_changes_change_the_digest() {
        let window = ValidityWindow::new(0, 10).unwrap();
        let a = forward_single_inputs(&call(1)).unwrap();
        let mut tweaked = call(1);
        tweaked.payload.push(0);
        let b = forward_single_inputs(&tweaked).unwrap();
        assert_ne!(
            DigestBuilder::compute(&a, &window, 0),
            DigestBuilder::compute(&b, &window, 0)
        );
    }

    #[test]
    fn single_and_batch_forms_are_domain_separated() {
        let window = ValidityWindow::new(0, 10).unwrap();
        let single = forward_single_inputs(&call(1)).unwrap();
        let batch = forward_batch_inputs(&[call(1)]).unwrap();
        assert_ne!(single.function_signature, batch.function_signature);
        assert_ne!(
            DigestBuilder::compute(&single, &window, 0),
            DigestBuilder::compute(&batch, &window, 0)
        );
    }

    #[test]
    fn proposal_inputs_bind_the_id() {
        let a = execute_proposal_inputs(ProposalId(0)).unwrap();
        let b = execute_proposal_inputs(ProposalId(1)).unwrap();
        assert_eq!(a.packed_params.len(), 32);
        assert_ne!(a.packed_params, b.packed_params);

        let created = create_proposal_inputs(Address([9; 20]), 1, &[call(1)]).unwrap();
        assert_eq!(created.function_signature, CREATE_PROPOSAL_SIGNATURE);
    }
}
