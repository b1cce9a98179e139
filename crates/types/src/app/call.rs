// Path: crates/types/src/app/call.rs
//! Call descriptors and the results of dispatching them.

use super::identity::Address;
use crate::error::ExecutionError;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// A per-call resource cap. Zero means the call runs without a cap.
#[derive(
    Encode, Decode, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default,
)]
pub struct ResourceLimit(pub u64);

impl ResourceLimit {
    pub const UNLIMITED: ResourceLimit = ResourceLimit(0);

    /// Returns the cap, or `None` when the call is uncapped.
    pub fn cap(&self) -> Option<u64> {
        (self.0 != 0).then_some(self.0)
    }
}

/// One element of a batch.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CallDescriptor {
    /// The callable that receives the payload.
    pub target: Address,
    /// The amount attached to the call.
    pub value: u128,
    /// The call's resource cap.
    pub gas_limit: ResourceLimit,
    /// The opaque bytes handed to the target.
    pub payload: Vec<u8>,
}

impl CallDescriptor {
    pub fn new(target: Address, value: u128, gas_limit: u64, payload: Vec<u8>) -> Self {
        Self {
            target,
            value,
            gas_limit: ResourceLimit(gas_limit),
            payload,
        }
    }

    /// Zips four parallel sequences into descriptors, rejecting unequal lengths.
    pub fn batch_from_parallel(
        targets: Vec<Address>,
        values: Vec<u128>,
        gas_limits: Vec<u64>,
        payloads: Vec<Vec<u8>>,
    ) -> Result<Vec<Self>, ExecutionError> {
        let n = targets.len();
        if values.len() != n || gas_limits.len() != n || payloads.len() != n {
            return Err(ExecutionError::MismatchedBatchLengths {
                targets: n,
                values: values.len(),
                gas_limits: gas_limits.len(),
                payloads: payloads.len(),
            });
        }
        Ok(targets
            .into_iter()
            .zip(values)
            .zip(gas_limits)
            .zip(payloads)
            .map(|(((target, value), gas), payload)| Self::new(target, value, gas, payload))
            .collect())
    }
}

/// What a callable returns on success.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct CallOutput {
    pub data: Vec<u8>,
    pub gas_used: u64,
}

/// A message destined for another execution domain, held in state until relayed.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Monotonic sequence number assigned at enqueue time.
    pub seq: u64,
    /// The logical remote endpoint.
    pub endpoint: String,
    /// The local identity that caused the message.
    pub sender: Address,
    /// The amount attached to the originating call.
    pub value: u128,
    pub payload: Vec<u8>,
}
