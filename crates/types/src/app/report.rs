// Path: crates/types/src/app/report.rs
//! Results reported back to callers of the forwarder.

use super::identity::Address;
use super::proposal::ProposalId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The per-call record of a successfully executed batch.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CallReceipt {
    pub index: usize,
    pub target: Address,
    pub gas_used: u64,
    pub output: Vec<u8>,
}

/// The outcome of a committed batch.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecutionReport {
    pub receipts: Vec<CallReceipt>,
    pub total_gas_used: u64,
    /// The nonce consumed by the endorsement that authorized this batch, if any.
    pub nonce_consumed: Option<u64>,
    /// Set when the batch came from a stored proposal.
    pub proposal_id: Option<ProposalId>,
}

impl ExecutionReport {
    pub fn calls_executed(&self) -> usize {
        self.receipts.len()
    }
}

/// Where a single authorization attempt currently stands.
///
/// Transitions are linear: `Pending -> Verified -> Consumed -> Executed`, and
/// any stage may drop to `Rejected`. A `Consumed` nonce stays consumed even
/// when the batch is then rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationPhase {
    Pending,
    Verified,
    Consumed,
    Executed,
    Rejected,
}

impl fmt::Display for AuthorizationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Consumed => "consumed",
            Self::Executed => "executed",
            Self::Rejected => "rejected",
        };
        f.write_str(s)
    }
}
