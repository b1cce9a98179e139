// Path: crates/types/src/app/proposal.rs
//! Stored batch proposals.

use super::call::CallDescriptor;
use super::identity::Address;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A proposal identifier, unique and increasing within one store.
#[derive(
    Encode, Decode, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub struct ProposalId(pub u64);

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The lifecycle state of a proposal. `Executed` is terminal.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalState {
    Created,
    Executed,
}

/// A batch recorded for later execution.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    pub id: ProposalId,
    pub proposer: Address,
    /// The amount the proposer attached at creation.
    pub value: u128,
    pub calls: Vec<CallDescriptor>,
    pub state: ProposalState,
}

impl Proposal {
    pub fn is_executed(&self) -> bool {
        self.state == ProposalState::Executed
    }
}
