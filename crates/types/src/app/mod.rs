// Path: crates/types/src/app/mod.rs
//! Core application-level data structures.

mod abi;
mod call;
mod endorsement;
mod identity;
mod proposal;
mod report;

pub use abi::{TypeTag, Value};
pub use call::{CallDescriptor, CallOutput, OutboundMessage, ResourceLimit};
pub use endorsement::{
    Committee, DigestInputs, EligibilitySet, EncodedEndorsement, Endorsement, EndorsementProof,
    ValidityWindow,
};
pub use identity::{Address, Digest, Signature};
pub use proposal::{Proposal, ProposalId, ProposalState};
pub use report::{AuthorizationPhase, CallReceipt, ExecutionReport};
