// Path: crates/services/src/proposal/mod.rs
//! Durable proposal records.
//!
//! Identifiers come from a counter at `PROPOSAL_NEXT_ID_KEY`, starting at 0.
//! A proposal moves from `Created` to `Executed` once and never back.

use endorse_api::state::{read_canonical, write_canonical, StateAccess};
use endorse_types::app::{Address, CallDescriptor, Proposal, ProposalId, ProposalState};
use endorse_types::codec::from_bytes_canonical;
use endorse_types::error::{ExecutionError, StateError};
use endorse_types::keys::{proposal_key, PROPOSAL_KEY_PREFIX, PROPOSAL_NEXT_ID_KEY};
use tracing::{debug, warn};

/// Creates, reads and finalizes proposals stored under `endorse::proposal::`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProposalStore;

impl ProposalStore {
    fn next_id<S: StateAccess + ?Sized>(state: &mut S) -> Result<ProposalId, StateError> {
        let id = read_canonical::<u64, _>(state, PROPOSAL_NEXT_ID_KEY)?.unwrap_or(0);
        let next = id
            .checked_add(1)
            .ok_or_else(|| StateError::InvalidValue("proposal id space exhausted".into()))?;
        write_canonical(state, PROPOSAL_NEXT_ID_KEY, &next)?;
        Ok(ProposalId(id))
    }

    /// Stores a new proposal in state `Created` and returns its fresh id.
    pub fn create<S: StateAccess + ?Sized>(
        state: &mut S,
        proposer: Address,
        value: u128,
        calls: Vec<CallDescriptor>,
    ) -> Result<ProposalId, StateError> {
        let id = Self::next_id(state)?;
        let proposal = Proposal {
            id,
            proposer,
            value,
            calls,
            state: ProposalState::Created,
        };
        write_canonical(state, &proposal_key(id), &proposal)?;
        debug!(target: "proposal", %id, %proposer, calls = proposal.calls.len(), "created proposal");
        Ok(id)
    }

    pub fn get<S: StateAccess + ?Sized>(state: &S, id: ProposalId) -> Result<Proposal, ExecutionError> {
        read_canonical::<Proposal, _>(state, &proposal_key(id))?
            .ok_or(ExecutionError::ProposalNotFound(id))
    }

    /// Flips a proposal to `Executed`.
    ///
    /// Executing twice is an error, not a no-op.
    pub fn mark_executed<S: StateAccess + ?Sized>(
        state: &mut S,
        id: ProposalId,
    ) -> Result<(), ExecutionError> {
        let mut proposal = Self::get(&*state, id)?;
        if proposal.is_executed() {
            warn!(target: "proposal", %id, "proposal already executed");
            return Err(ExecutionError::AlreadyExecuted(id));
        }
        proposal.state = ProposalState::Executed;
        write_canonical(state, &proposal_key(id), &proposal)?;
        debug!(target: "proposal", %id, "marked proposal executed");
        Ok(())
    }

    /// All stored proposals in creation order.
    pub fn list<S: StateAccess + ?Sized>(state: &S) -> Result<Vec<Proposal>, StateError> {
        state
            .prefix_scan(PROPOSAL_KEY_PREFIX)?
            .map(|entry| {
                let (_, bytes) = entry?;
                from_bytes_canonical(&bytes).map_err(StateError::Decode)
            })
            .collect()
    }
}
