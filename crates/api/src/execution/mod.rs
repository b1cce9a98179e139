// Path: crates/api/src/execution/mod.rs
//! Targets that a batch dispatches to.

use crate::state::StateAccess;
use endorse_types::app::{Address, CallOutput, OutboundMessage, ResourceLimit};
use endorse_types::error::{CallError, TransportError};

/// Everything a callable may see and touch while handling one call.
pub struct CallContext<'a> {
    /// The staged state of the batch, seen through a [`ScopedState`](crate::state::ScopedState).
    /// Writes become durable only if the whole batch commits.
    pub state: &'a mut dyn StateAccess,
    /// The identity on whose behalf the batch runs.
    pub caller: Address,
    /// The address the call was routed to.
    pub target: Address,
    /// The position of the call in its batch.
    pub index: usize,
}

/// A dispatch target.
///
/// A callable either mutates the staged state directly or, for targets in
/// another execution domain, enqueues an outbound message into it. Returning
/// an error reverts the entire batch.
///
/// The forwarder's own records are out of reach: touching a key under
/// `endorse::` fails the call, except inside the prefix returned by
/// [`state_grant`](Self::state_grant).
pub trait Callable: Send + Sync {
    /// A reserved sub-namespace this callable may use. `None` for ordinary targets.
    fn state_grant(&self) -> Option<&'static [u8]> {
        None
    }

    fn dispatch(
        &self,
        ctx: &mut CallContext<'_>,
        payload: &[u8],
        value: u128,
        gas_limit: ResourceLimit,
    ) -> Result<CallOutput, CallError>;
}

/// Delivers committed outbound messages to their remote endpoint.
pub trait Transport: Send + Sync {
    fn deliver(&self, message: &OutboundMessage) -> Result<(), TransportError>;
}
