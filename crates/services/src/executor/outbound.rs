// Path: crates/services/src/executor/outbound.rs
//! Cross-boundary dispatch through a transactional outbox.
//!
//! A call to a remote endpoint is not sent while the batch runs. It is
//! appended to the staged state as an [`OutboundMessage`], so it becomes
//! durable only if the batch commits. [`relay_outbox`] later hands committed
//! messages to a [`Transport`] in sequence order.

use endorse_api::execution::{CallContext, Callable, Transport};
use endorse_api::state::{read_canonical, write_canonical, StateAccess};
use endorse_types::app::{CallOutput, OutboundMessage, ResourceLimit};
use endorse_types::codec::from_bytes_canonical;
use endorse_types::error::{CallError, ForwarderError, StateError};
use endorse_types::keys::{outbox_key, OUTBOX_KEY_PREFIX, OUTBOX_NEXT_SEQ_KEY, OUTBOX_PREFIX};
use tracing::{debug, warn};

/// A callable that stands in for a target in another execution domain.
#[derive(Debug, Clone)]
pub struct OutboundCallable {
    endpoint: String,
}

impl OutboundCallable {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Callable for OutboundCallable {
    fn state_grant(&self) -> Option<&'static [u8]> {
        Some(OUTBOX_PREFIX)
    }

    fn dispatch(
        &self,
        ctx: &mut CallContext<'_>,
        payload: &[u8],
        value: u128,
        _gas_limit: ResourceLimit,
    ) -> Result<CallOutput, CallError> {
        let seq = read_canonical::<u64, _>(&*ctx.state, OUTBOX_NEXT_SEQ_KEY)?.unwrap_or(0);
        let next = seq
            .checked_add(1)
            .ok_or_else(|| CallError::Reverted("outbox sequence exhausted".into()))?;
        let message = OutboundMessage {
            seq,
            endpoint: self.endpoint.clone(),
            sender: ctx.caller,
            value,
            payload: payload.to_vec(),
        };
        write_canonical(&mut *ctx.state, &outbox_key(seq), &message)?;
        write_canonical(&mut *ctx.state, OUTBOX_NEXT_SEQ_KEY, &next)?;
        debug!(target: "outbox", seq, endpoint = %self.endpoint, "staged outbound message");
        Ok(CallOutput {
            data: seq.to_be_bytes().to_vec(),
            gas_used: 0,
        })
    }
}

/// Committed messages still waiting for delivery, in sequence order.
pub fn pending_outbox<S: StateAccess + ?Sized>(state: &S) -> Result<Vec<OutboundMessage>, StateError> {
    state
        .prefix_scan(OUTBOX_KEY_PREFIX)?
        .map(|entry| {
            let (_, bytes) = entry?;
            from_bytes_canonical(&bytes).map_err(StateError::Decode)
        })
        .collect()
}

/// Delivers committed messages in order, removing each once delivered.
///
/// Stops at the first transport failure. That message and everything after it
/// stay queued for the next relay. Returns the number delivered.
pub fn relay_outbox<S: StateAccess + ?Sized>(
    state: &mut S,
    transport: &dyn Transport,
) -> Result<usize, ForwarderError> {
    let pending = pending_outbox(&*state)?;
    let mut delivered = 0;
    for message in &pending {
        if let Err(e) = transport.deliver(message) {
            warn!(target: "outbox", seq = message.seq, error = %e, "relay interrupted");
            return Err(e.into());
        }
        state.delete(&outbox_key(message.seq))?;
        delivered += 1;
    }
    if delivered > 0 {
        debug!(target: "outbox", delivered, "relayed outbound messages");
    }
    Ok(delivered)
}
