// Path: crates/test_utils/src/callables.rs
//! Callables and transports with predictable behavior.

use endorse_api::execution::{CallContext, Callable, Transport};
use endorse_api::state::{read_canonical, write_canonical, StateAccess};
use endorse_types::app::{Address, CallOutput, OutboundMessage, ResourceLimit};
use endorse_types::error::{CallError, StateError, TransportError};
use parity_scale_codec::{Decode, Encode};
use std::sync::Mutex;

/// Resource cost reported for a mint.
pub const MINT_GAS: u64 = 50_000;
/// Resource cost reported for a transfer.
pub const TRANSFER_GAS: u64 = 30_000;

/// The SCALE-encoded payloads a [`TokenLedger`] understands.
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub enum LedgerCall {
    Mint { to: Address, token_id: u64 },
    Transfer { from: Address, to: Address, token_id: u64 },
}

/// A unique-token ledger that keeps ownership in the batch's staged state.
///
/// Transfers must be issued by the current owner, i.e. `ctx.caller` must own
/// the token, which lets tests check that batches run as the forwarder subject.
#[derive(Debug, Clone)]
pub struct TokenLedger {
    address: Address,
}

impl TokenLedger {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    fn owner_key(&self, token_id: u64) -> Vec<u8> {
        [
            b"ledger::".as_slice(),
            self.address.as_ref(),
            b"::owner::",
            &token_id.to_be_bytes(),
        ]
        .concat()
    }

    /// Reads the owner of `token_id` from committed or staged state.
    pub fn owner_of(&self, state: &dyn StateAccess, token_id: u64) -> Result<Option<Address>, StateError> {
        read_canonical(state, &self.owner_key(token_id))
    }

    pub fn mint_payload(to: Address, token_id: u64) -> Vec<u8> {
        LedgerCall::Mint { to, token_id }.encode()
    }

    pub fn transfer_payload(from: Address, to: Address, token_id: u64) -> Vec<u8> {
        LedgerCall::Transfer { from, to, token_id }.encode()
    }
}

impl Callable for TokenLedger {
    fn dispatch(
        &self,
        ctx: &mut CallContext<'_>,
        payload: &[u8],
        value: u128,
        _gas_limit: ResourceLimit,
    ) -> Result<CallOutput, CallError> {
        if value != 0 {
            return Err(CallError::Reverted("ledger is not payable".into()));
        }
        let call = LedgerCall::decode(&mut &*payload)
            .map_err(|e| CallError::Reverted(format!("bad ledger payload: {e}")))?;
        match call {
            LedgerCall::Mint { to, token_id } => {
                let key = self.owner_key(token_id);
                if read_canonical::<Address, _>(&*ctx.state, &key)?.is_some() {
                    return Err(CallError::Reverted(format!("token {token_id} already minted")));
                }
                write_canonical(&mut *ctx.state, &key, &to)?;
                Ok(CallOutput {
                    data: token_id.to_be_bytes().to_vec(),
                    gas_used: MINT_GAS,
                })
            }
            LedgerCall::Transfer { from, to, token_id } => {
                let key = self.owner_key(token_id);
                let owner = read_canonical::<Address, _>(&*ctx.state, &key)?;
                if owner != Some(from) || ctx.caller != from {
                    return Err(CallError::Reverted(format!(
                        "{} may not transfer token {token_id}",
                        ctx.caller
                    )));
                }
                write_canonical(&mut *ctx.state, &key, &to)?;
                Ok(CallOutput {
                    data: Vec::new(),
                    gas_used: TRANSFER_GAS,
                })
            }
        }
    }
}

/// Always reverts with a fixed reason.
#[derive(Debug, Clone)]
pub struct FailingCallable {
    reason: String,
}

impl FailingCallable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Callable for FailingCallable {
    fn dispatch(
        &self,
        ctx: &mut CallContext<'_>,
        _payload: &[u8],
        _value: u128,
        _gas_limit: ResourceLimit,
    ) -> Result<CallOutput, CallError> {
        // Leave a staged write behind so rollback is observable.
        ctx.state.insert(b"failing::touched", &[1])?;
        Err(CallError::Reverted(self.reason.clone()))
    }
}

/// Records the payload under `reported::<index>` and reports a fixed consumption.
#[derive(Debug, Clone)]
pub struct GasReportingCallable {
    gas: u64,
}

impl GasReportingCallable {
    pub fn new(gas: u64) -> Self {
        Self { gas }
    }

    pub fn record_key(index: usize) -> Vec<u8> {
        format!("reported::{index}").into_bytes()
    }
}

impl Callable for GasReportingCallable {
    fn dispatch(
        &self,
        ctx: &mut CallContext<'_>,
        payload: &[u8],
        _value: u128,
        _gas_limit: ResourceLimit,
    ) -> Result<CallOutput, CallError> {
        ctx.state.insert(&Self::record_key(ctx.index), payload)?;
        Ok(CallOutput {
            data: payload.to_vec(),
            gas_used: self.gas,
        })
    }
}

/// Writes an arbitrary key. The payload is the SCALE encoding of `(key, value)`.
#[derive(Debug, Clone, Default)]
pub struct KeyWriter;

impl KeyWriter {
    pub fn payload(key: &[u8], value: &[u8]) -> Vec<u8> {
        (key.to_vec(), value.to_vec()).encode()
    }
}

impl Callable for KeyWriter {
    fn dispatch(
        &self,
        ctx: &mut CallContext<'_>,
        payload: &[u8],
        _value: u128,
        _gas_limit: ResourceLimit,
    ) -> Result<CallOutput, CallError> {
        let (key, value) = <(Vec<u8>, Vec<u8>)>::decode(&mut &*payload)
            .map_err(|e| CallError::Reverted(format!("bad key-writer payload: {e}")))?;
        ctx.state.insert(&key, &value)?;
        Ok(CallOutput {
            data: Vec::new(),
            gas_used: 0,
        })
    }
}

/// Collects delivered messages; optionally fails on one sequence number.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    delivered: Mutex<Vec<OutboundMessage>>,
    fail_on: Option<u64>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(seq: u64) -> Self {
        Self {
            delivered: Mutex::new(Vec::new()),
            fail_on: Some(seq),
        }
    }

    pub fn delivered(&self) -> Vec<OutboundMessage> {
        self.delivered
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Transport for RecordingTransport {
    fn deliver(&self, message: &OutboundMessage) -> Result<(), TransportError> {
        if self.fail_on == Some(message.seq) {
            return Err(TransportError {
                seq: message.seq,
                reason: "endpoint unavailable".into(),
            });
        }
        self.delivered
            .lock()
            .map_err(|_| TransportError {
                seq: message.seq,
                reason: "recorder poisoned".into(),
            })?
            .push(message.clone());
        Ok(())
    }
}
