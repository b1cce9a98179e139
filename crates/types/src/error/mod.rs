// Path: crates/types/src/error/mod.rs
//! Core error types for the endorsement forwarder.

use crate::app::{Address, ProposalId};
use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// How a caller should react to a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionClass {
    /// Re-request an endorsement for the current nonce or a wider window, then resubmit.
    Retryable,
    /// The endorsement or request itself is wrong and resubmitting it cannot succeed.
    Structural,
    /// Authorization succeeded but the batch failed.
    Batch,
    /// A storage or infrastructure failure unrelated to the request.
    Internal,
}

/// Errors related to the backing state store.
#[derive(Error, Debug)]
pub enum StateError {
    /// An error occurred in the state backend.
    #[error("State backend error: {0}")]
    Backend(String),
    /// An error occurred while writing to the state.
    #[error("State write error: {0}")]
    WriteError(String),
    /// The provided value was invalid.
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    /// An error occurred during state deserialization.
    #[error("Decode error: {0}")]
    Decode(String),
    /// A thread panicked while holding the state lock.
    #[error("State lock poisoned")]
    LockPoisoned,
    /// A dispatched call touched a key in the forwarder's reserved namespace.
    #[error("Access to reserved key denied: {0}")]
    ReservedKey(String),
}

impl ErrorCode for StateError {
    fn code(&self) -> &'static str {
        match self {
            Self::Backend(_) => "STATE_BACKEND_ERROR",
            Self::WriteError(_) => "STATE_WRITE_ERROR",
            Self::InvalidValue(_) => "STATE_INVALID_VALUE",
            Self::Decode(_) => "STATE_DECODE_ERROR",
            Self::LockPoisoned => "STATE_LOCK_POISONED",
            Self::ReservedKey(_) => "STATE_RESERVED_KEY",
        }
    }
}

/// Errors raised while checking an endorsement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EndorsementError {
    /// The endorsement was issued for a different nonce than the current one.
    #[error("Nonce mismatch. Expected {expected}, got {got}")]
    NonceMismatch {
        /// The current nonce of the subject.
        expected: u64,
        /// The nonce carried by the endorsement.
        got: u64,
    },
    /// The current ordinal precedes the endorsement's window.
    #[error("Endorsement not yet valid: valid since {valid_since}, current {current}")]
    NotYetValid { valid_since: u64, current: u64 },
    /// The current ordinal is past the endorsement's window.
    #[error("Endorsement expired: valid by {valid_by}, current {current}")]
    Expired { valid_by: u64, current: u64 },
    /// A signature did not recover to the claimed signer.
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
    /// A committee endorsement carried fewer distinct valid signatures than required.
    #[error("Insufficient endorsers: {got} of {threshold} required")]
    InsufficientEndorsers { got: u32, threshold: u32 },
    /// The same signer appeared twice.
    #[error("Duplicate signer {0}")]
    DuplicateSigner(Address),
    /// A signer is not in the eligibility set.
    #[error("Signer {0} is not an eligible endorser")]
    IneligibleEndorser(Address),
    /// The endorsement payload could not be decoded or is internally inconsistent.
    #[error("Malformed endorsement: {0}")]
    MalformedEndorsement(String),
    /// The eligibility set was never initialized.
    #[error("Eligibility set has not been initialized")]
    NotInitialized,
    /// The eligibility set was already initialized.
    #[error("Eligibility set is already initialized")]
    AlreadyInitialized,
    /// An eligibility set violates its own invariants.
    #[error("Invalid eligibility set: {0}")]
    InvalidEligibility(String),
}

impl EndorsementError {
    /// Classifies the rejection for callers.
    pub fn class(&self) -> RejectionClass {
        match self {
            Self::NonceMismatch { .. } | Self::NotYetValid { .. } | Self::Expired { .. } => {
                RejectionClass::Retryable
            }
            Self::NotInitialized | Self::AlreadyInitialized | Self::InvalidEligibility(_) => {
                RejectionClass::Internal
            }
            _ => RejectionClass::Structural,
        }
    }
}

impl ErrorCode for EndorsementError {
    fn code(&self) -> &'static str {
        match self {
            Self::NonceMismatch { .. } => "ENDORSE_NONCE_MISMATCH",
            Self::NotYetValid { .. } => "ENDORSE_NOT_YET_VALID",
            Self::Expired { .. } => "ENDORSE_EXPIRED",
            Self::InvalidSignature(_) => "ENDORSE_INVALID_SIGNATURE",
            Self::InsufficientEndorsers { .. } => "ENDORSE_INSUFFICIENT_ENDORSERS",
            Self::DuplicateSigner(_) => "ENDORSE_DUPLICATE_SIGNER",
            Self::IneligibleEndorser(_) => "ENDORSE_INELIGIBLE_ENDORSER",
            Self::MalformedEndorsement(_) => "ENDORSE_MALFORMED",
            Self::NotInitialized => "ENDORSE_NOT_INITIALIZED",
            Self::AlreadyInitialized => "ENDORSE_ALREADY_INITIALIZED",
            Self::InvalidEligibility(_) => "ENDORSE_INVALID_ELIGIBILITY",
        }
    }
}

/// Errors from the parameter codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The number of values differs from the number of declared types.
    #[error("Arity mismatch: {types} types, {values} values")]
    ArityMismatch { types: usize, values: usize },
    /// A value does not match its declared type.
    #[error("Type mismatch at parameter {index}: expected {expected}")]
    TypeMismatch { index: usize, expected: String },
    /// Input bytes could not be decoded against the declared types.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ErrorCode for CodecError {
    fn code(&self) -> &'static str {
        match self {
            Self::ArityMismatch { .. } => "CODEC_ARITY_MISMATCH",
            Self::TypeMismatch { .. } => "CODEC_TYPE_MISMATCH",
            Self::Decode(_) => "CODEC_DECODE_ERROR",
        }
    }
}

/// Errors from signing and recovery primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    #[error("Invalid signature encoding: {0}")]
    InvalidSignature(String),
    #[error("Public key recovery failed: {0}")]
    RecoveryFailed(String),
}

impl ErrorCode for CryptoError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidKey(_) => "CRYPTO_INVALID_KEY",
            Self::InvalidSignature(_) => "CRYPTO_INVALID_SIGNATURE",
            Self::RecoveryFailed(_) => "CRYPTO_RECOVERY_FAILED",
        }
    }
}

/// The reason a single call in a batch failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    /// No callable is registered at the target address.
    #[error("No callable registered at {0}")]
    TargetNotFound(Address),
    /// The callable rejected the call.
    #[error("Call reverted: {0}")]
    Reverted(String),
    /// The call consumed more than its resource limit.
    #[error("Out of gas: limit {limit}, used {used}")]
    OutOfGas { limit: u64, used: u64 },
    /// The call's state access failed.
    #[error("State access failed: {0}")]
    State(String),
}

impl From<StateError> for CallError {
    fn from(e: StateError) -> Self {
        Self::State(e.to_string())
    }
}

impl ErrorCode for CallError {
    fn code(&self) -> &'static str {
        match self {
            Self::TargetNotFound(_) => "CALL_TARGET_NOT_FOUND",
            Self::Reverted(_) => "CALL_REVERTED",
            Self::OutOfGas { .. } => "CALL_OUT_OF_GAS",
            Self::State(_) => "CALL_STATE_ERROR",
        }
    }
}

/// Errors from batch execution and the proposal store.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The call at `index` failed and the whole batch was discarded.
    #[error("Call {index} failed: {reason}")]
    CallFailed { index: usize, reason: CallError },
    /// The proposal has already been executed.
    #[error("Proposal {0} was already executed")]
    AlreadyExecuted(ProposalId),
    /// No proposal with this identifier exists.
    #[error("Proposal {0} not found")]
    ProposalNotFound(ProposalId),
    /// Parallel batch sequences had different lengths.
    #[error(
        "Mismatched batch lengths: {targets} targets, {values} values, {gas_limits} gas limits, {payloads} payloads"
    )]
    MismatchedBatchLengths {
        targets: usize,
        values: usize,
        gas_limits: usize,
        payloads: usize,
    },
    /// An error from the underlying state.
    #[error("State error: {0}")]
    State(#[from] StateError),
}

impl ExecutionError {
    pub fn class(&self) -> RejectionClass {
        match self {
            Self::CallFailed { .. } => RejectionClass::Batch,
            Self::AlreadyExecuted(_)
            | Self::ProposalNotFound(_)
            | Self::MismatchedBatchLengths { .. } => RejectionClass::Structural,
            Self::State(_) => RejectionClass::Internal,
        }
    }
}

impl ErrorCode for ExecutionError {
    fn code(&self) -> &'static str {
        match self {
            Self::CallFailed { .. } => "EXEC_CALL_FAILED",
            Self::AlreadyExecuted(_) => "EXEC_ALREADY_EXECUTED",
            Self::ProposalNotFound(_) => "EXEC_PROPOSAL_NOT_FOUND",
            Self::MismatchedBatchLengths { .. } => "EXEC_MISMATCHED_BATCH_LENGTHS",
            Self::State(_) => "EXEC_STATE_ERROR",
        }
    }
}

/// Errors from loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Errors from a transport relaying outbound messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Delivery of outbound message {seq} failed: {reason}")]
pub struct TransportError {
    pub seq: u64,
    pub reason: String,
}

/// The forwarder's top-level error.
#[derive(Error, Debug)]
pub enum ForwarderError {
    #[error(transparent)]
    Endorsement(#[from] EndorsementError),
    #[error(transparent)]
    Execution(#[from] ExecutionError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error("Codec error: {0}")]
    Codec(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<CodecError> for ForwarderError {
    fn from(e: CodecError) -> Self {
        Self::Codec(e.to_string())
    }
}

impl From<ConfigError> for ForwarderError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

impl ForwarderError {
    pub fn class(&self) -> RejectionClass {
        match self {
            Self::Endorsement(e) => e.class(),
            Self::Execution(e) => e.class(),
            Self::Codec(_) => RejectionClass::Structural,
            Self::State(_) | Self::Config(_) | Self::Transport(_) => RejectionClass::Internal,
        }
    }
}

impl ErrorCode for ForwarderError {
    fn code(&self) -> &'static str {
        match self {
            Self::Endorsement(e) => e.code(),
            Self::Execution(e) => e.code(),
            Self::State(e) => e.code(),
            Self::Codec(_) => "FORWARDER_CODEC_ERROR",
            Self::Config(_) => "FORWARDER_CONFIG_ERROR",
            Self::Transport(_) => "FORWARDER_TRANSPORT_ERROR",
        }
    }
}
