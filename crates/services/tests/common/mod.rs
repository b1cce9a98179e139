// Path: crates/services/tests/common/mod.rs
#![allow(dead_code)]

use endorse_api::crypto::DigestSigner;
use endorse_crypto::Secp256k1Signer;
use endorse_services::{CallRouter, Forwarder, OutboundCallable};
use endorse_storage::MemoryStore;
use endorse_test_utils::{
    signers, FailingCallable, GasReportingCallable, KeyWriter, ManualClock, TokenLedger,
};
use endorse_types::app::{Address, Committee, EligibilitySet, ValidityWindow};
use endorse_types::config::ProposalGate;
use std::sync::Arc;

pub const SUBJECT: Address = Address([0x5b; 20]);
pub const LEDGER: Address = Address([0x1e; 20]);
pub const METER: Address = Address([0x9a; 20]);
pub const FAILING: Address = Address([0xfa; 20]);
pub const BRIDGE: Address = Address([0xb7; 20]);
pub const RECIPIENT: Address = Address([0x7c; 20]);
pub const WRITER: Address = Address([0x3e; 20]);

pub const METER_GAS: u64 = 1_234;

pub fn router() -> CallRouter {
    CallRouter::new()
        .with(LEDGER, Arc::new(TokenLedger::new(LEDGER)))
        .with(METER, Arc::new(GasReportingCallable::new(METER_GAS)))
        .with(FAILING, Arc::new(FailingCallable::new("target rejected the call")))
        .with(BRIDGE, Arc::new(OutboundCallable::new("remote://settlement")))
        .with(WRITER, Arc::new(KeyWriter))
}

/// A generous window around the clock's starting ordinal.
pub fn window() -> ValidityWindow {
    ValidityWindow::new(0, 100).unwrap()
}

/// A committee of five labelled signers with threshold 3.
pub fn committee() -> (Vec<Secp256k1Signer>, EligibilitySet) {
    let members = signers(&["a", "b", "c", "d", "e"]);
    let set = EligibilitySet::Committee(
        Committee::new(members.iter().map(|s| s.address()), 3).unwrap(),
    );
    (members, set)
}

pub fn forwarder(
    eligibility: EligibilitySet,
    gate: ProposalGate,
    clock: Arc<ManualClock>,
) -> Forwarder<MemoryStore> {
    let fwd = Forwarder::new(MemoryStore::new(), SUBJECT, gate, router(), clock);
    fwd.initialize(eligibility).unwrap();
    fwd
}
