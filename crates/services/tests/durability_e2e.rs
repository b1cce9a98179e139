// Path: crates/services/tests/durability_e2e.rs

mod common;

use anyhow::Result;
use common::*;
use endorse_api::crypto::DigestSigner;
use endorse_services::request::forward_batch_inputs;
use endorse_services::Forwarder;
use endorse_test_utils::{endorse, signers, ManualClock, TokenLedger};
use endorse_types::app::{CallDescriptor, ProposalState};
use endorse_types::config::ForwarderConfig;
use endorse_types::error::{EndorsementError, ForwarderError};
use std::path::Path;
use std::sync::Arc;

fn config(db: &Path, threshold: u32) -> Result<ForwarderConfig> {
    let members = signers(&["a", "b", "c"])
        .iter()
        .map(|s| format!("\"{}\"", s.address()))
        .collect::<Vec<_>>()
        .join(", ");
    let raw = format!(
        r#"
subject = "{SUBJECT}"
proposal_gate = "Open"

[eligibility]
mode = "Committee"
members = [{members}]
threshold = {threshold}

[storage]
path = "{}"
"#,
        db.display()
    );
    Ok(ForwarderConfig::from_toml_str(&raw)?)
}

#[test]
fn nonce_and_proposals_survive_a_restart() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let db = dir.path().join("forwarder.redb");
    let members = signers(&["a", "b", "c"]);
    let calls = vec![CallDescriptor::new(LEDGER, 0, 0, TokenLedger::mint_payload(SUBJECT, 3))];

    {
        let fwd = Forwarder::from_config(&config(&db, 2)?, router(), Arc::new(ManualClock::new(1)))?;
        let endorsement = endorse(&forward_batch_inputs(&calls)?, 0, window(), &[&members[0], &members[1]]);
        fwd.forward(&calls, &endorsement)?;
        fwd.create_proposal(SUBJECT, 0, vec![], None)?;
    }

    let fwd = Forwarder::from_config(&config(&db, 2)?, router(), Arc::new(ManualClock::new(1)))?;
    assert_eq!(fwd.current_nonce()?, 1);
    assert!(fwd.is_eligible_endorser(&members[2].address())?);
    let proposals = fwd.proposals()?;
    assert_eq!(proposals.len(), 1);
    assert_eq!(proposals[0].state, ProposalState::Created);
    let owner = fwd.with_state(|s| TokenLedger::new(LEDGER).owner_of(s, 3))??;
    assert_eq!(owner, Some(SUBJECT));

    // The replayed endorsement stays dead across the restart.
    let stale = endorse(&forward_batch_inputs(&calls)?, 0, window(), &[&members[0], &members[1]]);
    assert!(matches!(
        fwd.forward(&calls, &stale),
        Err(ForwarderError::Endorsement(EndorsementError::NonceMismatch { expected: 1, got: 0 }))
    ));
    Ok(())
}

#[test]
fn changed_eligibility_is_refused_on_restart() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let db = dir.path().join("forwarder.redb");
    drop(Forwarder::from_config(&config(&db, 2)?, router(), Arc::new(ManualClock::new(1)))?);

    let err = Forwarder::from_config(&config(&db, 3)?, router(), Arc::new(ManualClock::new(1)))
        .unwrap_err();
    assert!(matches!(err, ForwarderError::Config(_)));
    Ok(())
}
