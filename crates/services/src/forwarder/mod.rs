// Path: crates/services/src/forwarder/mod.rs
//! The endorsement forwarder.
//!
//! Each authorization attempt moves through
//! `Pending -> Verified -> Consumed -> Executed`, or ends in `Rejected` when
//! verification fails. The subject's nonce is consumed before the batch runs,
//! so an endorsement whose batch fails cannot be replayed against a different
//! call set.
//!
//! All state access happens under one lock, which serializes nonce
//! consumption, proposal creation and execution.

pub mod request;

use crate::executor::{self, CallExecutor, CallRouter};
use crate::proposal::ProposalStore;
use endorse_api::clock::OrdinalSource;
use endorse_api::execution::Transport;
use endorse_api::state::{read_canonical, write_canonical, StateAccess, StateOverlay};
use endorse_storage::AnyStore;
use endorse_telemetry::{authorization_metrics, error_metrics};
use endorse_tx::{EndorsementVerifier, NonceRegistry};
use endorse_types::app::{
    Address, AuthorizationPhase, CallDescriptor, DigestInputs, EligibilitySet, EncodedEndorsement,
    Endorsement, ExecutionReport, Proposal, ProposalId,
};
use endorse_types::config::{ForwarderConfig, ProposalGate};
use endorse_types::error::{EndorsementError, ErrorCode, ExecutionError, ForwarderError, StateError};
use endorse_types::keys::ELIGIBILITY_KEY;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Verifies endorsements for one subject and runs the batches they authorize.
pub struct Forwarder<S: StateAccess> {
    state: Mutex<S>,
    subject: Address,
    gate: ProposalGate,
    executor: CallExecutor,
    verifier: EndorsementVerifier,
    clock: Arc<dyn OrdinalSource>,
}

impl<S: StateAccess> fmt::Debug for Forwarder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Forwarder")
            .field("subject", &self.subject)
            .field("gate", &self.gate)
            .field("executor", &self.executor)
            .finish_non_exhaustive()
    }
}

impl Forwarder<AnyStore> {
    /// Opens the configured store and installs the configured eligibility set
    /// on first start.
    ///
    /// On later starts the persisted set wins, and a configured set that
    /// differs from it is a configuration error.
    pub fn from_config(
        config: &ForwarderConfig,
        router: CallRouter,
        clock: Arc<dyn OrdinalSource>,
    ) -> Result<Self, ForwarderError> {
        config.validate()?;
        let store = AnyStore::open(&config.storage)?;
        let forwarder = Self::new(store, config.subject, config.proposal_gate, router, clock);
        if let Some(configured) = config.eligibility_set()? {
            match forwarder.eligibility()? {
                None => forwarder.initialize(configured)?,
                Some(persisted) if persisted == configured => {}
                Some(_) => {
                    return Err(ForwarderError::Config(
                        "configured eligibility differs from the persisted set".into(),
                    ))
                }
            }
        }
        info!(
            target: "forwarder",
            subject = %config.subject,
            gate = ?config.proposal_gate,
            durable = config.storage.path.is_some(),
            "forwarder ready"
        );
        Ok(forwarder)
    }
}

impl<S: StateAccess> Forwarder<S> {
    pub fn new(
        state: S,
        subject: Address,
        gate: ProposalGate,
        router: CallRouter,
        clock: Arc<dyn OrdinalSource>,
    ) -> Self {
        Self {
            state: Mutex::new(state),
            subject,
            gate,
            executor: CallExecutor::new(router),
            verifier: EndorsementVerifier::default(),
            clock,
        }
    }

    pub fn subject(&self) -> Address {
        self.subject
    }

    pub fn proposal_gate(&self) -> ProposalGate {
        self.gate
    }

    fn lock(&self) -> Result<MutexGuard<'_, S>, StateError> {
        self.state.lock().map_err(|_| StateError::LockPoisoned)
    }

    /// Persists the eligibility set and the subject's initial nonce. Succeeds once.
    pub fn initialize(&self, eligibility: EligibilitySet) -> Result<(), ForwarderError> {
        if let EligibilitySet::Committee(committee) = &eligibility {
            let size = committee.members().len();
            if committee.threshold() == 0 || committee.threshold() as usize > size {
                return Err(EndorsementError::InvalidEligibility(format!(
                    "threshold {} out of range for {size} members",
                    committee.threshold()
                ))
                .into());
            }
        }
        let mut state = self.lock()?;
        if state.get(ELIGIBILITY_KEY)?.is_some() {
            return Err(EndorsementError::AlreadyInitialized.into());
        }
        let (inserts, deletes) = {
            let mut overlay = StateOverlay::new(&*state);
            write_canonical(&mut overlay, ELIGIBILITY_KEY, &eligibility)?;
            NonceRegistry::initialize(&mut overlay, &self.subject)?;
            overlay.into_ordered_batch()
        };
        state.batch_apply(&inserts, &deletes)?;
        info!(target: "forwarder", subject = %self.subject, threshold = eligibility.threshold(), "eligibility initialized");
        Ok(())
    }

    pub fn eligibility(&self) -> Result<Option<EligibilitySet>, ForwarderError> {
        let state = self.lock()?;
        Ok(read_canonical(&*state, ELIGIBILITY_KEY)?)
    }

    /// Whether `who` may sign endorsements. False before initialization.
    pub fn is_eligible_endorser(&self, who: &Address) -> Result<bool, ForwarderError> {
        Ok(self
            .eligibility()?
            .is_some_and(|set| set.is_eligible(who)))
    }

    /// The nonce the next endorsement for this subject must carry.
    pub fn current_nonce(&self) -> Result<u64, ForwarderError> {
        let state = self.lock()?;
        Ok(NonceRegistry::current(&*state, &self.subject)?)
    }

    /// Forwards a batch authorized by `endorsement`.
    pub fn forward(
        &self,
        calls: &[CallDescriptor],
        endorsement: &EncodedEndorsement,
    ) -> Result<ExecutionReport, ForwarderError> {
        let inputs = request::forward_batch_inputs(calls)?;
        let mut state = self.lock()?;
        let nonce = self.authorize(&mut *state, &inputs, endorsement)?;
        let mut report = self.run(&mut *state, calls, |_| Ok(()))?;
        report.nonce_consumed = Some(nonce);
        Ok(report)
    }

    /// Forwards one call authorized by `endorsement`.
    pub fn forward_single(
        &self,
        target: Address,
        value: u128,
        gas_limit: u64,
        payload: Vec<u8>,
        endorsement: &EncodedEndorsement,
    ) -> Result<ExecutionReport, ForwarderError> {
        let call = CallDescriptor::new(target, value, gas_limit, payload);
        let inputs = request::forward_single_inputs(&call)?;
        let mut state = self.lock()?;
        let nonce = self.authorize(&mut *state, &inputs, endorsement)?;
        let mut report = self.run(&mut *state, std::slice::from_ref(&call), |_| Ok(()))?;
        report.nonce_consumed = Some(nonce);
        Ok(report)
    }

    /// Stores a batch for later execution.
    ///
    /// Behind [`ProposalGate::Endorsed`] an endorsement over the proposal is
    /// required. Behind [`ProposalGate::Open`] any endorsement is ignored.
    pub fn create_proposal(
        &self,
        proposer: Address,
        value: u128,
        calls: Vec<CallDescriptor>,
        endorsement: Option<&EncodedEndorsement>,
    ) -> Result<ProposalId, ForwarderError> {
        let mut state = self.lock()?;
        if self.gate == ProposalGate::Endorsed {
            let inputs = request::create_proposal_inputs(proposer, value, &calls)?;
            let endorsement = Self::required(endorsement)?;
            self.authorize(&mut *state, &inputs, endorsement)?;
        }
        let (id, (inserts, deletes)) = {
            let mut overlay = StateOverlay::new(&*state);
            let id = ProposalStore::create(&mut overlay, proposer, value, calls)?;
            (id, overlay.into_ordered_batch())
        };
        state.batch_apply(&inserts, &deletes)?;
        info!(target: "forwarder", %id, %proposer, "proposal created");
        Ok(id)
    }

    /// Runs a stored proposal and marks it executed in the same commit.
    ///
    /// An unknown or already executed proposal is refused before any
    /// endorsement is consumed or any call dispatched.
    pub fn execute_proposal(
        &self,
        id: ProposalId,
        endorsement: Option<&EncodedEndorsement>,
    ) -> Result<ExecutionReport, ForwarderError> {
        let mut state = self.lock()?;
        let proposal = ProposalStore::get(&*state, id)?;
        if proposal.is_executed() {
            warn!(target: "forwarder", %id, "refusing to execute proposal twice");
            return Err(ExecutionError::AlreadyExecuted(id).into());
        }
        let nonce = if self.gate == ProposalGate::Endorsed {
            let inputs = request::execute_proposal_inputs(id)?;
            let endorsement = Self::required(endorsement)?;
            Some(self.authorize(&mut *state, &inputs, endorsement)?)
        } else {
            None
        };
        let mut report = self.run(&mut *state, &proposal.calls, |staged| {
            ProposalStore::mark_executed(staged, id)
        })?;
        report.nonce_consumed = nonce;
        report.proposal_id = Some(id);
        Ok(report)
    }

    pub fn proposal(&self, id: ProposalId) -> Result<Proposal, ForwarderError> {
        let state = self.lock()?;
        Ok(ProposalStore::get(&*state, id)?)
    }

    pub fn proposals(&self) -> Result<Vec<Proposal>, ForwarderError> {
        let state = self.lock()?;
        Ok(ProposalStore::list(&*state)?)
    }

    /// Runs `f` against the committed state under the forwarder's lock.
    pub fn with_state<R>(&self, f: impl FnOnce(&dyn StateAccess) -> R) -> Result<R, ForwarderError> {
        let state = self.lock()?;
        Ok(f(&*state))
    }

    /// Hands committed outbound messages to `transport`.
    pub fn relay_outbox(&self, transport: &dyn Transport) -> Result<usize, ForwarderError> {
        let mut state = self.lock()?;
        executor::relay_outbox(&mut *state, transport)
    }

    fn required(
        endorsement: Option<&EncodedEndorsement>,
    ) -> Result<&EncodedEndorsement, ForwarderError> {
        endorsement.ok_or_else(|| {
            EndorsementError::MalformedEndorsement("an endorsement is required".into()).into()
        })
    }

    /// Verifies `encoded` against `inputs` and consumes the subject's nonce.
    /// Returns the nonce that was consumed.
    fn authorize(
        &self,
        state: &mut S,
        inputs: &DigestInputs,
        encoded: &EncodedEndorsement,
    ) -> Result<u64, ForwarderError> {
        debug!(target: "forwarder", phase = %AuthorizationPhase::Pending, function = %inputs.function_signature);
        let verified = self.verify(state, inputs, encoded).inspect_err(|e| {
            let code = e.code();
            authorization_metrics().inc_authorization("rejected");
            authorization_metrics().inc_rejection(code);
            warn!(
                target: "forwarder",
                phase = %AuthorizationPhase::Rejected,
                code,
                class = ?e.class(),
                error = %e,
                "endorsement rejected"
            );
        })?;
        debug!(target: "forwarder", phase = %AuthorizationPhase::Verified, signers = verified.signers.len());

        let next = NonceRegistry::advance(state, &self.subject)?;
        authorization_metrics().inc_authorization("accepted");
        info!(
            target: "forwarder",
            phase = %AuthorizationPhase::Consumed,
            digest = %verified.digest,
            nonce = verified.nonce,
            next,
            "endorsement consumed"
        );
        Ok(verified.nonce)
    }

    fn verify(
        &self,
        state: &S,
        inputs: &DigestInputs,
        encoded: &EncodedEndorsement,
    ) -> Result<endorse_tx::VerifiedEndorsement, ForwarderError> {
        let endorsement = Endorsement::decode_payload(encoded)?;
        let eligibility: EligibilitySet =
            read_canonical(state, ELIGIBILITY_KEY)?.ok_or(EndorsementError::NotInitialized)?;
        let current_nonce = NonceRegistry::current(state, &self.subject)?;
        let ordinal = self.clock.current_ordinal();
        Ok(self
            .verifier
            .verify(inputs, &endorsement, &eligibility, ordinal, current_nonce)?)
    }

    fn run<F>(
        &self,
        state: &mut S,
        calls: &[CallDescriptor],
        finalize: F,
    ) -> Result<ExecutionReport, ForwarderError>
    where
        F: FnOnce(&mut dyn StateAccess) -> Result<(), ExecutionError>,
    {
        match self.executor.execute_then(state, self.subject, calls, finalize) {
            Ok(report) => {
                debug!(target: "forwarder", phase = %AuthorizationPhase::Executed, calls = report.calls_executed());
                Ok(report)
            }
            Err(e) => {
                error_metrics().inc_error("execution", e.code());
                Err(e.into())
            }
        }
    }
}
