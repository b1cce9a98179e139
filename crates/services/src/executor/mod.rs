// Path: crates/services/src/executor/mod.rs
//! Atomic batch execution.
//!
//! Every call of a batch runs against one [`StateOverlay`] over the committed
//! state. Later calls see the staged writes of earlier ones. The overlay is
//! committed with a single `batch_apply` after the last call succeeds, and
//! dropped on the first failure, so a failed batch leaves nothing behind.
//!
//! Callables see the overlay through a [`ScopedState`]. The forwarder's own
//! records under `endorse::` are out of their reach, apart from the outbox
//! granted to [`OutboundCallable`].

pub mod outbound;

use endorse_api::execution::{CallContext, Callable};
use endorse_api::state::{ScopedState, StateAccess, StateOverlay};
use endorse_telemetry::execution_metrics;
use endorse_telemetry::time::Timer;
use endorse_types::app::{Address, CallDescriptor, CallReceipt, ExecutionReport};
use endorse_types::error::{CallError, ExecutionError};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub use outbound::{pending_outbox, relay_outbox, OutboundCallable};

/// Maps target addresses to the callables that handle them.
#[derive(Clone, Default)]
pub struct CallRouter {
    targets: BTreeMap<Address, Arc<dyn Callable>>,
}

impl fmt::Debug for CallRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallRouter")
            .field("targets", &self.targets.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl CallRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callable` at `target`, returning whatever was there before.
    pub fn register(
        &mut self,
        target: Address,
        callable: Arc<dyn Callable>,
    ) -> Option<Arc<dyn Callable>> {
        self.targets.insert(target, callable)
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, target: Address, callable: Arc<dyn Callable>) -> Self {
        self.register(target, callable);
        self
    }

    pub fn resolve(&self, target: &Address) -> Result<&dyn Callable, CallError> {
        self.targets
            .get(target)
            .map(|c| c.as_ref())
            .ok_or(CallError::TargetNotFound(*target))
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Runs call batches all-or-nothing.
#[derive(Debug, Clone, Default)]
pub struct CallExecutor {
    router: CallRouter,
}

impl CallExecutor {
    pub fn new(router: CallRouter) -> Self {
        Self { router }
    }

    pub fn router(&self) -> &CallRouter {
        &self.router
    }

    /// Executes `calls` in order on behalf of `caller` and commits them atomically.
    pub fn execute(
        &self,
        state: &mut dyn StateAccess,
        caller: Address,
        calls: &[CallDescriptor],
    ) -> Result<ExecutionReport, ExecutionError> {
        self.execute_then(state, caller, calls, |_| Ok(()))
    }

    /// Like [`execute`](Self::execute), but runs `finalize` on the staged state
    /// after every call has succeeded and before the commit. A `finalize`
    /// error discards the batch like a failed call.
    pub fn execute_then<F>(
        &self,
        state: &mut dyn StateAccess,
        caller: Address,
        calls: &[CallDescriptor],
        finalize: F,
    ) -> Result<ExecutionReport, ExecutionError>
    where
        F: FnOnce(&mut dyn StateAccess) -> Result<(), ExecutionError>,
    {
        let sink = execution_metrics();
        let _timer = Timer::new(sink);

        let (report, (inserts, deletes)) = {
            let mut overlay = StateOverlay::new(&*state);
            let report = self.run(&mut overlay, caller, calls)?;
            finalize(&mut overlay)?;
            (report, overlay.into_ordered_batch())
        };
        state.batch_apply(&inserts, &deletes)?;

        sink.inc_batch_calls(report.receipts.len() as u64);
        sink.observe_batch_gas(report.total_gas_used);
        info!(
            target: "executor",
            %caller,
            calls = report.calls_executed(),
            gas = report.total_gas_used,
            writes = inserts.len() + deletes.len(),
            "batch committed"
        );
        Ok(report)
    }

    fn run(
        &self,
        overlay: &mut StateOverlay<'_>,
        caller: Address,
        calls: &[CallDescriptor],
    ) -> Result<ExecutionReport, ExecutionError> {
        let mut report = ExecutionReport::default();
        for (index, call) in calls.iter().enumerate() {
            let receipt = self.dispatch(overlay, caller, index, call).map_err(|reason| {
                warn!(target: "executor", index, target_addr = %call.target, %reason, "call failed, discarding batch");
                ExecutionError::CallFailed { index, reason }
            })?;
            report.total_gas_used = report.total_gas_used.saturating_add(receipt.gas_used);
            report.receipts.push(receipt);
        }
        Ok(report)
    }

    fn dispatch(
        &self,
        overlay: &mut StateOverlay<'_>,
        caller: Address,
        index: usize,
        call: &CallDescriptor,
    ) -> Result<CallReceipt, CallError> {
        let callable = self.router.resolve(&call.target)?;
        let mut scoped = ScopedState::new(overlay, callable.state_grant());
        let mut ctx = CallContext {
            state: &mut scoped,
            caller,
            target: call.target,
            index,
        };
        let output = callable.dispatch(&mut ctx, &call.payload, call.value, call.gas_limit)?;
        if let Some(limit) = call.gas_limit.cap() {
            if output.gas_used > limit {
                return Err(CallError::OutOfGas {
                    limit,
                    used: output.gas_used,
                });
            }
        }
        debug!(target: "executor", index, target_addr = %call.target, gas = output.gas_used, "call succeeded");
        Ok(CallReceipt {
            index,
            target: call.target,
            gas_used: output.gas_used,
            output: output.data,
        })
    }
}
