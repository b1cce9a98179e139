// Path: crates/telemetry/src/sinks.rs
//! Abstract traits for metrics reporting, decoupling the forwarder from the backend.

use once_cell::sync::OnceCell;

// --- Static Sink Access ---

/// A no-op sink for use in tests or when telemetry is disabled.
#[derive(Debug, Clone, Copy)]
pub struct NopSink;

/// The global `MetricsSink`, set once by a backend's `install`.
pub static SINK: OnceCell<&'static dyn MetricsSink> = OnceCell::new();
static NOP_SINK: NopSink = NopSink;

/// Returns the configured authorization metrics sink, or a no-op sink.
pub fn authorization_metrics() -> &'static dyn AuthorizationMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

/// Returns the configured execution metrics sink, or a no-op sink.
pub fn execution_metrics() -> &'static dyn ExecutionMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

/// Returns the configured error metrics sink, or a no-op sink.
pub fn error_metrics() -> &'static dyn ErrorMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

// --- Trait Definitions ---

/// A sink for endorsement verification outcomes.
pub trait AuthorizationMetricsSink: Send + Sync + std::fmt::Debug {
    /// Counts an authorization attempt, labeled `accepted` or `rejected`.
    fn inc_authorization(&self, outcome: &'static str);
    /// Counts a rejection by its stable error code.
    fn inc_rejection(&self, code: &'static str);
}
impl AuthorizationMetricsSink for NopSink {
    fn inc_authorization(&self, _outcome: &'static str) {}
    fn inc_rejection(&self, _code: &'static str) {}
}

/// A sink for committed batches.
pub trait ExecutionMetricsSink: Send + Sync + std::fmt::Debug {
    /// Adds the number of calls in a committed batch.
    fn inc_batch_calls(&self, count: u64);
    /// Observes the total resource consumption of a committed batch.
    fn observe_batch_gas(&self, gas: u64);
    /// Observes how long a batch took, committed or not.
    fn observe_batch_duration(&self, duration_secs: f64);
}
impl ExecutionMetricsSink for NopSink {
    fn inc_batch_calls(&self, _count: u64) {}
    fn observe_batch_gas(&self, _gas: u64) {}
    fn observe_batch_duration(&self, _duration_secs: f64) {}
}

/// A sink for recording structured error metrics.
pub trait ErrorMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments a counter for a specific error, categorized by its kind and variant.
    fn inc_error(&self, kind: &'static str, variant: &'static str);
}
impl ErrorMetricsSink for NopSink {
    fn inc_error(&self, _kind: &'static str, _variant: &'static str) {}
}

/// A unified sink that implements all domain-specific traits.
pub trait MetricsSink: AuthorizationMetricsSink + ExecutionMetricsSink + ErrorMetricsSink {}

impl<T> MetricsSink for T where T: AuthorizationMetricsSink + ExecutionMetricsSink + ErrorMetricsSink {}
