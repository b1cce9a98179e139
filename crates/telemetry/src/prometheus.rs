// Path: crates/telemetry/src/prometheus.rs
//! A concrete implementation of the metrics sinks using the Prometheus crate.

use crate::sinks::*;
use once_cell::sync::OnceCell;
use prometheus::{
    exponential_buckets, register_histogram, register_int_counter, register_int_counter_vec,
    Histogram, IntCounter, IntCounterVec,
};

// --- Metric Statics ---
// Initialized exactly once by `install`.

static AUTHORIZATIONS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static REJECTIONS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static BATCH_CALLS_TOTAL: OnceCell<IntCounter> = OnceCell::new();
static BATCH_GAS_USED: OnceCell<Histogram> = OnceCell::new();
static BATCH_DURATION_SECONDS: OnceCell<Histogram> = OnceCell::new();
static ERRORS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();

#[derive(Debug, Clone, Copy)]
pub struct PrometheusSink;

static PROMETHEUS_SINK: PrometheusSink = PrometheusSink;

/// Runs `$body` against a metric if `install()` has populated it.
macro_rules! with_metric {
    ($metric:ident, |$m:ident| $body:expr) => {
        if let Some($m) = $metric.get() {
            $body;
        }
    };
}

impl AuthorizationMetricsSink for PrometheusSink {
    fn inc_authorization(&self, outcome: &'static str) {
        with_metric!(AUTHORIZATIONS_TOTAL, |m| m.with_label_values(&[outcome]).inc());
    }
    fn inc_rejection(&self, code: &'static str) {
        with_metric!(REJECTIONS_TOTAL, |m| m.with_label_values(&[code]).inc());
    }
}

impl ExecutionMetricsSink for PrometheusSink {
    fn inc_batch_calls(&self, count: u64) {
        with_metric!(BATCH_CALLS_TOTAL, |m| m.inc_by(count));
    }
    fn observe_batch_gas(&self, gas: u64) {
        with_metric!(BATCH_GAS_USED, |m| m.observe(gas as f64));
    }
    fn observe_batch_duration(&self, duration_secs: f64) {
        with_metric!(BATCH_DURATION_SECONDS, |m| m.observe(duration_secs));
    }
}

impl ErrorMetricsSink for PrometheusSink {
    fn inc_error(&self, kind: &'static str, variant: &'static str) {
        with_metric!(ERRORS_TOTAL, |m| m.with_label_values(&[kind, variant]).inc());
    }
}

fn set_once<T>(cell: &OnceCell<T>, value: T) {
    // A concurrent installer may have won the race; its collector is equivalent.
    let _ = cell.set(value);
}

/// Registers every collector with the default registry and installs the
/// Prometheus sink as the global sink. Calling it again is a no-op.
pub fn install() -> Result<&'static dyn MetricsSink, prometheus::Error> {
    if let Some(existing) = SINK.get() {
        return Ok(*existing);
    }
    set_once(
        &AUTHORIZATIONS_TOTAL,
        register_int_counter_vec!(
            "endorse_authorizations_total",
            "Endorsement verification attempts by outcome.",
            &["outcome"]
        )?,
    );
    set_once(
        &REJECTIONS_TOTAL,
        register_int_counter_vec!(
            "endorse_rejections_total",
            "Rejected endorsements and batches by error code.",
            &["code"]
        )?,
    );
    set_once(
        &BATCH_CALLS_TOTAL,
        register_int_counter!(
            "endorse_batch_calls_total",
            "Total calls executed in committed batches."
        )?,
    );
    set_once(
        &BATCH_GAS_USED,
        register_histogram!(
            "endorse_batch_gas_used",
            "Resource consumption of committed batches.",
            exponential_buckets(1_000.0, 4.0, 12)?
        )?,
    );
    set_once(
        &BATCH_DURATION_SECONDS,
        register_histogram!(
            "endorse_batch_duration_seconds",
            "Latency of batch execution, committed or rolled back.",
            exponential_buckets(0.0001, 2.0, 16)?
        )?,
    );
    set_once(
        &ERRORS_TOTAL,
        register_int_counter_vec!(
            "endorse_errors_total",
            "Total number of errors, categorized by type and variant.",
            &["kind", "variant"]
        )?,
    );
    let sink: &'static dyn MetricsSink = &PROMETHEUS_SINK;
    Ok(*SINK.get_or_init(|| sink))
}
