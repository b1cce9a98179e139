// Path: crates/telemetry/src/time.rs
use crate::sinks::ExecutionMetricsSink;
use std::time::Instant;

/// Observes the lifetime of a batch on drop, whether it committed or not.
pub struct Timer<'a> {
    sink: &'a dyn ExecutionMetricsSink,
    start: Instant,
}

impl<'a> Timer<'a> {
    pub fn new(sink: &'a dyn ExecutionMetricsSink) -> Self {
        Self {
            sink,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer<'_> {
    fn drop(&mut self) {
        self.sink
            .observe_batch_duration(self.start.elapsed().as_secs_f64());
    }
}
