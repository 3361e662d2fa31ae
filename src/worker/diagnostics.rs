//! Hand-off of per-run length traces to a diagnostics consumer.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Receives the per-iteration length trace of every completed run.
///
/// Called on the worker thread once per run, after the result is computed
/// and before it is published.
pub trait DiagnosticsSink: Send {
    fn on_run_complete(&mut self, trace: &[f64]);
}

impl<F> DiagnosticsSink for F
where
    F: FnMut(&[f64]) + Send,
{
    fn on_run_complete(&mut self, trace: &[f64]) {
        self(trace)
    }
}

/// Discards traces.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn on_run_complete(&mut self, _trace: &[f64]) {}
}

/// Collects traces in shared storage.
///
/// Clones share the same storage: hand one clone to the worker and keep
/// another to inspect or [`reset`](TraceLog::reset) the collected traces.
#[derive(Debug, Default, Clone)]
pub struct TraceLog {
    traces: Arc<Mutex<Vec<Vec<f64>>>>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Vec<f64>>> {
        self.traces.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drops all collected traces.
    pub fn reset(&self) {
        self.lock().clear();
    }

    /// Number of traces collected since the last reset.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// The most recent trace.
    pub fn latest(&self) -> Option<Vec<f64>> {
        self.lock().last().cloned()
    }

    /// Removes and returns all collected traces.
    pub fn take(&self) -> Vec<Vec<f64>> {
        std::mem::take(&mut *self.lock())
    }
}

impl DiagnosticsSink for TraceLog {
    fn on_run_complete(&mut self, trace: &[f64]) {
        self.lock().push(trace.to_vec());
    }
}

/// Downsamples `trace` to `count` values for charting.
///
/// The trace is cut into `count` buckets of `len / count` entries. Each of
/// the first `count - 1` outputs is its bucket's mean; the last output is the
/// final trace value, so the chart ends on the published length.
pub fn compress_by_mean(trace: &[f64], count: usize) -> Vec<f64> {
    let count = count.min(trace.len());
    let Some(&last) = trace.last() else {
        return Vec::new();
    };
    if count == 0 {
        return Vec::new();
    }

    let width = trace.len() / count;
    let mut out: Vec<f64> = trace
        .chunks_exact(width)
        .take(count - 1)
        .map(|bucket| bucket.iter().sum::<f64>() / width as f64)
        .collect();
    out.push(last);
    out
}
