//! Background optimization thread.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::diagnostics::DiagnosticsSink;
use super::mailbox::Mailbox;
use crate::error::Result;
use crate::sa::{AnnealConfig, AnnealRunner};
use crate::tour::{Point, Tour};

/// A published optimization result.
#[derive(Debug, Clone)]
pub struct TourSolution {
    /// The point set the tour was computed for.
    pub points: Vec<Point>,
    pub tour: Tour,
    /// Length reported by the run.
    pub length: f64,
}

impl TourSolution {
    /// Recomputes the tour length against the stored points.
    pub fn verify(&self) -> Result<f64> {
        self.tour.length(&self.points)
    }
}

/// Runs annealing passes on a dedicated thread.
///
/// Point sets are handed over with [`submit`](TourWorker::submit). Pending
/// submissions coalesce: if several arrive while the worker is busy, only
/// the last one is optimized. A started run always finishes. Results are
/// polled with [`try_receive`](TourWorker::try_receive), which never blocks.
///
/// # Examples
///
/// ```
/// use tour_anneal::sa::AnnealConfig;
/// use tour_anneal::tour::Point;
/// use tour_anneal::worker::{NullSink, TourWorker};
///
/// let config = AnnealConfig::default().with_max_iterations(1_000).with_seed(1);
/// let worker = TourWorker::spawn(config, NullSink).unwrap();
/// worker.submit(vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)]);
/// let solution = loop {
///     if let Some(solution) = worker.try_receive() {
///         break solution;
///     }
///     std::thread::yield_now();
/// };
/// assert!((solution.length - 10.0).abs() < 1e-9);
/// worker.shutdown();
/// ```
pub struct TourWorker {
    submissions: Arc<Mailbox<Vec<Point>>>,
    results: Arc<Mailbox<TourSolution>>,
    handle: Option<JoinHandle<()>>,
}

impl TourWorker {
    /// Starts the worker thread.
    pub fn spawn<S>(config: AnnealConfig, sink: S) -> Result<Self>
    where
        S: DiagnosticsSink + 'static,
    {
        config.validate()?;

        let submissions = Arc::new(Mailbox::new());
        let results = Arc::new(Mailbox::new());

        let handle = {
            let submissions = Arc::clone(&submissions);
            let results = Arc::clone(&results);
            thread::Builder::new()
                .name("tour-worker".into())
                .spawn(move || serve(&submissions, &results, &config, sink))?
        };

        Ok(Self {
            submissions,
            results,
            handle: Some(handle),
        })
    }

    /// Queues a point set, replacing any submission not yet started.
    pub fn submit(&self, points: Vec<Point>) {
        if let Some(stale) = self.submissions.put(points) {
            log::debug!("discarding pending submission of {} points", stale.len());
        }
    }

    /// Returns the latest result published since the previous poll.
    pub fn try_receive(&self) -> Option<TourSolution> {
        self.results.try_take()
    }

    /// Stops accepting work and waits for the current run to finish.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.submissions.close();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("tour worker thread panicked");
            }
        }
    }
}

impl Drop for TourWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Worker loop: take the latest submission, anneal it, publish, repeat.
/// Returns when `submissions` is closed and drained.
fn serve<S: DiagnosticsSink>(
    submissions: &Mailbox<Vec<Point>>,
    results: &Mailbox<TourSolution>,
    config: &AnnealConfig,
    mut sink: S,
) {
    let mut rng = config.rng();

    while let Some(points) = submissions.take() {
        match AnnealRunner::run_with_rng(&points, config, &mut rng) {
            Ok(result) => {
                sink.on_run_complete(&result.trace);
                results.put(TourSolution {
                    points,
                    tour: result.tour,
                    length: result.length,
                });
            }
            Err(err) => {
                log::error!("annealing run over {} points aborted: {err}", points.len());
            }
        }
    }

    log::debug!("tour worker stopped");
}
