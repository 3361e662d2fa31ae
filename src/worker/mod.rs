//! Long-lived background worker around the annealing engine.
//!
//! Two threads cooperate: the caller submits point sets and polls for
//! results, and the worker thread runs one annealing pass per submission.
//! Both directions go through a single-slot [`Mailbox`], so pending
//! submissions collapse to the most recent one and an unread result is
//! replaced by a newer one.

mod diagnostics;
mod mailbox;
mod runner;

pub use diagnostics::{compress_by_mean, DiagnosticsSink, NullSink, TraceLog};
pub use mailbox::Mailbox;
pub use runner::{TourSolution, TourWorker};
