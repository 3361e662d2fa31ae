//! Error types for tour construction, evaluation and the worker.

use thiserror::Error as ThisError;

/// Errors raised by the tour engine.
///
/// `InvalidReference` and `BrokenCycle` signal a broken structural invariant
/// (malformed input construction upstream). They abort the current run; they
/// are never clamped or ignored.
#[derive(Debug, ThisError)]
pub enum Error {
    /// An edge references a node outside the valid point range.
    #[error("edge {edge} ({start} -> {end}) references a node outside 0..{points}")]
    InvalidReference {
        edge: usize,
        start: usize,
        end: usize,
        points: usize,
    },

    /// A move named an edge outside the tour's edge array.
    #[error("edge index {index} out of range for {edges} edges")]
    EdgeIndex { index: usize, edges: usize },

    /// The segment reversal walk did not return to its anchor node.
    #[error("segment reversal starting at node {node} did not close the cycle")]
    BrokenCycle { node: usize },

    /// Rejected annealing configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The worker thread could not be started.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Returns `true` for errors that indicate a corrupted tour structure.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::InvalidReference { .. } | Self::BrokenCycle { .. })
    }
}
