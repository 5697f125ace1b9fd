//! Error types
//!
//! The engine degrades rather than fails: stale fetch results are dropped
//! silently and loader failures surface as missing mutations, not errors.
//! What remains is the lifecycle error a caller can actually act on.

use thiserror::Error;

/// Errors from driving a timeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimelineError {
    /// The engine task has stopped; the handle is stale.
    #[error("timeline engine is no longer running")]
    EngineStopped,
}
