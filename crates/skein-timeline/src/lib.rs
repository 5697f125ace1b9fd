//! Skein Timeline - Headless Timeline State Machine
//!
//! This crate composes the tiling engine with the auxiliary signals a
//! timeline screen needs - remote update availability and presentation
//! preference - into a single observable state, and exposes the actions a
//! frontend dispatches against it.
//!
//! # Flow
//!
//! ```text
//! Action → reduce → (forward query | rebuild pipeline | update columns)
//!                      │
//!                   pipeline snapshots → validity check → dedup → state
//! ```
//!
//! One [`Timeline`](engine::Timeline) instance is owned by one screen
//! subscription; it is spawned when the screen appears and torn down when
//! the handle is dropped. Frontends observe a
//! [`TimelineState`](state::TimelineState) watch channel and render.

#![forbid(unsafe_code)]

/// Timeline source keys
pub mod source;

/// The anchored timeline query
pub mod query;

/// Observable state and status
pub mod state;

/// Frontend-dispatched actions
pub mod action;

/// The pure reduce step
pub mod mutations;

/// Thread/repost duplicate suppression
pub mod dedup;

/// The seam to the network/database layer
pub mod repository;

/// The spawned engine and its handle
pub mod engine;

/// Error types
pub mod errors;

pub use action::TimelineAction;
pub use dedup::filter_thread_duplicates;
pub use engine::{Timeline, TimelineConfig, TimelineHandle};
pub use errors::TimelineError;
pub use mutations::{apply_action, apply_fetch, Effect};
pub use query::TimelineQuery;
pub use repository::{RepositoryLoader, TimelineRepository};
pub use source::{ProfileFilter, TimelineSource};
pub use state::{Presentation, TilingStatus, TimelineState};
