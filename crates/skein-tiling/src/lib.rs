//! Skein Tiling - Pivoted Windowed Paging
//!
//! This crate maps cursor-based remote pagination onto scroll position for
//! virtualized lists. A UI reports the query it is currently looking at; the
//! tiling engine keeps a window of adjacent pages loaded around that pivot,
//! evicts pages that scroll out of the window, and assembles everything into
//! a single ordered list of tiles.
//!
//! # Flow
//!
//! ```text
//! queries + columns → tile inputs → tiler → fetch plans → loader
//!                                     ↑                      │
//!                                     └──── pages ───────────┘
//!                                     │
//!                                  snapshots (TiledList)
//! ```
//!
//! The synchronous pieces ([`Tiler`], [`tile_inputs_around`],
//! [`CursorTokenCache`]) are pure state machines testable without a runtime.
//! [`TilingPipeline`] is the async shell: one tokio task per pipeline
//! instance, torn down wholesale when a refresh supersedes it.
//!
//! # Ordering guarantee
//!
//! Snapshots published by a pipeline are assembled in page order from a
//! single pagination epoch. Downstream consumers still apply
//! [`TiledList::is_valid_for`] before trusting a snapshot, because a
//! superseded pipeline's last snapshots can arrive after a newer pipeline
//! took over; such results fail the validity check and are dropped.

#![forbid(unsafe_code)]

/// Cursor-anchored query abstraction
pub mod query;

/// Continuation tokens and fetched pages
pub mod cursor;

/// Tiles and assembled tiled lists
pub mod tile;

/// Pivot windows, limiters, and tile input generation
pub mod pivot;

/// The bounded cursor-token cache
pub mod tokens;

/// The synchronous tile assembly state machine
pub mod tiler;

/// The upstream loader capability
pub mod loader;

/// The async pipeline shell
pub mod pipeline;

pub use cursor::{Cursor, CursorList};
pub use loader::CursorListLoader;
pub use pipeline::{PipelineHandle, TilingPipeline};
pub use pivot::{cursor_tile_inputs, tile_inputs_around, Limiter, PivotRequest, TileInput};
pub use query::TiledQuery;
pub use tile::{Tile, TiledList};
pub use tiler::{FetchPlan, Tiler};
pub use tokens::{CursorTokenCache, CURSOR_TOKEN_CACHE_LIMIT};
