//! Skein Testing Infrastructure
//!
//! Common builders and fakes shared by the Skein test suites: deterministic
//! posts and feed items, a scripted feed source with gated page releases
//! for race tests, and small async test helpers.
//!
//! # Usage
//!
//! Add to a crate's dev-dependencies and pull the flat re-exports:
//!
//! ```rust,no_run
//! use skein_testkit::*;
//!
//! let feed = ScriptedFeed::paged(vec![vec![single(1), single(2)]]);
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod builders;
pub mod feed;
pub mod sync;

pub use builders::*;
pub use feed::ScriptedFeed;
pub use sync::*;
