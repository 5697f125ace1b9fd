//! Skein Core - Foundation Types
//!
//! This crate provides the foundational domain types shared by the tiling
//! engine and the timeline state machine. It contains only plain data types
//! and validation logic - no async machinery and no application logic.
//!
//! # Contents
//!
//! - Identifiers: [`Did`], [`PostUri`], [`FeedUri`] - validated newtypes for
//!   AT Protocol identifiers and record URIs
//! - Time: [`Anchor`] - an instant stamping one pagination epoch
//! - Feed model: [`Post`], [`FeedItem`] - the items a timeline displays
//! - Errors: [`CoreError`]

#![forbid(unsafe_code)]

/// AT Protocol identifiers and record URIs
pub mod identifiers;

/// Pagination epoch stamps
pub mod time;

/// Posts and timeline item variants
pub mod feed;

/// Unified error handling
pub mod errors;

pub use errors::CoreError;
pub use feed::{FeedItem, Post};
pub use identifiers::{Did, FeedCollection, FeedUri, PostUri};
pub use time::Anchor;
