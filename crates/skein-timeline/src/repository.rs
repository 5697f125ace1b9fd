//! The seam to the network/database layer
//!
//! The timeline engine treats data access as a capability: something that
//! can serve a page of feed items for a `(query, cursor)` pair and report
//! whether the remote has items newer than the top of the list. Offline
//! caching, XRPC calls, and retry policy all live behind this trait.

use crate::query::TimelineQuery;
use crate::source::TimelineSource;
use futures::stream::BoxStream;
use skein_core::FeedItem;
use skein_tiling::{Cursor, CursorList, CursorListLoader, TiledQuery};
use std::sync::Arc;
use tracing::debug;

/// Serves timeline pages and update signals.
///
/// A page subscription may emit more than once - a cached page first, then
/// fresher remote data. A fetch that ultimately fails should end its stream;
/// the engine shows the last valid state and moves on.
pub trait TimelineRepository: Send + Sync + 'static {
    /// Subscribe to one page of the feed `query` names, resuming at
    /// `cursor`.
    fn timeline_items(
        &self,
        query: &TimelineQuery,
        cursor: Cursor,
    ) -> BoxStream<'static, CursorList<FeedItem>>;

    /// Whether the remote holds items newer than the top of `source`.
    fn has_updates(&self, source: &TimelineSource) -> BoxStream<'static, bool>;
}

/// Adapts a [`TimelineRepository`] to the tiling engine's loader seam.
pub struct RepositoryLoader<R> {
    repository: Arc<R>,
}

impl<R> RepositoryLoader<R> {
    /// Wrap a repository for use as a pipeline loader.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R: TimelineRepository> CursorListLoader<TimelineQuery, FeedItem> for RepositoryLoader<R> {
    fn load(
        &self,
        query: &TimelineQuery,
        cursor: Cursor,
    ) -> BoxStream<'static, CursorList<FeedItem>> {
        debug!(source = %query.source, page = query.page(), ?cursor, "loading timeline page");
        self.repository.timeline_items(query, cursor)
    }
}
