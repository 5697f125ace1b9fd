//! The upstream loader capability
//!
//! The tiling engine never talks to a network or database itself; it calls
//! a collaborator through this seam. Retry/backoff policy belongs to the
//! collaborator: a fetch that ultimately fails should simply end its stream,
//! and the tiler emits no new mutation for that query.

use crate::cursor::{Cursor, CursorList};
use futures::stream::BoxStream;

/// Loads one page of items for a `(query, cursor)` pair.
///
/// The returned stream may emit more than once for the same page - an
/// offline cache result followed by fresher remote data, for instance.
/// Every emission re-triggers downstream recombination.
pub trait CursorListLoader<Q, I>: Send + Sync + 'static {
    /// Subscribe to the page identified by `query`, resuming at `cursor`.
    fn load(&self, query: &Q, cursor: Cursor) -> BoxStream<'static, CursorList<I>>;
}

impl<Q, I, F> CursorListLoader<Q, I> for F
where
    F: Fn(&Q, Cursor) -> BoxStream<'static, CursorList<I>> + Send + Sync + 'static,
{
    fn load(&self, query: &Q, cursor: Cursor) -> BoxStream<'static, CursorList<I>> {
        self(query, cursor)
    }
}
