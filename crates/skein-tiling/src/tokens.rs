//! The bounded cursor-token cache
//!
//! The remote API only pages forward, so reaching page `n` requires the
//! token the fetch of page `n - 1` returned. The cache keeps those tokens
//! per query so a pivot re-entering a page resolves its cursor without
//! refetching from the top. It is bounded: long scrolling sessions would
//! otherwise accumulate a token per page visited.

use crate::cursor::Cursor;
use crate::query::TiledQuery;
use indexmap::IndexMap;

/// Maximum number of cursor tokens retained per tiling pipeline.
pub const CURSOR_TOKEN_CACHE_LIMIT: usize = 50;

/// An insertion-ordered `query -> cursor` map with oldest-first eviction.
///
/// Seeded with `starting_query -> Cursor::Initial`; rebuilt from scratch on
/// every refresh, because tokens from one pagination session are meaningless
/// in the next.
#[derive(Debug, Clone)]
pub struct CursorTokenCache<Q> {
    tokens: IndexMap<Q, Cursor>,
    capacity: usize,
}

impl<Q: TiledQuery> CursorTokenCache<Q> {
    /// A cache at the default capacity, seeded for `starting_query`.
    pub fn seeded(starting_query: Q) -> Self {
        Self::with_capacity(starting_query, CURSOR_TOKEN_CACHE_LIMIT)
    }

    /// A cache at a custom capacity (at least 1), seeded for
    /// `starting_query`.
    pub fn with_capacity(starting_query: Q, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut tokens = IndexMap::with_capacity(capacity);
        tokens.insert(starting_query, Cursor::Initial);
        Self { tokens, capacity }
    }

    /// The cursor recorded for a query, if any.
    pub fn get(&self, query: &Q) -> Option<&Cursor> {
        self.tokens.get(query)
    }

    /// Record a cursor, evicting oldest entries past capacity.
    ///
    /// Re-recording an existing query updates it in place without renewing
    /// its age.
    pub fn record(&mut self, query: Q, cursor: Cursor) {
        self.tokens.insert(query, cursor);
        while self.tokens.len() > self.capacity {
            self.tokens.shift_remove_index(0);
        }
    }

    /// Number of cached tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the cache holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
