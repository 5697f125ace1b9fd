//! The synchronous tile assembly state machine
//!
//! The tiler is the reduce step of a tiling pipeline: tile inputs go in,
//! fetch plans come out, fetched pages fold into tiles, and every change
//! yields a fresh [`TiledList`] snapshot. All asynchrony lives in the
//! pipeline shell; the tiler itself is deterministic and directly testable.

use crate::cursor::{Cursor, CursorList};
use crate::pivot::{Limiter, TileInput};
use crate::query::TiledQuery;
use crate::tile::{Tile, TiledList};
use crate::tokens::CursorTokenCache;
use std::collections::{BTreeMap, HashSet};

/// A fetch the pipeline should dispatch to the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan<Q> {
    /// The query to fetch
    pub query: Q,
    /// The cursor to fetch it with
    pub cursor: Cursor,
}

/// Assembles fetched pages into an ordered tiled list, bounded by a pivot
/// window and a limiter.
#[derive(Debug)]
pub struct Tiler<Q, I> {
    tokens: CursorTokenCache<Q>,
    tiles: BTreeMap<u64, Tile<Q, I>>,
    pending: HashSet<Q>,
    limiter: Limiter,
    pivot_page: u64,
}

impl<Q: TiledQuery, I: Clone> Tiler<Q, I> {
    /// A tiler for one pagination session, seeded so `starting_query`
    /// resolves to [`Cursor::Initial`].
    pub fn new(starting_query: Q) -> Self {
        Self {
            pivot_page: starting_query.page(),
            tokens: CursorTokenCache::seeded(starting_query),
            tiles: BTreeMap::new(),
            pending: HashSet::new(),
            limiter: Limiter::for_columns(1),
        }
    }

    /// Apply one tile input, returning the fetches it calls for.
    ///
    /// Plans are ordered pivot-outward so the page being looked at loads
    /// first. A query whose cursor is unknown produces no plan: the remote
    /// pages forward only, so a page can only be reached once its
    /// predecessor has been fetched.
    pub fn on_input(&mut self, input: TileInput<Q>) -> Vec<FetchPlan<Q>> {
        match input {
            TileInput::Limit(limiter) => {
                self.limiter = limiter;
                self.enforce_limit();
                Vec::new()
            }
            TileInput::Pivot(request) => {
                self.pivot_page = request.pivot.page();

                for query in &request.off {
                    self.tiles.remove(&query.page());
                    self.pending.remove(query);
                }

                let mut on = request.on;
                on.sort_by_key(|q| (q.page().abs_diff(self.pivot_page), q.page()));

                let mut plans = Vec::new();
                for query in on {
                    if self.tiles.contains_key(&query.page()) || self.pending.contains(&query) {
                        continue;
                    }
                    let Some(cursor) = self.tokens.get(&query).filter(|c| c.is_fetchable())
                    else {
                        continue;
                    };
                    let cursor = cursor.clone();
                    self.pending.insert(query.clone());
                    plans.push(FetchPlan { query, cursor });
                }

                self.enforce_limit();
                plans
            }
        }
    }

    /// Fold one fetched page into the assembly.
    ///
    /// Returns the updated snapshot, or `None` when the page belongs to a
    /// query that has since been evicted from the window: such a result is
    /// an artifact of abandoned work and must not resurface.
    ///
    /// A query's loader subscription may emit more than once (an offline
    /// cache followed by fresher remote data); later emissions update the
    /// existing tile in place.
    pub fn on_page(&mut self, query: &Q, page: CursorList<I>) -> Option<TiledList<Q, I>> {
        let was_pending = self.pending.remove(query);
        let is_materialized = self
            .tiles
            .get(&query.page())
            .is_some_and(|tile| tile.query == *query);
        if !was_pending && !is_materialized {
            return None;
        }

        self.tokens.record(query.next_page(), page.next_cursor);
        self.tiles.insert(
            query.page(),
            Tile {
                query: query.clone(),
                items: page.items,
            },
        );
        self.enforce_limit();
        Some(self.snapshot())
    }

    /// The current assembly, tiles in page order.
    pub fn snapshot(&self) -> TiledList<Q, I> {
        TiledList::from_tiles(self.tiles.values().cloned().collect())
    }

    /// The cursor currently recorded for a query, if any.
    pub fn cursor_for(&self, query: &Q) -> Option<&Cursor> {
        self.tokens.get(query)
    }

    /// Number of materialized pages.
    pub fn materialized_pages(&self) -> usize {
        self.tiles.len()
    }

    /// Evict pages farthest from the pivot until within the limiter.
    fn enforce_limit(&mut self) {
        while self.tiles.len() > self.limiter.max_pages() {
            let (Some(&first), Some(&last)) =
                (self.tiles.keys().next(), self.tiles.keys().next_back())
            else {
                break;
            };
            let evict = if first.abs_diff(self.pivot_page) > last.abs_diff(self.pivot_page) {
                first
            } else {
                last
            };
            self.tiles.remove(&evict);
        }
    }
}
