//! Pivot windows, limiters, and tile input generation
//!
//! The most recently requested query is the pivot: the page the user is
//! looking at. Around it, `num_columns * 3` pages stay loaded and the
//! `num_columns * 2` pages just outside that window are evicted, so grids
//! with more columns (which consume pages faster) keep proportionally more
//! loaded. A [`Limiter`] bounds total materialized pages as a backstop.

use crate::query::TiledQuery;
use futures::stream::{self, Stream, StreamExt};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// Caps the number of concurrently materialized pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limiter {
    max_pages: usize,
}

impl Limiter {
    /// The limiter for a grid with the given column count:
    /// `3 * max(1, num_columns)` pages.
    pub fn for_columns(num_columns: u32) -> Self {
        Self {
            max_pages: 3 * num_columns.max(1) as usize,
        }
    }

    /// Maximum pages that may stay materialized at once.
    pub fn max_pages(&self) -> usize {
        self.max_pages
    }
}

/// The window of pages to keep loaded and to evict around a pivot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotRequest<Q> {
    /// The query at the center of the window
    pub pivot: Q,
    /// Pages to keep loaded, ordered by page ascending
    pub on: Vec<Q>,
    /// Pages to evict, ordered by page ascending
    pub off: Vec<Q>,
}

/// One tile-management instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileInput<Q> {
    /// Re-center the loaded window around a new pivot.
    Pivot(PivotRequest<Q>),
    /// Apply a new materialization bound.
    Limit(Limiter),
}

/// Build the pivot window for a query at the given column count:
/// `on_count = num_columns * 3`, `off_count = num_columns * 2`.
pub fn pivot_request_around<Q: TiledQuery>(query: &Q, num_columns: u32) -> PivotRequest<Q> {
    let cols = num_columns.max(1) as usize;
    let (on, off) = window_around(query, cols * 3, cols * 2);
    PivotRequest {
        pivot: query.clone(),
        on,
        off,
    }
}

/// The tile inputs produced by one query at one column count.
pub fn tile_inputs_around<Q: TiledQuery>(query: &Q, num_columns: u32) -> Vec<TileInput<Q>> {
    vec![
        TileInput::Limit(Limiter::for_columns(num_columns)),
        TileInput::Pivot(pivot_request_around(query, num_columns)),
    ]
}

/// Convert a column-count signal and a query stream into a stream of tile
/// inputs.
///
/// Each new query re-centers the window at the current column count; each
/// column change re-centers around the last seen query. The stream ends when
/// both sources end.
pub fn cursor_tile_inputs<Q, S>(
    columns: watch::Receiver<u32>,
    queries: S,
) -> impl Stream<Item = TileInput<Q>> + Send
where
    Q: TiledQuery,
    S: Stream<Item = Q> + Send + 'static,
{
    enum Event<Q> {
        Columns(u32),
        Query(Q),
    }

    let columns = WatchStream::new(columns).map(Event::Columns);
    let queries = queries.map(Event::Query);

    stream::select(columns, queries)
        .scan((1u32, None::<Q>), |(cols, last_query), event| {
            let inputs = match event {
                Event::Columns(n) => {
                    *cols = n;
                    last_query
                        .as_ref()
                        .map(|q| tile_inputs_around(q, n))
                        .unwrap_or_default()
                }
                Event::Query(q) => {
                    let inputs = tile_inputs_around(&q, *cols);
                    *last_query = Some(q);
                    inputs
                }
            };
            futures::future::ready(Some(inputs))
        })
        .flat_map(stream::iter)
}

/// Pick `on_count + off_count` pages by alternating the next/previous page
/// generators around the pivot, then split and order both sets ascending.
/// The previous-page generator yields nothing below page 0, in which case
/// the window extends further forward instead.
fn window_around<Q: TiledQuery>(query: &Q, on_count: usize, off_count: usize) -> (Vec<Q>, Vec<Q>) {
    let total = on_count + off_count;
    let mut picked = Vec::with_capacity(total);
    picked.push(query.clone());

    let mut next = query.next_page();
    let mut prev = query.prev_page();
    while picked.len() < total {
        picked.push(next.clone());
        next = next.next_page();
        if picked.len() >= total {
            break;
        }
        if let Some(p) = prev.take() {
            prev = p.prev_page();
            picked.push(p);
        }
    }

    let mut off = picked.split_off(on_count);
    let mut on = picked;
    on.sort_by_key(TiledQuery::page);
    off.sort_by_key(TiledQuery::page);
    (on, off)
}
