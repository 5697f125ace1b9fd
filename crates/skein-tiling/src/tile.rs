//! Tiles and assembled tiled lists
//!
//! A tile is the contiguous run of items one query produced; a
//! [`TiledList`] is the ordered concatenation of tiles spanning multiple
//! pages. The validity check here is the mechanism that keeps races between
//! overlapping pipelines out of observed state: a list is only trusted if it
//! covers the exact query being looked at and its pages are contiguous.

use crate::query::TiledQuery;
use serde::{Deserialize, Serialize};
use skein_core::Anchor;

/// A contiguous run of items produced by exactly one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile<Q, I> {
    /// The query that produced this run
    pub query: Q,
    /// The run's items, in feed order
    pub items: Vec<I>,
}

/// An ordered concatenation of tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TiledList<Q, I> {
    tiles: Vec<Tile<Q, I>>,
}

impl<Q, I> TiledList<Q, I> {
    /// An empty list.
    pub fn new() -> Self {
        Self { tiles: Vec::new() }
    }

    /// Assemble a list from tiles already in display order.
    pub fn from_tiles(tiles: Vec<Tile<Q, I>>) -> Self {
        Self { tiles }
    }

    /// The tiles, in display order.
    pub fn tiles(&self) -> &[Tile<Q, I>] {
        &self.tiles
    }

    /// Consume the list, yielding its tiles in display order.
    pub fn into_tiles(self) -> Vec<Tile<Q, I>> {
        self.tiles
    }

    /// All items across tiles, in display order.
    pub fn items(&self) -> impl Iterator<Item = &I> {
        self.tiles.iter().flat_map(|tile| tile.items.iter())
    }

    /// Total number of items.
    pub fn len(&self) -> usize {
        self.tiles.iter().map(|tile| tile.items.len()).sum()
    }

    /// Whether the list holds no items.
    pub fn is_empty(&self) -> bool {
        self.tiles.iter().all(|tile| tile.items.is_empty())
    }

    /// The query that produced the item at `index`, if in range.
    pub fn query_at(&self, index: usize) -> Option<&Q> {
        let mut remaining = index;
        for tile in &self.tiles {
            if remaining < tile.items.len() {
                return Some(&tile.query);
            }
            remaining -= tile.items.len();
        }
        None
    }
}

impl<Q: TiledQuery, I> TiledList<Q, I> {
    /// Whether every adjacent tile pair has contiguous page numbers.
    pub fn is_page_contiguous(&self) -> bool {
        self.tiles
            .windows(2)
            .all(|pair| pair[0].query.page() + 1 == pair[1].query.page())
    }

    /// Whether this list can be accepted as the state for `current`.
    ///
    /// Requires a tile for the exact current query and page contiguity
    /// throughout. A list failing either condition is a stale or partial
    /// artifact of a superseded pipeline and must be dropped, not shown.
    pub fn is_valid_for(&self, current: &Q) -> bool {
        self.tiles.iter().any(|tile| tile.query == *current) && self.is_page_contiguous()
    }

    /// The anchor of the page-0 tile, when the list starts at page 0.
    pub fn anchor_of_first_page(&self) -> Option<Anchor> {
        self.tiles
            .first()
            .filter(|tile| tile.query.page() == 0)
            .map(|tile| tile.query.anchor())
    }
}

impl<Q, I> Default for TiledList<Q, I> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::test_support::PageQuery;

    fn tile(page: u64, anchor: i64, items: Vec<u32>) -> Tile<PageQuery, u32> {
        Tile {
            query: PageQuery::new(page, anchor),
            items,
        }
    }

    #[test]
    fn contiguous_pages_are_valid() {
        let list = TiledList::from_tiles(vec![
            tile(0, 1, vec![1, 2]),
            tile(1, 1, vec![3]),
            tile(2, 1, vec![4, 5]),
        ]);
        assert!(list.is_page_contiguous());
        assert!(list.is_valid_for(&PageQuery::new(1, 1)));
    }

    #[test]
    fn a_gap_invalidates_the_list() {
        let list = TiledList::from_tiles(vec![tile(0, 1, vec![1]), tile(2, 1, vec![2])]);
        assert!(!list.is_page_contiguous());
        // Even though a tile for the query exists, the gap disqualifies it.
        assert!(!list.is_valid_for(&PageQuery::new(0, 1)));
    }

    #[test]
    fn missing_current_query_invalidates_the_list() {
        let list = TiledList::from_tiles(vec![tile(0, 1, vec![1]), tile(1, 1, vec![2])]);
        // Same pages, different session.
        assert!(!list.is_valid_for(&PageQuery::new(0, 2)));
        // Page not covered by the list.
        assert!(!list.is_valid_for(&PageQuery::new(2, 1)));
    }

    #[test]
    fn query_at_walks_tile_boundaries() {
        let list = TiledList::from_tiles(vec![tile(0, 1, vec![1, 2]), tile(1, 1, vec![3])]);
        assert_eq!(list.query_at(0).map(|q| q.page()), Some(0));
        assert_eq!(list.query_at(1).map(|q| q.page()), Some(0));
        assert_eq!(list.query_at(2).map(|q| q.page()), Some(1));
        assert_eq!(list.query_at(3), None);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn anchor_of_first_page_requires_page_zero() {
        let from_zero = TiledList::from_tiles(vec![tile(0, 7, vec![1])]);
        assert!(from_zero.anchor_of_first_page().is_some());

        let mid_scroll = TiledList::from_tiles(vec![tile(3, 7, vec![1])]);
        assert_eq!(mid_scroll.anchor_of_first_page(), None);
    }
}
