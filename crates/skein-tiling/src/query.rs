//! Cursor-anchored query abstraction
//!
//! A tiled query is a page number stamped with the [`Anchor`] of the
//! pagination session it belongs to, plus whatever source key the
//! implementor carries. Two queries are comparable by page number only when
//! their anchors are equal; a refresh stamps a new anchor and starts a new
//! session.

use skein_core::Anchor;
use std::hash::Hash;

/// A paginated, anchor-stamped request descriptor.
///
/// Implementors add their own source key (which feed, which profile) on top
/// of the `page`/`anchor` pair this trait exposes. Pages are contiguous
/// within a tiled result: page `n` is followed by page `n + 1`.
pub trait TiledQuery: Clone + Eq + Hash + Send + Sync + 'static {
    /// The page this query asks for.
    fn page(&self) -> u64;

    /// The pagination session this query belongs to.
    fn anchor(&self) -> Anchor;

    /// The same query pointed at a different page.
    fn with_page(&self, page: u64) -> Self;

    /// The query for the following page.
    fn next_page(&self) -> Self {
        self.with_page(self.page() + 1)
    }

    /// The query for the preceding page, if any. There is no page below 0.
    fn prev_page(&self) -> Option<Self> {
        self.page().checked_sub(1).map(|page| self.with_page(page))
    }

    /// Whether both queries belong to the same pagination session.
    fn shares_anchor(&self, other: &Self) -> bool {
        self.anchor() == other.anchor()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::TiledQuery;
    use skein_core::Anchor;

    /// Minimal query used by the unit tests in this crate.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct PageQuery {
        pub page: u64,
        pub anchor: Anchor,
    }

    impl PageQuery {
        pub fn new(page: u64, anchor_millis: i64) -> Self {
            Self {
                page,
                anchor: Anchor::from_unix_millis(anchor_millis),
            }
        }
    }

    impl TiledQuery for PageQuery {
        fn page(&self) -> u64 {
            self.page
        }

        fn anchor(&self) -> Anchor {
            self.anchor
        }

        fn with_page(&self, page: u64) -> Self {
            Self { page, ..self.clone() }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::PageQuery;
    use super::*;

    #[test]
    fn prev_page_stops_at_zero() {
        let q = PageQuery::new(0, 1);
        assert_eq!(q.prev_page(), None);

        let q = PageQuery::new(2, 1);
        assert_eq!(q.prev_page().map(|p| p.page()), Some(1));
    }

    #[test]
    fn next_page_increments() {
        let q = PageQuery::new(3, 1);
        assert_eq!(q.next_page().page(), 4);
    }

    #[test]
    fn anchor_comparison_distinguishes_sessions() {
        let a = PageQuery::new(0, 1);
        let b = PageQuery::new(5, 1);
        let c = PageQuery::new(0, 2);
        assert!(a.shares_anchor(&b));
        assert!(!a.shares_anchor(&c));
    }
}
