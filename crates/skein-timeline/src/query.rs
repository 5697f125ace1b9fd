//! The anchored timeline query
//!
//! One [`TimelineQuery`] asks for one page of one feed within one
//! pagination session. The [`TiledQuery`] implementation is what lets the
//! tiling engine window, fetch, and assemble these.

use crate::source::TimelineSource;
use serde::{Deserialize, Serialize};
use skein_core::Anchor;
use skein_tiling::TiledQuery;

/// A paginated, anchor-stamped request for one page of a feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimelineQuery {
    /// The feed being paged
    pub source: TimelineSource,
    /// The page asked for
    pub page: u64,
    /// The pagination session this query belongs to
    pub anchor: Anchor,
    /// Items per page
    pub limit: usize,
}

impl TimelineQuery {
    /// The page-0 query opening a pagination session.
    pub fn starting(source: TimelineSource, anchor: Anchor, limit: usize) -> Self {
        Self {
            source,
            page: 0,
            anchor,
            limit,
        }
    }

    /// The same feed, restarted at page 0 under a new anchor.
    pub fn refreshed(&self, anchor: Anchor) -> Self {
        Self {
            source: self.source.clone(),
            page: 0,
            anchor,
            limit: self.limit,
        }
    }
}

impl TiledQuery for TimelineQuery {
    fn page(&self) -> u64 {
        self.page
    }

    fn anchor(&self) -> Anchor {
        self.anchor
    }

    fn with_page(&self, page: u64) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refreshed_restarts_at_page_zero() {
        let anchor = Anchor::from_unix_millis(1_000);
        let query = TimelineQuery::starting(TimelineSource::Following, anchor, 30).with_page(7);

        let newer = Anchor::from_unix_millis(2_000);
        let refreshed = query.refreshed(newer);
        assert_eq!(refreshed.page, 0);
        assert_eq!(refreshed.anchor, newer);
        assert_eq!(refreshed.source, query.source);
        assert_eq!(refreshed.limit, query.limit);
    }

    #[test]
    fn with_page_preserves_the_session() {
        let anchor = Anchor::from_unix_millis(1_000);
        let query = TimelineQuery::starting(TimelineSource::Following, anchor, 30);
        let paged = query.with_page(3);
        assert!(paged.shares_anchor(&query));
        assert_eq!(paged.page, 3);
    }
}
