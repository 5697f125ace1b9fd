//! Thread/repost duplicate suppression
//!
//! The same underlying post can appear several times in a chronological or
//! algorithmic feed: as a standalone post, inside a thread, and via a
//! repost. Only the first occurrence in display order is kept, tracked by
//! conversation root. Pinned items are never suppressed.

use skein_core::{FeedItem, PostUri};
use skein_tiling::{TiledList, TiledQuery};
use std::collections::HashSet;

/// Suppress repeat appearances of a conversation, first occurrence wins.
///
/// Tile structure is preserved; suppressed items are removed from the tile
/// that carried them. The pass is idempotent: its output contains one item
/// per root (plus pinned items), which a second pass leaves untouched.
pub fn filter_thread_duplicates<Q: TiledQuery>(
    list: TiledList<Q, FeedItem>,
) -> TiledList<Q, FeedItem> {
    let mut seen: HashSet<PostUri> = HashSet::new();
    let tiles = list
        .into_tiles()
        .into_iter()
        .map(|mut tile| {
            tile.items.retain(|item| {
                if item.is_pinned() {
                    // Still recorded, so later copies of a pinned post are
                    // suppressed; the pinned appearance itself always shows.
                    seen.insert(item.thread_root().clone());
                    return true;
                }
                seen.insert(item.thread_root().clone())
            });
            tile
        })
        .collect();
    TiledList::from_tiles(tiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use skein_core::Anchor;
    use skein_testkit::{pinned, repost, single, thread_item, tiled};

    use crate::query::TimelineQuery;
    use crate::source::TimelineSource;

    fn query(page: u64) -> TimelineQuery {
        TimelineQuery {
            source: TimelineSource::Following,
            page,
            anchor: Anchor::from_unix_millis(1_000),
            limit: 30,
        }
    }

    #[test]
    fn first_appearance_wins_across_tiles() {
        let list = tiled(vec![
            (query(0), vec![single(1), repost(2, 9)]),
            (query(1), vec![repost(1, 8), single(2), single(3)]),
        ]);

        let filtered = filter_thread_duplicates(list);
        let ids: Vec<_> = filtered.items().map(FeedItem::id).collect();
        assert_eq!(ids.len(), 3);
        // The repost of 1 and the standalone 2 were later appearances.
        assert!(ids.iter().any(|id| id.contains("post-3")));
        assert!(!ids.iter().any(|id| id.contains("repost-did:plc:user8")));
    }

    #[test]
    fn threads_suppress_their_conversation() {
        let list = tiled(vec![(
            query(0),
            vec![thread_item(1, &[2, 3]), single(1), repost(1, 7)],
        )]);

        let filtered = filter_thread_duplicates(list);
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn pinned_items_are_never_suppressed() {
        let list = tiled(vec![(query(0), vec![single(1), pinned(1), single(1)])]);

        let filtered = filter_thread_duplicates(list);
        let items: Vec<_> = filtered.items().cloned().collect();
        // The duplicate standalone went away; the pinned copy stayed.
        assert_eq!(items.len(), 2);
        assert!(items.iter().any(FeedItem::is_pinned));
    }

    #[test]
    fn pinned_first_suppresses_later_copies() {
        let list = tiled(vec![(query(0), vec![pinned(1), single(1)])]);
        let filtered = filter_thread_duplicates(list);
        assert_eq!(filtered.len(), 1);
        assert!(filtered.items().all(FeedItem::is_pinned));
    }

    fn arbitrary_item() -> impl Strategy<Value = FeedItem> {
        let root = 0usize..4;
        prop_oneof![
            root.clone().prop_map(single),
            (root.clone(), 5usize..8).prop_map(|(n, by)| repost(n, by)),
            root.clone().prop_map(|n| thread_item(n, &[n + 10])),
            root.prop_map(pinned),
        ]
    }

    proptest! {
        #[test]
        fn filtering_is_idempotent(
            first in proptest::collection::vec(arbitrary_item(), 0..12),
            second in proptest::collection::vec(arbitrary_item(), 0..12),
        ) {
            let list = tiled(vec![(query(0), first), (query(1), second)]);
            let once = filter_thread_duplicates(list);
            let twice = filter_thread_duplicates(once.clone());
            prop_assert_eq!(once, twice);
        }
    }
}
