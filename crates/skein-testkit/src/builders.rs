//! Deterministic post and feed item builders
//!
//! Builders are indexed: `post(1)` is always the same post, authored by
//! `did(1)` and indexed one second after the epoch. Items sharing an index
//! share a conversation root, which is what the dedup tests lean on.

use skein_core::{Did, FeedItem, Post, PostUri};
use skein_tiling::{Tile, TiledList, TiledQuery};
use time::{Duration, OffsetDateTime};

/// The nth test DID.
pub fn did(n: usize) -> Did {
    format!("did:plc:user{n}").parse().expect("test did")
}

/// The nth test post.
pub fn post(n: usize) -> Post {
    let author = did(n);
    Post {
        uri: PostUri::new(author.clone(), format!("post-{n}")),
        author,
        text: format!("post {n}"),
        indexed_at: OffsetDateTime::UNIX_EPOCH + Duration::seconds(n as i64),
        reply_root: None,
    }
}

/// The nth test post as a reply rooted at post `root`.
pub fn reply(n: usize, root: usize) -> Post {
    Post {
        reply_root: Some(post(root).uri),
        ..post(n)
    }
}

/// A standalone appearance of post `n`.
pub fn single(n: usize) -> FeedItem {
    FeedItem::Single { post: post(n) }
}

/// Post `n` surfaced by a repost from `did(by)`.
pub fn repost(n: usize, by: usize) -> FeedItem {
    FeedItem::Repost {
        post: post(n),
        by: did(by),
        at: OffsetDateTime::UNIX_EPOCH,
    }
}

/// A thread rooted at post `root` with the given replies.
pub fn thread_item(root: usize, replies: &[usize]) -> FeedItem {
    let mut posts = vec![post(root)];
    posts.extend(replies.iter().map(|&n| reply(n, root)));
    FeedItem::thread(posts).expect("non-empty thread")
}

/// A pinned appearance of post `n`.
pub fn pinned(n: usize) -> FeedItem {
    FeedItem::Pinned { post: post(n) }
}

/// Assemble a tiled list from `(query, items)` pairs in display order.
pub fn tiled<Q: TiledQuery>(tiles: Vec<(Q, Vec<FeedItem>)>) -> TiledList<Q, FeedItem> {
    TiledList::from_tiles(
        tiles
            .into_iter()
            .map(|(query, items)| Tile { query, items })
            .collect(),
    )
}
