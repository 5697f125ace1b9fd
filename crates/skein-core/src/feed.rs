//! Posts and timeline item variants
//!
//! The feed model is a minimal hydrated view of what a timeline displays.
//! The same underlying post can surface several ways in one feed: as a
//! standalone post, inside a thread, and via a repost. [`FeedItem`] keeps
//! those appearances distinguishable while exposing a shared
//! [`thread_root`](FeedItem::thread_root) identity for duplicate suppression.

use crate::errors::CoreError;
use crate::identifiers::{Did, PostUri};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A hydrated post view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// The post's record URI
    pub uri: PostUri,
    /// The post's author
    pub author: Did,
    /// Record text
    pub text: String,
    /// When the app view indexed the post
    pub indexed_at: OffsetDateTime,
    /// Root of the reply thread, if this post is a reply
    pub reply_root: Option<PostUri>,
}

impl Post {
    /// The root identity of the conversation this post belongs to:
    /// its reply root when it is a reply, otherwise the post itself.
    pub fn thread_root(&self) -> &PostUri {
        self.reply_root.as_ref().unwrap_or(&self.uri)
    }
}

/// One displayable item in an assembled timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedItem {
    /// A standalone post.
    Single {
        /// The post
        post: Post,
    },
    /// A run of posts from one conversation, shown together.
    Thread {
        /// Root identity of the conversation
        root: PostUri,
        /// The posts shown, in display order
        posts: Vec<Post>,
    },
    /// A post surfaced by someone else's repost.
    Repost {
        /// The reposted post
        post: Post,
        /// Who reposted it
        by: Did,
        /// When the repost was indexed
        at: OffsetDateTime,
    },
    /// A post pinned to the top of a profile feed.
    Pinned {
        /// The pinned post
        post: Post,
    },
}

impl FeedItem {
    /// Build a thread item from its posts, deriving the root identity from
    /// the first post. Fails on an empty post list.
    pub fn thread(posts: Vec<Post>) -> Result<Self, CoreError> {
        let first = posts.first().ok_or(CoreError::EmptyThread)?;
        Ok(Self::Thread {
            root: first.thread_root().clone(),
            posts,
        })
    }

    /// A stable display identity, unique per appearance.
    ///
    /// A repost of a post and the post itself are distinct appearances with
    /// distinct ids; duplicate suppression goes through
    /// [`thread_root`](Self::thread_root) instead.
    pub fn id(&self) -> String {
        match self {
            Self::Single { post } => post.uri.to_string(),
            Self::Thread { root, .. } => format!("thread-{root}"),
            Self::Repost { post, by, .. } => format!("{}-repost-{by}", post.uri),
            Self::Pinned { post } => format!("pinned-{}", post.uri),
        }
    }

    /// The conversation-root identity used for duplicate suppression.
    pub fn thread_root(&self) -> &PostUri {
        match self {
            Self::Single { post } | Self::Pinned { post } => post.thread_root(),
            Self::Thread { root, .. } => root,
            Self::Repost { post, .. } => post.thread_root(),
        }
    }

    /// Whether this item is pinned. Pinned items are exempt from
    /// duplicate suppression.
    pub fn is_pinned(&self) -> bool {
        matches!(self, Self::Pinned { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(rkey: &str, reply_root: Option<&str>) -> Post {
        let author: Did = "did:plc:tester".parse().expect("did");
        Post {
            uri: PostUri::new(author.clone(), rkey),
            author,
            text: format!("post {rkey}"),
            indexed_at: OffsetDateTime::UNIX_EPOCH,
            reply_root: reply_root.map(|r| {
                PostUri::new("did:plc:tester".parse().expect("did"), r)
            }),
        }
    }

    #[test]
    fn standalone_post_is_its_own_root() {
        let item = FeedItem::Single {
            post: post("aaa", None),
        };
        assert_eq!(item.thread_root().record_key(), "aaa");
    }

    #[test]
    fn reply_roots_through_to_conversation() {
        let item = FeedItem::Single {
            post: post("bbb", Some("aaa")),
        };
        assert_eq!(item.thread_root().record_key(), "aaa");
    }

    #[test]
    fn thread_derives_root_from_first_post() {
        let item =
            FeedItem::thread(vec![post("bbb", Some("aaa")), post("ccc", Some("aaa"))])
                .expect("thread");
        assert_eq!(item.thread_root().record_key(), "aaa");
    }

    #[test]
    fn empty_thread_is_rejected() {
        assert_eq!(FeedItem::thread(vec![]), Err(CoreError::EmptyThread));
    }

    #[test]
    fn repost_and_original_share_a_root_but_not_an_id() {
        let original = FeedItem::Single {
            post: post("aaa", None),
        };
        let repost = FeedItem::Repost {
            post: post("aaa", None),
            by: "did:plc:other".parse().expect("did"),
            at: OffsetDateTime::UNIX_EPOCH,
        };
        assert_eq!(original.thread_root(), repost.thread_root());
        assert_ne!(original.id(), repost.id());
    }
}
