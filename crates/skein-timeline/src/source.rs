//! Timeline source keys
//!
//! The source key names which feed a timeline shows. Together with a page
//! and an anchor it forms a [`TimelineQuery`](crate::query::TimelineQuery).

use serde::{Deserialize, Serialize};
use skein_core::{Did, FeedUri};
use std::fmt;

/// Which posts a profile timeline shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileFilter {
    /// Posts and replies
    PostsWithReplies,
    /// Top-level posts only
    PostsNoReplies,
    /// Posts with media attached
    PostsWithMedia,
}

/// The feed a timeline is keyed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimelineSource {
    /// The signed-in user's following timeline
    Following,
    /// One profile's posts
    Profile {
        /// Whose profile
        did: Did,
        /// Which of their posts
        filter: ProfileFilter,
    },
    /// A feed generator's output
    FeedGenerator {
        /// The generator record
        uri: FeedUri,
    },
    /// A curated list's posts
    List {
        /// The list record
        uri: FeedUri,
    },
}

impl fmt::Display for TimelineSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Following => f.write_str("following"),
            Self::Profile { did, filter } => write!(f, "profile:{did}:{filter:?}"),
            Self::FeedGenerator { uri } => write!(f, "feed:{uri}"),
            Self::List { uri } => write!(f, "list:{uri}"),
        }
    }
}
