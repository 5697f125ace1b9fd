//! AT Protocol identifiers
//!
//! Validated newtypes for DIDs and at:// record URIs. Validation here is
//! structural, not resolving: a [`Did`] must look like a DID and a
//! [`PostUri`] must name the post collection, but no network lookup happens.

use crate::errors::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The record collection for posts.
pub const POST_COLLECTION: &str = "app.bsky.feed.post";

/// The record collection for feed generators.
pub const FEED_GENERATOR_COLLECTION: &str = "app.bsky.feed.generator";

/// The record collection for curated lists.
pub const LIST_COLLECTION: &str = "app.bsky.graph.list";

/// A decentralized identifier, e.g. `did:plc:abc123` or `did:web:example.com`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Did(String);

impl Did {
    /// View the DID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The method segment, e.g. `plc` in `did:plc:abc123`.
    pub fn method(&self) -> &str {
        // Validated at construction: did:<method>:<id>
        self.0.split(':').nth(1).unwrap_or_default()
    }
}

impl FromStr for Did {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s.splitn(3, ':');
        match (segments.next(), segments.next(), segments.next()) {
            (Some("did"), Some(method), Some(id)) if !method.is_empty() && !id.is_empty() => {
                Ok(Self(s.to_string()))
            }
            (Some("did"), _, _) => Err(CoreError::invalid_did(s, "expected did:<method>:<id>")),
            _ => Err(CoreError::invalid_did(s, "missing 'did:' prefix")),
        }
    }
}

impl TryFrom<String> for Did {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Did> for String {
    fn from(did: Did) -> Self {
        did.0
    }
}

impl fmt::Display for Did {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The URI of a post record: `at://<did>/app.bsky.feed.post/<rkey>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostUri {
    author: Did,
    record_key: String,
}

impl PostUri {
    /// Build a post URI from its parts.
    pub fn new(author: Did, record_key: impl Into<String>) -> Self {
        Self {
            author,
            record_key: record_key.into(),
        }
    }

    /// The DID of the post's author.
    pub fn author_did(&self) -> &Did {
        &self.author
    }

    /// The record key segment of the URI.
    pub fn record_key(&self) -> &str {
        &self.record_key
    }
}

impl FromStr for PostUri {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (did, collection, rkey) = split_at_uri(s)?;
        if collection != POST_COLLECTION {
            return Err(CoreError::UnsupportedCollection {
                collection: collection.to_string(),
                value: s.to_string(),
            });
        }
        Ok(Self {
            author: did,
            record_key: rkey.to_string(),
        })
    }
}

impl TryFrom<String> for PostUri {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PostUri> for String {
    fn from(uri: PostUri) -> Self {
        uri.to_string()
    }
}

impl fmt::Display for PostUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at://{}/{POST_COLLECTION}/{}", self.author, self.record_key)
    }
}

/// The collection a [`FeedUri`] points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedCollection {
    /// A feed generator record (`app.bsky.feed.generator`)
    Generator,
    /// A curated list record (`app.bsky.graph.list`)
    List,
}

impl FeedCollection {
    /// The collection segment as it appears in the URI.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generator => FEED_GENERATOR_COLLECTION,
            Self::List => LIST_COLLECTION,
        }
    }
}

/// The URI of a feed generator or list record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FeedUri {
    owner: Did,
    collection: FeedCollection,
    record_key: String,
}

impl FeedUri {
    /// Build a feed URI from its parts.
    pub fn new(owner: Did, collection: FeedCollection, record_key: impl Into<String>) -> Self {
        Self {
            owner,
            collection,
            record_key: record_key.into(),
        }
    }

    /// The DID owning the feed record.
    pub fn owner_did(&self) -> &Did {
        &self.owner
    }

    /// Which collection this URI points into.
    pub fn collection(&self) -> FeedCollection {
        self.collection
    }

    /// The record key segment of the URI.
    pub fn record_key(&self) -> &str {
        &self.record_key
    }
}

impl FromStr for FeedUri {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (did, collection, rkey) = split_at_uri(s)?;
        let collection = match collection {
            FEED_GENERATOR_COLLECTION => FeedCollection::Generator,
            LIST_COLLECTION => FeedCollection::List,
            other => {
                return Err(CoreError::UnsupportedCollection {
                    collection: other.to_string(),
                    value: s.to_string(),
                })
            }
        };
        Ok(Self {
            owner: did,
            collection,
            record_key: rkey.to_string(),
        })
    }
}

impl TryFrom<String> for FeedUri {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FeedUri> for String {
    fn from(uri: FeedUri) -> Self {
        uri.to_string()
    }
}

impl fmt::Display for FeedUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "at://{}/{}/{}",
            self.owner,
            self.collection.as_str(),
            self.record_key
        )
    }
}

/// Split `at://<did>/<collection>/<rkey>` into its three segments.
fn split_at_uri(s: &str) -> Result<(Did, &str, &str), CoreError> {
    let rest = s
        .strip_prefix("at://")
        .ok_or_else(|| CoreError::invalid_at_uri(s, "missing 'at://' prefix"))?;

    let mut segments = rest.splitn(3, '/');
    let (Some(did_raw), Some(collection), Some(rkey)) =
        (segments.next(), segments.next(), segments.next())
    else {
        return Err(CoreError::invalid_at_uri(
            s,
            "expected at://<did>/<collection>/<rkey>",
        ));
    };

    if rkey.is_empty() || rkey.contains('/') {
        return Err(CoreError::invalid_at_uri(s, "malformed record key"));
    }

    let did = did_raw
        .parse::<Did>()
        .map_err(|_| CoreError::invalid_at_uri(s, "authority segment is not a did"))?;

    Ok((did, collection, rkey))
}
