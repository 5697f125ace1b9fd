//! Continuation tokens and fetched pages
//!
//! The remote API pages forward only: each fetched page carries an opaque
//! token saying where the next page resumes. There is no backward cursor,
//! which is why the tiler caches tokens per query (see
//! [`CursorTokenCache`](crate::tokens::CursorTokenCache)).

use serde::{Deserialize, Serialize};

/// An opaque token identifying where to resume on the remote side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cursor {
    /// Start from the top; no token yet.
    Initial,
    /// Resume from the given remote token.
    Next(String),
    /// The remote reported no further pages.
    Pending,
}

impl Cursor {
    /// Whether this cursor can be used to fetch a page.
    ///
    /// `Pending` means the previous page was the last one; fetching with it
    /// would be asking the remote for pages it already said do not exist.
    pub fn is_fetchable(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// One fetched page of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorList<I> {
    /// The page's items, in feed order
    pub items: Vec<I>,
    /// Where the page after this one resumes
    pub next_cursor: Cursor,
}

impl<I> CursorList<I> {
    /// A page followed by more pages at `token`.
    pub fn new(items: Vec<I>, token: impl Into<String>) -> Self {
        Self {
            items,
            next_cursor: Cursor::Next(token.into()),
        }
    }

    /// The last page: the remote has nothing further.
    pub fn terminal(items: Vec<I>) -> Self {
        Self {
            items,
            next_cursor: Cursor::Pending,
        }
    }
}

impl<I> Default for CursorList<I> {
    fn default() -> Self {
        Self::terminal(Vec::new())
    }
}
