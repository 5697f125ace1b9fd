//! A scripted, deterministic feed source
//!
//! [`ScriptedFeed`] serves a fixed sequence of pages keyed by cursor, the
//! way the real remote does: `Initial` resolves to page 0, and each page's
//! token resolves to the page after it. Every request is recorded for
//! assertions, individual pages can be held back and released to script
//! races, and the update signal is a toggle.

use futures::stream::{self, BoxStream, StreamExt};
use parking_lot::Mutex;
use skein_core::FeedItem;
use skein_tiling::{Cursor, CursorList};
use skein_timeline::{TimelineQuery, TimelineRepository, TimelineSource};
use std::collections::HashMap;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// An in-memory [`TimelineRepository`] driven by a page script.
pub struct ScriptedFeed {
    pages: Vec<CursorList<FeedItem>>,
    requests: Mutex<Vec<(TimelineQuery, Cursor)>>,
    gates: Mutex<HashMap<usize, watch::Sender<bool>>>,
    updates: watch::Sender<bool>,
}

impl ScriptedFeed {
    /// A feed serving exactly the given pages, tokens included.
    pub fn new(pages: Vec<CursorList<FeedItem>>) -> Self {
        let (updates, _) = watch::channel(false);
        Self {
            pages,
            requests: Mutex::new(Vec::new()),
            gates: Mutex::new(HashMap::new()),
            updates,
        }
    }

    /// A feed serving the given pages with generated tokens
    /// (`cursor-1`, `cursor-2`, …) and a terminal last page.
    pub fn paged(pages: Vec<Vec<FeedItem>>) -> Self {
        let last = pages.len().saturating_sub(1);
        Self::new(
            pages
                .into_iter()
                .enumerate()
                .map(|(index, items)| {
                    if index == last {
                        CursorList::terminal(items)
                    } else {
                        CursorList::new(items, format!("cursor-{}", index + 1))
                    }
                })
                .collect(),
        )
    }

    /// Every `(query, cursor)` pair requested so far, in order.
    pub fn requests(&self) -> Vec<(TimelineQuery, Cursor)> {
        self.requests.lock().clone()
    }

    /// Hold page `index` back until released; fetches for it block.
    pub fn hold_page(&self, index: usize) {
        let (tx, _) = watch::channel(false);
        self.gates.lock().insert(index, tx);
    }

    /// Release a held page; blocked and future fetches proceed.
    pub fn release_page(&self, index: usize) {
        if let Some(gate) = self.gates.lock().remove(&index) {
            let _ = gate.send(true);
        }
    }

    /// Toggle the "remote has newer items" signal.
    pub fn set_updates(&self, available: bool) {
        let _ = self.updates.send(available);
    }

    /// Resolve a cursor to a page index: `Initial` is page 0, a token is
    /// the page following the one that produced it.
    fn page_index(&self, cursor: &Cursor) -> Option<usize> {
        match cursor {
            Cursor::Initial => Some(0),
            Cursor::Next(token) => self
                .pages
                .iter()
                .position(|page| matches!(&page.next_cursor, Cursor::Next(t) if t == token))
                .map(|index| index + 1),
            Cursor::Pending => None,
        }
    }
}

impl TimelineRepository for ScriptedFeed {
    fn timeline_items(
        &self,
        query: &TimelineQuery,
        cursor: Cursor,
    ) -> BoxStream<'static, CursorList<FeedItem>> {
        self.requests.lock().push((query.clone(), cursor.clone()));

        let index = self.page_index(&cursor);
        let page = index.and_then(|i| self.pages.get(i).cloned());
        let gate = index.and_then(|i| self.gates.lock().get(&i).map(watch::Sender::subscribe));

        stream::once(async move {
            if let Some(mut gate) = gate {
                // A dropped gate counts as released.
                let _ = gate.wait_for(|open| *open).await;
            }
            page
        })
        .filter_map(futures::future::ready)
        .boxed()
    }

    fn has_updates(&self, _source: &TimelineSource) -> BoxStream<'static, bool> {
        WatchStream::new(self.updates.subscribe()).boxed()
    }
}
