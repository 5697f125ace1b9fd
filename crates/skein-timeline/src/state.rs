//! Observable state and status
//!
//! [`TimelineState`] is what a frontend renders: the assembled items, the
//! query being looked at, grid geometry, refresh status, and whether the
//! remote has newer items than the top of the list.

use crate::query::TimelineQuery;
use serde::{Deserialize, Serialize};
use skein_core::{Anchor, FeedItem};
use skein_tiling::TiledList;

/// Where a timeline is in its refresh cycle.
///
/// `Initial → Refreshing(anchor) → Refreshed(anchor) → Refreshing(anchor') → …`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TilingStatus {
    /// No refresh has started yet.
    Initial,
    /// A pagination session is loading its first page.
    Refreshing {
        /// The session being loaded
        anchor: Anchor,
    },
    /// A pagination session has items on screen.
    Refreshed {
        /// The session on screen
        anchor: Anchor,
    },
}

impl TilingStatus {
    /// The anchor this status is tied to, if any.
    pub fn anchor(&self) -> Option<Anchor> {
        match self {
            Self::Initial => None,
            Self::Refreshing { anchor } | Self::Refreshed { anchor } => Some(*anchor),
        }
    }

    /// Whether a refresh is in flight.
    pub fn is_refreshing(&self) -> bool {
        matches!(self, Self::Refreshing { .. })
    }
}

/// How timeline items are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Presentation {
    /// Full posts with embeds, one column.
    TextAndEmbed,
    /// Media-forward condensed grid.
    CondensedMedia,
}

impl Presentation {
    /// The column count this presentation implies. Frontends may override
    /// with a measured [`GridSize`](crate::action::TimelineAction::GridSize).
    pub fn num_columns(self) -> u32 {
        match self {
            Self::TextAndEmbed => 1,
            Self::CondensedMedia => 2,
        }
    }
}

/// The state one timeline screen observes and renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineState {
    /// The query the screen is currently looking at
    pub query: TimelineQuery,
    /// Grid column count
    pub num_columns: u32,
    /// Refresh cycle position
    pub status: TilingStatus,
    /// Whether the remote has items newer than the top of the list
    pub has_updates: bool,
    /// Current layout preference
    pub presentation: Presentation,
    /// The assembled, deduplicated items
    pub items: TiledList<TimelineQuery, FeedItem>,
}

impl TimelineState {
    /// The state a screen starts from, before any fetch has landed.
    pub fn initial(query: TimelineQuery, presentation: Presentation) -> Self {
        Self {
            query,
            num_columns: presentation.num_columns(),
            status: TilingStatus::Initial,
            has_updates: false,
            presentation,
            items: TiledList::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::TimelineSource;

    #[test]
    fn initial_state_is_empty_and_unrefreshed() {
        let query = TimelineQuery::starting(
            TimelineSource::Following,
            Anchor::from_unix_millis(1_000),
            30,
        );
        let state = TimelineState::initial(query, Presentation::TextAndEmbed);
        assert_eq!(state.status, TilingStatus::Initial);
        assert_eq!(state.status.anchor(), None);
        assert!(state.items.is_empty());
        assert_eq!(state.num_columns, 1);
        assert!(!state.has_updates);
    }
}
