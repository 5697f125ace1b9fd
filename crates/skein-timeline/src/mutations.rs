//! The pure reduce step
//!
//! Actions and fetch results both reduce into [`TimelineState`] here, with
//! no async machinery involved; the engine interprets the returned
//! [`Effect`]s. Keeping this step pure is what makes the anchor tie-break
//! and validity rules directly testable.

use crate::action::TimelineAction;
use crate::dedup::filter_thread_duplicates;
use crate::query::TimelineQuery;
use crate::state::{TilingStatus, TimelineState};
use skein_core::{Anchor, FeedItem};
use skein_tiling::{TiledList, TiledQuery};

/// What the engine must do after an action reduced.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Nothing beyond the state change.
    None,
    /// Feed the current pipeline a new pivot query.
    ForwardQuery(TimelineQuery),
    /// Push a new column count to the pipeline.
    UpdateColumns(u32),
    /// Tear down the pipeline and start a new session from `starting`.
    Rebuild {
        /// The query seeding the new pipeline
        starting: TimelineQuery,
    },
}

/// Reduce one action into the state.
///
/// `LoadAround` is accepted only if it shares the current anchor or carries
/// a strictly newer one. The tie-break favors queries triggered by fresh
/// scroll or refresh events over stale boundary-triggered queries that can
/// race in after a refresh; an older anchor always loses to the incumbent.
pub fn apply_action(state: &mut TimelineState, action: TimelineAction) -> Effect {
    match action {
        TimelineAction::GridSize(columns) => {
            state.num_columns = columns;
            Effect::UpdateColumns(columns)
        }
        TimelineAction::UpdatePreferredPresentation(presentation) => {
            state.presentation = presentation;
            state.num_columns = presentation.num_columns();
            Effect::UpdateColumns(state.num_columns)
        }
        TimelineAction::DismissRefresh => {
            state.has_updates = false;
            Effect::None
        }
        TimelineAction::Refresh => {
            let anchor = Anchor::refreshed_after(state.query.anchor);
            let starting = state.query.refreshed(anchor);
            state.query = starting.clone();
            state.status = TilingStatus::Refreshing { anchor };
            Effect::Rebuild { starting }
        }
        TimelineAction::LoadAround(query) => {
            if query.source != state.query.source {
                return Effect::None;
            }
            if query.shares_anchor(&state.query) {
                state.query = query.clone();
                Effect::ForwardQuery(query)
            } else if query.anchor > state.query.anchor {
                state.query = query.clone();
                Effect::Rebuild { starting: query }
            } else {
                Effect::None
            }
        }
    }
}

/// Reduce one fetched list into the state.
///
/// Returns `false` when the list is a stale or partial artifact of a
/// superseded pipeline; such results are expected races and are dropped
/// without touching state.
///
/// On a valid, non-empty fetch that starts at page 0, the status flips to
/// `Refreshed` when `refreshed_on_new_items` is set - but only if the
/// fetched anchor still matches the current query's anchor, which guards
/// against a refresh that started while this fetch was in flight.
pub fn apply_fetch(
    state: &mut TimelineState,
    fetched: TiledList<TimelineQuery, FeedItem>,
    refreshed_on_new_items: bool,
) -> bool {
    if !fetched.is_valid_for(&state.query) {
        return false;
    }

    if refreshed_on_new_items && !fetched.is_empty() {
        if let Some(anchor) = fetched.anchor_of_first_page() {
            if anchor == state.query.anchor {
                state.status = TilingStatus::Refreshed { anchor };
            }
        }
    }

    state.items = filter_thread_duplicates(fetched);
    true
}
