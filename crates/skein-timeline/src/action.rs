//! Frontend-dispatched actions
//!
//! The narrow surface a frontend uses to drive a timeline. List widgets
//! report the query window they are looking at with `LoadAround`;
//! pull-to-refresh sends `Refresh`; everything else is presentation.

use crate::query::TimelineQuery;
use crate::state::Presentation;
use serde::{Deserialize, Serialize};

/// One user-or-layout-driven timeline action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TimelineAction {
    /// The measured grid column count changed.
    GridSize(u32),
    /// The list is looking at this query; keep a window loaded around it.
    LoadAround(TimelineQuery),
    /// Restart pagination at the top under a fresh anchor.
    Refresh,
    /// Switch layout presentation.
    UpdatePreferredPresentation(Presentation),
    /// Hide the "new items available" affordance.
    DismissRefresh,
}
