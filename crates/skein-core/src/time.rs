//! Pagination epoch stamps
//!
//! An [`Anchor`] identifies one pagination session: every query belonging to
//! the same scroll-through of a timeline carries the same anchor, and a
//! refresh stamps a strictly newer one. Two queries are comparable by page
//! number only when their anchors are equal.

use serde::{Deserialize, Serialize};
use std::fmt;
use time::{Duration, OffsetDateTime};

/// An instant identifying a pagination session/epoch.
///
/// Anchors are totally ordered. The only hard requirement on construction is
/// that [`Anchor::refreshed_after`] yields a strictly greater anchor than its
/// argument, so a refresh always supersedes the session it replaces even if
/// the wall clock has not visibly advanced.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Anchor(OffsetDateTime);

impl Anchor {
    /// An anchor at the unix epoch. Useful as a neutral starting value.
    pub const UNIX_EPOCH: Self = Self(OffsetDateTime::UNIX_EPOCH);

    /// Stamp an anchor at the current instant.
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    /// Build an anchor at a fixed offset from the unix epoch.
    pub fn from_unix_millis(millis: i64) -> Self {
        Self(OffsetDateTime::UNIX_EPOCH + Duration::milliseconds(millis))
    }

    /// Stamp a refresh anchor strictly greater than `prev`.
    ///
    /// Uses the current instant when the clock has advanced past `prev`;
    /// otherwise nudges one millisecond past it so the ordering invariant
    /// holds under coarse or non-advancing clocks.
    pub fn refreshed_after(prev: Self) -> Self {
        let now = Self::now();
        if now > prev {
            now
        } else {
            Self(prev.0 + Duration::milliseconds(1))
        }
    }

    /// The underlying instant.
    pub fn instant(&self) -> OffsetDateTime {
        self.0
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.unix_timestamp_nanos() / 1_000_000)
    }
}
