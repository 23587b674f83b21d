//! Core types for step ledger data.

use core::fmt;

use time::{OffsetDateTime, Time};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One calendar day in milliseconds.
pub const DAY_MS: i64 = 86_400_000;

/// Deltas at or beyond this value are considered corrupt (sensor glitch or
/// counter overflow). Corrupt rows are excluded from every aggregate and
/// removed by the maintenance purge.
pub const CORRUPT_DELTA: i32 = 2_000_000_000;

/// Key identifying one calendar day.
///
/// A `DayKey` is the millisecond Unix timestamp of local midnight at the
/// start of the day. Two readings taken on the same local calendar day map
/// to the same key regardless of the time of day.
///
/// # Examples
///
/// ```
/// use stride_types::DayKey;
/// use time::{Date, Month, Time, UtcOffset};
///
/// let offset = UtcOffset::from_hms(2, 0, 0).unwrap();
/// let morning = Date::from_calendar_date(2026, Month::March, 5)
///     .unwrap()
///     .with_time(Time::from_hms(7, 30, 0).unwrap())
///     .assume_offset(offset);
/// let evening = morning.replace_time(Time::from_hms(22, 15, 0).unwrap());
///
/// assert_eq!(DayKey::containing(morning), DayKey::containing(evening));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DayKey(i64);

impl DayKey {
    /// Create a key from a millisecond timestamp.
    ///
    /// The value must already be truncated to a local day start; no
    /// truncation is performed here.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// The millisecond timestamp of this day's local midnight.
    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// The key of the day containing `moment`, in `moment`'s own UTC offset.
    #[must_use]
    pub fn containing(moment: OffsetDateTime) -> Self {
        let midnight = moment.replace_time(Time::MIDNIGHT);
        Self((midnight.unix_timestamp_nanos() / 1_000_000) as i64)
    }

    /// The key of the current local day.
    ///
    /// Falls back to UTC when the local offset cannot be determined (for
    /// example in a multi-threaded process on Unix, where reading the
    /// environment's timezone is unsound).
    #[must_use]
    pub fn today() -> Self {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        Self::containing(now)
    }

    /// The key one calendar day earlier.
    #[must_use]
    pub const fn previous(self) -> Self {
        Self(self.0 - DAY_MS)
    }

    /// The key one calendar day later.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + DAY_MS)
    }
}

impl From<i64> for DayKey {
    fn from(millis: i64) -> Self {
        Self(millis)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One persisted day of step history.
///
/// `delta` is not the day's step count directly. A fresh day is seeded with
/// `delta = -raw`, where `raw` is the hardware counter value at the moment
/// the day started; incremental credits then raise it over the day. Once
/// the day's steps exceed the initial offset, `delta` is the true count of
/// steps taken that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DayRecord {
    /// The day this record belongs to.
    pub day: DayKey,
    /// Signed step delta; see the struct-level docs for semantics.
    pub delta: i32,
}

impl DayRecord {
    /// Whether this day contributes to totals: its offset was overcome and
    /// its delta is below the corruption threshold.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.delta > 0 && self.delta < CORRUPT_DELTA
    }

    /// Whether this row is considered corrupt.
    #[must_use]
    pub const fn is_corrupt(&self) -> bool {
        self.delta >= CORRUPT_DELTA
    }
}
