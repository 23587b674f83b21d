//! Query builder for day records.
//!
//! [`DayQuery`] follows the builder pattern for ergonomic construction of
//! range listings, for example to chart the last month of history.
//!
//! # Example
//!
//! ```
//! use stride_store::{DayQuery, Ledger};
//! use stride_types::DayKey;
//!
//! let ledger = Ledger::open_in_memory()?;
//! let today = DayKey::from_millis(1_755_043_200_000);
//!
//! // Last 30 days, newest first
//! let query = DayQuery::new()
//!     .since(DayKey::from_millis(today.as_millis() - 30 * stride_types::DAY_MS))
//!     .until(today)
//!     .limit(30);
//!
//! let days = ledger.query_days(&query)?;
//! # Ok::<(), stride_store::Error>(())
//! ```

use stride_types::DayKey;

/// Fluent query builder for day records.
///
/// All filter methods are optional and can be chained in any order. By
/// default, results are ordered by day descending (newest first).
#[derive(Debug, Default, Clone)]
pub struct DayQuery {
    /// Include days at or after this key.
    pub since: Option<DayKey>,
    /// Include days at or before this key.
    pub until: Option<DayKey>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Order by day descending (newest first).
    pub newest_first: bool,
}

impl DayQuery {
    /// Create a new query with default settings: no range filter, no limit,
    /// newest first.
    #[must_use]
    pub fn new() -> Self {
        Self {
            newest_first: true,
            ..Default::default()
        }
    }

    /// Include only days at or after this key.
    #[must_use]
    pub fn since(mut self, day: DayKey) -> Self {
        self.since = Some(day);
        self
    }

    /// Include only days at or before this key.
    #[must_use]
    pub fn until(mut self, day: DayKey) -> Self {
        self.until = Some(day);
        self
    }

    /// Limit the number of results.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Order results oldest first (chronological order).
    #[must_use]
    pub fn oldest_first(mut self) -> Self {
        self.newest_first = false;
        self
    }
}
