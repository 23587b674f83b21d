//! Data models for stored and exported data.

use serde::{Deserialize, Serialize};

use stride_types::DayKey;

/// Snapshot of the ledger's derived aggregates.
///
/// Produced by [`Ledger::totals`](crate::Ledger::totals). `valid_days` is
/// floored at 1, so dividing by it is always safe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LedgerTotals {
    /// Sum of all settled days strictly before the snapshot day.
    pub total: i64,
    /// Best single-day delta seen so far (live value; today's still-growing
    /// delta participates).
    pub record: i32,
    /// Number of settled days, at least 1.
    pub valid_days: u32,
}

impl LedgerTotals {
    /// Average steps per settled day, excluding the snapshot day.
    #[must_use]
    pub fn average_per_day(&self) -> i64 {
        // valid_days >= 1 by construction
        self.total / i64::from(self.valid_days)
    }
}

/// One row of the CSV backup format: a day and its finalized step count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupEntry {
    /// The day this entry belongs to.
    pub day: DayKey,
    /// Absolute step count for the day; never negative in a valid backup.
    pub steps: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_divides_by_floored_day_count() {
        let totals = LedgerTotals {
            total: 0,
            record: 0,
            valid_days: 1,
        };
        assert_eq!(totals.average_per_day(), 0);

        let totals = LedgerTotals {
            total: 21_000,
            record: 9_000,
            valid_days: 3,
        };
        assert_eq!(totals.average_per_day(), 7_000);
    }
}
