//! Backup restoration.
//!
//! Restore is a distinct algorithm from day rollover: the supplied values
//! are already finalized absolute counts, so no offsets are computed and no
//! neighbouring day is touched. Each entry only ever inserts into an empty
//! slot, which makes restoration idempotent and order-independent.

use std::io::Read;

use tracing::info;

use stride_store::read_backup;
use stride_types::DayKey;

use crate::accumulator::Accumulator;
use crate::error::Result;

/// Summary of a restore run, one count per entry outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Entries inserted into previously empty days.
    pub restored: usize,
    /// Entries skipped: the day already had a record, or the value was
    /// negative.
    pub skipped: usize,
}

impl Accumulator {
    /// Restore `(day, steps)` pairs from a backup source.
    ///
    /// Existing days are never overwritten; live data always wins over the
    /// backup. Applying the same set of pairs twice, or in any order,
    /// yields the same end state.
    pub fn restore_days<I>(&self, entries: I) -> Result<RestoreReport>
    where
        I: IntoIterator<Item = (DayKey, i32)>,
    {
        let mut report = RestoreReport::default();

        for (day, steps) in entries {
            if self.ledger().restore_day(day, steps)? {
                report.restored += 1;
            } else {
                report.skipped += 1;
            }
        }

        info!(
            "Restore complete: {} restored, {} skipped",
            report.restored, report.skipped
        );
        Ok(report)
    }

    /// Restore from a backup CSV produced by
    /// [`Ledger::export_backup`](stride_store::Ledger::export_backup).
    pub fn restore_from_backup<R: Read>(&self, reader: R) -> Result<RestoreReport> {
        let entries = read_backup(reader)?;
        self.restore_days(entries.into_iter().map(|e| (e.day, e.steps)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use stride_store::Ledger;
    use stride_types::DAY_MS;

    fn day(n: i64) -> DayKey {
        DayKey::from_millis(n * DAY_MS)
    }

    fn accumulator() -> Accumulator {
        Accumulator::new(Ledger::open_in_memory().unwrap())
    }

    #[test]
    fn restore_fills_empty_days_only() {
        let acc = accumulator();
        acc.ledger().restore_day(day(2), 5000).unwrap();

        let report = acc
            .restore_days(vec![(day(1), 4000), (day(2), 9999), (day(3), -3)])
            .unwrap();

        assert_eq!(report, RestoreReport { restored: 1, skipped: 2 });
        assert_eq!(acc.ledger().steps(day(1)).unwrap(), Some(4000));
        // Live data wins over the backup
        assert_eq!(acc.ledger().steps(day(2)).unwrap(), Some(5000));
        assert_eq!(acc.ledger().steps(day(3)).unwrap(), None);
    }

    #[test]
    fn restore_twice_is_idempotent() {
        let acc = accumulator();

        let first = acc.restore_days(vec![(day(1), 4000)]).unwrap();
        assert_eq!(first, RestoreReport { restored: 1, skipped: 0 });

        let second = acc.restore_days(vec![(day(1), 4000)]).unwrap();
        assert_eq!(second, RestoreReport { restored: 0, skipped: 1 });
        assert_eq!(acc.ledger().steps(day(1)).unwrap(), Some(4000));
    }

    #[test]
    fn restore_never_touches_the_previous_day() {
        let acc = accumulator();
        acc.ledger().restore_day(day(1), 2000).unwrap();

        acc.restore_days(vec![(day(2), 3000)]).unwrap();
        assert_eq!(acc.ledger().steps(day(1)).unwrap(), Some(2000));
    }

    proptest! {
        #[test]
        fn restore_is_order_independent(
            entries in prop::collection::btree_map(0i64..3650, 0i32..200_000, 0..40)
        ) {
            let forward = accumulator();
            let reverse = accumulator();

            let pairs: Vec<_> = entries.iter().map(|(&n, &v)| (day(n), v)).collect();

            forward.restore_days(pairs.clone()).unwrap();
            reverse.restore_days(pairs.iter().rev().cloned()).unwrap();

            for &(d, v) in &pairs {
                prop_assert_eq!(forward.ledger().steps(d).unwrap(), Some(v));
                prop_assert_eq!(reverse.ledger().steps(d).unwrap(), Some(v));
            }
            prop_assert_eq!(
                forward.ledger().count_days().unwrap(),
                reverse.ledger().count_days().unwrap()
            );
        }
    }
}
