//! Day-rollover accumulation.
//!
//! The hardware step counter is monotonically increasing but resets to zero
//! on reboot, so its absolute value is meaningless across days. The
//! accumulator turns it into per-day counts with a negative-offset trick:
//! when a new day starts with the counter reading `R`, the day's record is
//! seeded with `delta = -R`. Incremental credits during the day then drive
//! the delta toward the true "steps taken since this day started",
//! independent of what the counter's absolute value means.
//!
//! The same `R` at the boundary is steps accumulated since the last reset,
//! which belongs to the previous day's tail, so it is credited to
//! yesterday's record - if yesterday was ever initialized.

use std::cell::Cell;

use tracing::{debug, info, warn};

use stride_store::Ledger;
use stride_types::DayKey;

use crate::error::Result;

/// Outcome of a day-rollover attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rollover {
    /// The day already had a record; nothing was written. Further steps for
    /// this day must arrive via [`Accumulator::record_steps`].
    AlreadyTracked,
    /// The raw counter value was negative; nothing was written.
    Rejected,
    /// A fresh record was created with the negative offset.
    Opened {
        /// Whether the previous day existed and received the boundary credit.
        previous_credited: bool,
    },
}

/// Counts of rows removed by the startup maintenance pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaintenanceReport {
    /// Rows removed because their delta was negative.
    pub negative_purged: usize,
    /// Rows removed because their delta reached the corruption threshold.
    pub corrupt_purged: usize,
}

/// The day-accumulation algorithm over a [`Ledger`].
///
/// Owns the ledger handle for its lifetime; the single-writer contract of
/// the ledger is inherited, so one `Accumulator` per store, driven from one
/// sensor-event handling path.
pub struct Accumulator {
    ledger: Ledger,
    maintenance_done: Cell<bool>,
}

impl Accumulator {
    /// Wrap a ledger.
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger,
            maintenance_done: Cell::new(false),
        }
    }

    /// Read-only access to the underlying ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Consume the accumulator, returning the ledger handle.
    pub fn into_ledger(self) -> Ledger {
        self.ledger
    }

    /// Process the first raw counter reading of a new day.
    ///
    /// If `day` has no record yet, it is created with `delta = -raw_steps`,
    /// and `raw_steps` is credited to the previous day's record (a no-op if
    /// that day was never initialized). If the creation loses a race to a
    /// concurrent writer the previous-day credit is still applied - the two
    /// writes are independent.
    ///
    /// Calling this again for an already-tracked day writes nothing.
    pub fn start_day(&self, day: DayKey, raw_steps: i32) -> Result<Rollover> {
        if raw_steps < 0 {
            warn!("Rejecting day start for {}: negative raw value {}", day, raw_steps);
            return Ok(Rollover::Rejected);
        }

        if self.ledger.steps(day)?.is_some() {
            debug!("Day {} already tracked, ignoring rollover", day);
            return Ok(Rollover::AlreadyTracked);
        }

        if !self.ledger.create_day(day, -raw_steps)? {
            debug!("Lost creation race for day {}", day);
        }

        // Counter value at the boundary is yesterday's tail
        let previous_credited = self.ledger.add_steps(day.previous(), raw_steps)?;

        info!(
            "Started day {} with offset {} (previous day credited: {})",
            day, -raw_steps, previous_credited
        );
        Ok(Rollover::Opened { previous_credited })
    }

    /// Credit incremental steps observed during an already-started day.
    ///
    /// Returns whether the day had a record to credit. `false` means the
    /// rollover for `day` has not happened yet and the credit was dropped,
    /// matching the ledger's no-implicit-creation contract.
    pub fn record_steps(&self, day: DayKey, amount: i32) -> Result<bool> {
        Ok(self.ledger.add_steps(day, amount)?)
    }

    /// Run the startup maintenance pass: purge negative rows, then corrupt
    /// ones.
    ///
    /// Must be invoked after reboot detection and before the first rollover
    /// of the new day; at any later point the negative purge would delete
    /// the current day's legitimately negative offset. Runs at most once per
    /// process - repeated calls return `None` without touching the store.
    pub fn run_maintenance(&self) -> Result<Option<MaintenanceReport>> {
        if self.maintenance_done.replace(true) {
            debug!("Maintenance already ran this process, skipping");
            return Ok(None);
        }

        let report = MaintenanceReport {
            negative_purged: self.ledger.purge_negative()?,
            corrupt_purged: self.ledger.purge_corrupt()?,
        };

        info!(
            "Maintenance pass: {} negative, {} corrupt rows purged",
            report.negative_purged, report.corrupt_purged
        );
        Ok(Some(report))
    }
}
