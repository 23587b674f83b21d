//! Day-rollover accumulation logic for the stride step ledger.
//!
//! This crate turns a raw, reset-prone hardware step counter into correct
//! per-day ledger state. The hardware counter only ever counts up, but it
//! restarts from zero whenever the device reboots, so its absolute value
//! cannot be stored as-is. The [`Accumulator`] applies the negative-offset
//! bookkeeping that makes each day's stored delta converge on "steps taken
//! since this day started":
//!
//! - **Day rollover**: the first reading `R` of a new day seeds the day's
//!   record with `-R` and credits `R` to the previous day's tail.
//! - **Incremental credits**: steps observed during the day are added to
//!   the already-seeded record.
//! - **Maintenance**: once per process start, stale negative offsets and
//!   corrupt rows are purged - safe only before the first rollover of the
//!   new day.
//! - **Restore**: finalized backup values are inserted into empty days
//!   only, idempotently and in any order.
//!
//! # Quick start
//!
//! ```
//! use stride_core::Accumulator;
//! use stride_store::Ledger;
//! use stride_types::DayKey;
//!
//! let acc = Accumulator::new(Ledger::open_in_memory()?);
//! let today = DayKey::from_millis(1_755_043_200_000);
//!
//! acc.start_day(today, 1_500)?;      // counter read 1500 at day start
//! acc.record_steps(today, 1_700)?;   // 1700 steps walked since then
//!
//! assert_eq!(acc.ledger().steps(today)?, Some(200));
//! # Ok::<(), stride_core::Error>(())
//! ```

pub mod accumulator;
pub mod error;
pub mod events;
pub mod restore;

pub use accumulator::{Accumulator, MaintenanceReport, Rollover};
pub use error::{Error, Result};
pub use events::SensorEvent;
pub use restore::RestoreReport;
