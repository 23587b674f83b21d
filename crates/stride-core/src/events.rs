//! Sensor event seam.
//!
//! The external sensor collaborator produces three kinds of signals: the
//! first reading of a new day, incremental step deltas during an
//! already-started day, and reboot detection. [`SensorEvent`] is the typed,
//! serializable form of those signals, and [`Accumulator::apply`] dispatches
//! them onto the accumulation operations.
//!
//! Events are plain values with no channel machinery: the system is
//! single-writer and synchronous, so the caller feeds events in sequence.

use serde::{Deserialize, Serialize};

use stride_types::DayKey;

use crate::accumulator::Accumulator;
use crate::error::Result;

/// A signal from the sensor collaborator.
///
/// All events are serializable for logging and replay.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new event types
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum SensorEvent {
    /// First raw counter reading attributed to a new day.
    DayStarted {
        /// The day being started.
        day: DayKey,
        /// The hardware counter's current value.
        raw_steps: i32,
    },
    /// Incremental steps observed during an already-started day.
    StepsTaken {
        /// The day the steps belong to.
        day: DayKey,
        /// Number of steps to credit.
        amount: i32,
    },
    /// The device rebooted; triggers the startup maintenance pass.
    RebootDetected,
}

impl Accumulator {
    /// Dispatch one sensor event onto the accumulation operations.
    ///
    /// `RebootDetected` must be applied before the new day's `DayStarted`
    /// for the maintenance sequencing contract to hold; that ordering is
    /// the caller's responsibility, as is the delivery order in general.
    pub fn apply(&self, event: SensorEvent) -> Result<()> {
        match event {
            SensorEvent::DayStarted { day, raw_steps } => {
                self.start_day(day, raw_steps)?;
            }
            SensorEvent::StepsTaken { day, amount } => {
                self.record_steps(day, amount)?;
            }
            SensorEvent::RebootDetected => {
                self.run_maintenance()?;
            }
        }
        Ok(())
    }
}
