//! Platform-agnostic types for the stride step ledger.
//!
//! This crate defines the vocabulary shared by the ledger store and the
//! accumulator: calendar-day keys, the persisted day record, and the
//! constants that govern corruption detection.
//!
//! # Day keys
//!
//! Every persisted value is keyed by a [`DayKey`]: the millisecond timestamp
//! of local midnight at the start of a calendar day. Callers are responsible
//! for truncating timestamps to the day boundary before handing them to the
//! ledger; [`DayKey::containing`] performs that truncation.
//!
//! ```
//! use stride_types::{DayKey, DAY_MS};
//!
//! let day = DayKey::from_millis(1_755_043_200_000);
//! assert_eq!(day.next().as_millis() - day.as_millis(), DAY_MS);
//! assert_eq!(day.previous().next(), day);
//! ```

mod types;

pub use types::{CORRUPT_DELTA, DAY_MS, DayKey, DayRecord};
