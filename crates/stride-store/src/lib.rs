//! SQLite-backed daily step ledger for stride.
//!
//! This crate owns all persistence for per-day step records: one row per
//! calendar day, keyed by the millisecond timestamp of local midnight. On
//! top of the row store it provides the aggregate queries the rest of the
//! system consumes (lifetime total, record day, valid-day count) and the
//! maintenance purges that remove stale offsets and corrupt rows.
//!
//! The accumulation algorithm that decides *when* to create a day and how
//! to credit the previous one lives in `stride-core`; this crate only
//! supplies the storage primitives it builds on.
//!
//! # Example
//!
//! ```no_run
//! use stride_store::{DayQuery, Ledger};
//! use stride_types::DayKey;
//!
//! let ledger = Ledger::open_default()?;
//! let today = DayKey::today();
//!
//! // Last week of history, newest first
//! let week_ago = DayKey::from_millis(today.as_millis() - 6 * stride_types::DAY_MS);
//! let days = ledger.query_days(&DayQuery::new().since(week_ago).until(today))?;
//! # Ok::<(), stride_store::Error>(())
//! ```

mod error;
mod export;
mod models;
mod queries;
mod schema;
mod store;

pub use error::{Error, Result};
pub use export::read_backup;
pub use models::{BackupEntry, LedgerTotals};
pub use queries::DayQuery;
pub use store::Ledger;

/// Default database path following platform conventions.
///
/// - Linux: `~/.local/share/stride/steps.db`
/// - macOS: `~/Library/Application Support/stride/steps.db`
/// - Windows: `C:\Users\<user>\AppData\Local\stride\steps.db`
pub fn default_db_path() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("stride")
        .join("steps.db")
}
