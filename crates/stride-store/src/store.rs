//! Main ledger implementation.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info, warn};

use stride_types::{CORRUPT_DELTA, DayKey, DayRecord};

use crate::error::{Error, Result};
use crate::models::LedgerTotals;
use crate::queries::DayQuery;
use crate::schema;

/// SQLite-based ledger of per-day step records.
///
/// The ledger owns a single connection and assumes a single logical writer;
/// callers serialize access. All "expected" outcomes (day missing, insert
/// refused) are return values, never errors — only storage failures surface
/// as [`Error`].
pub struct Ledger {
    conn: Connection,
}

impl Ledger {
    /// Open or create a database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| Error::CreateDirectory {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        info!("Opening step ledger at {}", path.display());
        let conn = Connection::open(path)?;

        // WAL mode for better durability/performance on frequent small writes
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        schema::initialize(&conn)?;

        Ok(Self { conn })
    }

    /// Open the default database location.
    pub fn open_default() -> Result<Self> {
        Self::open(crate::default_db_path())
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }
}

// Single-day operations
impl Ledger {
    /// Insert a fresh day record seeded with its negative offset.
    ///
    /// `initial_delta` is the negated hardware counter value at the moment
    /// the day started, so it must be `<= 0`. Returns `true` if a row was
    /// inserted; `false` if the day already exists (use [`Ledger::add_steps`]
    /// then) or the delta is positive (the raw value it was derived from was
    /// negative).
    pub fn create_day(&self, day: DayKey, initial_delta: i32) -> Result<bool> {
        if initial_delta > 0 {
            warn!(
                "Refusing to create day {} with positive initial delta {}",
                day, initial_delta
            );
            return Ok(false);
        }

        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO days (day, delta) VALUES (?1, ?2)",
            params![day.as_millis(), initial_delta],
        )?;

        debug!("create_day {} delta={} inserted={}", day, initial_delta, inserted == 1);
        Ok(inserted == 1)
    }

    /// Insert a day with a finalized absolute step count.
    ///
    /// Used only by backup restoration. Never overwrites: if the day already
    /// has a record, or `steps` is negative, nothing is written and `false`
    /// is returned.
    pub fn restore_day(&self, day: DayKey, steps: i32) -> Result<bool> {
        if steps < 0 {
            warn!("Refusing to restore day {} with negative steps {}", day, steps);
            return Ok(false);
        }

        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO days (day, delta) VALUES (?1, ?2)",
            params![day.as_millis(), steps],
        )?;

        Ok(inserted == 1)
    }

    /// Add `amount` steps to an existing day's delta.
    ///
    /// A silent no-op when the day has no record: the offset semantics
    /// require [`Ledger::create_day`] to have run first, so this never
    /// creates a row implicitly. Returns whether a row was updated.
    pub fn add_steps(&self, day: DayKey, amount: i32) -> Result<bool> {
        let updated = self.conn.execute(
            "UPDATE days SET delta = delta + ?2 WHERE day = ?1",
            params![day.as_millis(), amount],
        )?;

        debug!("add_steps {} amount={} updated={}", day, amount, updated == 1);
        Ok(updated == 1)
    }

    /// The stored delta for a day, or `None` if the day has no record.
    ///
    /// `None` is the designed sentinel, distinct from a legitimate zero or
    /// negative delta.
    pub fn steps(&self, day: DayKey) -> Result<Option<i32>> {
        let delta = self
            .conn
            .query_row(
                "SELECT delta FROM days WHERE day = ?1",
                [day.as_millis()],
                |row| row.get(0),
            )
            .optional()?;

        Ok(delta)
    }
}

// Aggregate queries
//
// Corrupt rows (delta >= CORRUPT_DELTA) are excluded from every aggregate
// immediately, whether or not the maintenance purge has run yet.
impl Ledger {
    /// Sum of all settled days strictly before `today`.
    ///
    /// Days whose offset was never overcome (`delta <= 0`) contributed no
    /// confirmed steps and are excluded.
    pub fn total_excluding(&self, today: DayKey) -> Result<i64> {
        let total = self.conn.query_row(
            "SELECT COALESCE(SUM(delta), 0) FROM days
             WHERE day < ?1 AND delta > 0 AND delta < ?2",
            params![today.as_millis(), CORRUPT_DELTA],
            |row| row.get(0),
        )?;

        Ok(total)
    }

    /// The maximum delta across all days, today included.
    ///
    /// This is a live personal-best value: today's delta may still be
    /// negative or growing. Returns 0 on an empty ledger.
    pub fn record_delta(&self) -> Result<i32> {
        let record = self.conn.query_row(
            "SELECT COALESCE(MAX(delta), 0) FROM days WHERE delta < ?1",
            [CORRUPT_DELTA],
            |row| row.get(0),
        )?;

        Ok(record)
    }

    /// Number of days with a positive delta, floored at 1.
    ///
    /// The floor makes the return value always safe to divide by in
    /// average-per-day computations; it is deliberate, not a bug.
    pub fn valid_day_count(&self) -> Result<u32> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM days WHERE delta > 0 AND delta < ?1",
            [CORRUPT_DELTA],
            |row| row.get(0),
        )?;

        Ok(if count < 1 { 1 } else { count as u32 })
    }

    /// All three aggregates in one snapshot.
    pub fn totals(&self, today: DayKey) -> Result<LedgerTotals> {
        Ok(LedgerTotals {
            total: self.total_excluding(today)?,
            record: self.record_delta()?,
            valid_days: self.valid_day_count()?,
        })
    }

    /// Total number of rows, settled or not.
    pub fn count_days(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM days", [], |row| row.get(0))?;

        Ok(count as u64)
    }

    /// List day records matching a query.
    pub fn query_days(&self, query: &DayQuery) -> Result<Vec<DayRecord>> {
        let mut conditions = Vec::new();
        let mut params: Vec<i64> = Vec::new();

        if let Some(since) = query.since {
            conditions.push("day >= ?");
            params.push(since.as_millis());
        }

        if let Some(until) = query.until {
            conditions.push("day <= ?");
            params.push(until.as_millis());
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let order = if query.newest_first { "DESC" } else { "ASC" };

        let mut sql = format!(
            "SELECT day, delta FROM days {} ORDER BY day {}",
            where_clause, order
        );

        if let Some(limit) = query.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        let params_ref: Vec<&dyn rusqlite::ToSql> =
            params.iter().map(|p| p as &dyn rusqlite::ToSql).collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map(params_ref.as_slice(), |row| {
                Ok(DayRecord {
                    day: DayKey::from_millis(row.get(0)?),
                    delta: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }
}

// Maintenance
impl Ledger {
    /// Delete all records with a negative delta.
    ///
    /// Only safe to invoke immediately after a reboot, before any reading
    /// for the new day has been processed - otherwise it would delete the
    /// still-accumulating current day's offset. Returns the number of rows
    /// removed.
    pub fn purge_negative(&self) -> Result<usize> {
        let removed = self.conn.execute("DELETE FROM days WHERE delta < 0", [])?;

        if removed > 0 {
            info!("Purged {} negative day records", removed);
        }
        Ok(removed)
    }

    /// Delete all records at or beyond the corruption threshold.
    pub fn purge_corrupt(&self) -> Result<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM days WHERE delta >= ?1", [CORRUPT_DELTA])?;

        if removed > 0 {
            info!("Purged {} corrupt day records", removed);
        }
        Ok(removed)
    }
}
