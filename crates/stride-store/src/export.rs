//! CSV backup format for day records.
//!
//! The backup file is a two-column CSV (`day,steps`): the day key in
//! milliseconds and the finalized absolute step count. Export emits only
//! settled days, so a backup never carries a live negative offset or a
//! corrupt value; restoring it through
//! [`Ledger::restore_day`](crate::Ledger::restore_day) is therefore always
//! a plain insert of non-negative counts.

use std::io::{Read, Write};

use tracing::info;

use crate::error::Result;
use crate::models::BackupEntry;
use crate::queries::DayQuery;
use crate::store::Ledger;

impl Ledger {
    /// Write all settled days to `writer` as CSV, oldest first.
    ///
    /// Returns the number of entries written.
    pub fn export_backup<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let mut written = 0;

        for record in self.query_days(&DayQuery::new().oldest_first())? {
            if !record.is_settled() {
                continue;
            }
            csv_writer.serialize(BackupEntry {
                day: record.day,
                steps: record.delta,
            })?;
            written += 1;
        }

        csv_writer.flush()?;
        info!("Exported {} day records to backup", written);
        Ok(written)
    }
}

/// Read a backup CSV into `(day, steps)` entries.
///
/// Rows are returned in file order; restoration is order-independent, so
/// callers need not sort them.
pub fn read_backup<R: Read>(reader: R) -> Result<Vec<BackupEntry>> {
    let mut entries = Vec::new();
    for row in csv::Reader::from_reader(reader).deserialize() {
        entries.push(row?);
    }
    Ok(entries)
}
