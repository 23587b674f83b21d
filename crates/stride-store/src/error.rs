//! Error types for stride-store.

use std::path::PathBuf;

/// Result type for stride-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in stride-store.
///
/// Only true storage-layer failures surface here. A missing day is the
/// `None` arm of [`Ledger::steps`](crate::Ledger::steps), and a refused
/// insert is a `false` return; neither is an error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database error from SQLite.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Failed to create database directory.
    #[error("Failed to create database directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Malformed backup file.
    #[error("Backup file error: {0}")]
    Backup(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
