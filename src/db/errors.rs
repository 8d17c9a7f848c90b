//! Store errors

use thiserror::Error;

/// Result type for store operations
pub type DbResult<T> = Result<T, DbError>;

/// Errors raised while opening or talking to the pizza store
#[derive(Debug, Error)]
pub enum DbError {
    /// Driver-level failure (unreachable file, constraint violation, ...)
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection string could not be understood
    #[error("invalid connection string: {0}")]
    InvalidConnectionString(String),

    /// Database was written by a newer build
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}
