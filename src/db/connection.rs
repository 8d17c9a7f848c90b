//! Connection strings and the per-request store handle.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use rusqlite::{Connection, OpenFlags};

use super::migrations::apply_migrations;
use super::{DbError, DbResult};

/// Used when configuration names no connection string
pub const DEFAULT_CONNECTION_STRING: &str = "Data Source=Pizzas.db";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

static MEMORY_DB_SEQ: AtomicU64 = AtomicU64::new(0);

/// Where the store lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// SQLite database file
    File(PathBuf),
    /// Process-private in-memory database
    Memory,
}

/// Parsed `key=value;key=value` connection string.
///
/// Keys are case-insensitive and surrounding whitespace is ignored. Only the
/// data source is interpreted; other keys are accepted and skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionString {
    data_source: DataSource,
}

impl ConnectionString {
    pub fn data_source(&self) -> &DataSource {
        &self.data_source
    }
}

impl Default for ConnectionString {
    fn default() -> Self {
        Self {
            data_source: DataSource::File(PathBuf::from("Pizzas.db")),
        }
    }
}

impl FromStr for ConnectionString {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut data_source = None;

        for part in s.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = part.split_once('=').ok_or_else(|| {
                DbError::InvalidConnectionString(format!("expected key=value, got '{part}'"))
            })?;

            let key = key.trim().to_ascii_lowercase();
            let value = value.trim();

            if matches!(key.as_str(), "data source" | "datasource" | "filename") {
                if value.is_empty() {
                    return Err(DbError::InvalidConnectionString(
                        "data source is empty".to_string(),
                    ));
                }
                data_source = Some(if value.eq_ignore_ascii_case(":memory:") {
                    DataSource::Memory
                } else {
                    DataSource::File(PathBuf::from(value))
                });
            }
        }

        data_source
            .map(|data_source| Self { data_source })
            .ok_or_else(|| DbError::InvalidConnectionString(format!("no data source in '{s}'")))
    }
}

#[derive(Debug)]
enum Target {
    File(PathBuf),
    SharedMemory(String),
}

/// Handle to the pizza store.
///
/// Holds no open connection for file stores: every [`PizzaDb::open`] call
/// hands out a fresh connection that is closed when dropped. In-memory
/// stores keep one anchor connection alive for the lifetime of the handle so
/// the data outlives individual requests.
#[derive(Debug)]
pub struct PizzaDb {
    target: Target,
    _anchor: Option<Mutex<Connection>>,
}

impl PizzaDb {
    /// Open the store described by `connection` and bring its schema up to date
    pub fn connect(connection: &ConnectionString) -> DbResult<Self> {
        let started_at = Instant::now();

        let target = match connection.data_source() {
            DataSource::File(path) => Target::File(path.clone()),
            DataSource::Memory => {
                let seq = MEMORY_DB_SEQ.fetch_add(1, Ordering::Relaxed);
                Target::SharedMemory(format!(
                    "file:pizzastore-{}-{}?mode=memory&cache=shared",
                    std::process::id(),
                    seq
                ))
            }
        };

        let mut conn = open_target(&target)?;
        if let Err(err) = apply_migrations(&mut conn) {
            tracing::error!(
                error = %err,
                duration_ms = started_at.elapsed().as_millis() as u64,
                "event=db_connect status=error"
            );
            return Err(err);
        }

        let anchor = match target {
            Target::SharedMemory(_) => Some(Mutex::new(conn)),
            Target::File(_) => None,
        };

        tracing::info!(
            target_db = ?target,
            duration_ms = started_at.elapsed().as_millis() as u64,
            "event=db_connect status=ok"
        );

        Ok(Self {
            target,
            _anchor: anchor,
        })
    }

    /// Fresh store with its own in-memory database
    pub fn in_memory() -> DbResult<Self> {
        Self::connect(&ConnectionString {
            data_source: DataSource::Memory,
        })
    }

    /// Acquire a connection scoped to the caller
    pub fn open(&self) -> DbResult<Connection> {
        let conn = open_target(&self.target)?;
        tracing::trace!("event=db_open status=ok");
        Ok(conn)
    }
}

fn open_target(target: &Target) -> DbResult<Connection> {
    let conn = match target {
        Target::File(path) => Connection::open(path)?,
        Target::SharedMemory(uri) => Connection::open_with_flags(
            uri,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?,
    };
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_connection_string() {
        let parsed: ConnectionString = DEFAULT_CONNECTION_STRING.parse().unwrap();
        assert_eq!(parsed, ConnectionString::default());
        assert_eq!(
            parsed.data_source(),
            &DataSource::File(PathBuf::from("Pizzas.db"))
        );
    }

    #[test]
    fn test_parse_is_case_insensitive_and_skips_unknown_keys() {
        let conn: ConnectionString = " cache=shared; DATA SOURCE = /tmp/p.db ;".parse().unwrap();
        assert_eq!(
            conn.data_source(),
            &DataSource::File(PathBuf::from("/tmp/p.db"))
        );

        let conn: ConnectionString = "Filename=other.db".parse().unwrap();
        assert_eq!(
            conn.data_source(),
            &DataSource::File(PathBuf::from("other.db"))
        );
    }

    #[test]
    fn test_parse_memory() {
        let conn: ConnectionString = "Data Source=:memory:".parse().unwrap();
        assert_eq!(conn.data_source(), &DataSource::Memory);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("Pizzas.db".parse::<ConnectionString>().is_err());
        assert!("Mode=ReadOnly".parse::<ConnectionString>().is_err());
        assert!("Data Source=".parse::<ConnectionString>().is_err());
    }

    #[test]
    fn test_in_memory_data_survives_connection_drop() {
        let db = PizzaDb::in_memory().unwrap();
        {
            let conn = db.open().unwrap();
            conn.execute("INSERT INTO Pizzas (Name) VALUES ('kept')", [])
                .unwrap();
        }

        let conn = db.open().unwrap();
        let name: String = conn
            .query_row("SELECT Name FROM Pizzas", [], |row| row.get(0))
            .unwrap();
        assert_eq!(name, "kept");
    }

    #[test]
    fn test_in_memory_stores_are_isolated() {
        let a = PizzaDb::in_memory().unwrap();
        let b = PizzaDb::in_memory().unwrap();
        a.open()
            .unwrap()
            .execute("INSERT INTO Pizzas (Name) VALUES ('only in a')", [])
            .unwrap();

        let count: i64 = b
            .open()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM Pizzas", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
