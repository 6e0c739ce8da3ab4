// crates/issue-snapshot-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Snapshot Store
// Description: Bounded connect retry and transactional snapshot replacement.
// Purpose: Guarantee readers never observe a partially replaced snapshot.
// Dependencies: issue-snapshot-core, log, rusqlite, thiserror, time
// ============================================================================

//! ## Overview
//! A refresh run writes its whole snapshot inside one transaction: delete
//! every existing row, insert every mapped row, commit. Any failure rolls
//! the transaction back and the destination table keeps its pre-run
//! contents. Connection acquisition retries a bounded number of times with a
//! fixed delay; this exists only for startup-ordering races, logical
//! failures are never retried.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use issue_snapshot_core::CellValue;
use issue_snapshot_core::FieldSpec;
use issue_snapshot_core::MapError;
use issue_snapshot_core::MappedRow;
use issue_snapshot_core::SpecError;
use rusqlite::Connection;
use rusqlite::ToSql;
use rusqlite::params_from_iter;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::Value;
use thiserror::Error;
use time::PrimitiveDateTime;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Default bounded connect attempts.
const DEFAULT_CONNECT_ATTEMPTS: u32 = 10;
/// Default fixed delay between connect attempts (ms).
const DEFAULT_CONNECT_RETRY_DELAY_MS: u64 = 3_000;

// ============================================================================
// SECTION: Config
// ============================================================================

/// Configuration for the `SQLite` snapshot store.
///
/// # Invariants
/// - `path` must resolve to a file path (not a directory).
/// - `connect_attempts` is at least 1.
/// - `connect_retry_delay_ms` is the fixed spacing between attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    pub busy_timeout_ms: u64,
    /// Bounded number of connect attempts.
    pub connect_attempts: u32,
    /// Fixed delay between connect attempts in milliseconds.
    pub connect_retry_delay_ms: u64,
}

impl SqliteStoreConfig {
    /// Builds a configuration with default timeouts and retry bounds.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            connect_attempts: DEFAULT_CONNECT_ATTEMPTS,
            connect_retry_delay_ms: DEFAULT_CONNECT_RETRY_DELAY_MS,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Snapshot store failures. All variants are fatal to the run.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store never accepted a connection within the retry bound.
    #[error("store {database} never became ready after {attempts} connect attempts")]
    NeverReady {
        /// Database path.
        database: String,
        /// Attempts made before giving up.
        attempts: u32,
    },
    /// The field specification is internally inconsistent.
    #[error(transparent)]
    Spec(#[from] SpecError),
    /// A row's arity disagrees with the destination column count.
    #[error(transparent)]
    Arity(#[from] MapError),
    /// `SQLite` engine error; the surrounding transaction is rolled back.
    #[error("snapshot store db error: {0}")]
    Db(String),
}

/// Maps an engine error into the store error space.
fn db_error(err: &rusqlite::Error) -> StoreError {
    StoreError::Db(err.to_string())
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// `SQLite`-backed snapshot store.
///
/// # Invariants
/// - Every replace is a single transaction; partial snapshots are never
///   committed.
#[derive(Debug)]
pub struct SqliteSnapshotStore {
    /// Open database connection.
    connection: Connection,
}

impl SqliteSnapshotStore {
    /// Connects with bounded retry and fixed delay.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NeverReady`] once every attempt has failed with
    /// a connection-level error.
    pub fn connect(config: &SqliteStoreConfig) -> Result<Self, StoreError> {
        let attempts = config.connect_attempts.max(1);
        for attempt in 1 ..= attempts {
            match open_connection(&config.path, config.busy_timeout_ms) {
                Ok(connection) => {
                    log::info!(
                        "connected to snapshot store {} on attempt {attempt}",
                        config.path.display()
                    );
                    return Ok(Self {
                        connection,
                    });
                }
                Err(err) => {
                    log::warn!(
                        "snapshot store connect attempt {attempt}/{attempts} failed: {err}"
                    );
                    if attempt < attempts {
                        thread::sleep(Duration::from_millis(config.connect_retry_delay_ms));
                    }
                }
            }
        }
        Err(StoreError::NeverReady {
            database: config.path.display().to_string(),
            attempts,
        })
    }

    /// Wraps an already-open connection; used by tests.
    #[must_use]
    pub const fn from_connection(connection: Connection) -> Self {
        Self {
            connection,
        }
    }

    /// Releases the underlying connection; used by tests for verification.
    #[must_use]
    pub fn into_connection(self) -> Connection {
        self.connection
    }

    /// Replaces the destination table's contents with the given snapshot.
    ///
    /// Every row's arity is validated against the specification before any
    /// statement executes; the delete and all inserts run inside one
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on specification drift, arity mismatch, or any
    /// engine failure. On error the table keeps its pre-run contents.
    pub fn replace_snapshot(
        &mut self,
        spec: &FieldSpec,
        rows: &[MappedRow],
    ) -> Result<usize, StoreError> {
        spec.validate()?;
        for row in rows {
            if row.len() != spec.column_count() {
                return Err(MapError::ArityMismatch {
                    table: spec.table().to_string(),
                    expected: spec.column_count(),
                    actual: row.len(),
                }
                .into());
            }
        }
        let tx = self.connection.transaction().map_err(|err| db_error(&err))?;
        tx.execute(&format!("DELETE FROM {}", spec.table()), [])
            .map_err(|err| db_error(&err))?;
        {
            let insert_sql = insert_statement(spec);
            let mut statement = tx.prepare(&insert_sql).map_err(|err| db_error(&err))?;
            for row in rows {
                statement
                    .execute(params_from_iter(row.cells().iter().map(SqlCell)))
                    .map_err(|err| db_error(&err))?;
            }
        }
        tx.commit().map_err(|err| db_error(&err))?;
        log::info!("replaced snapshot in {}: {} rows", spec.table(), rows.len());
        Ok(rows.len())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Opens a connection and applies the busy timeout.
fn open_connection(path: &Path, busy_timeout_ms: u64) -> Result<Connection, rusqlite::Error> {
    let connection = Connection::open(path)?;
    connection.busy_timeout(Duration::from_millis(busy_timeout_ms))?;
    Ok(connection)
}

/// Builds the positional insert statement from the field specification.
fn insert_statement(spec: &FieldSpec) -> String {
    let columns = spec.columns();
    let placeholders: Vec<&str> = columns.iter().map(|_| "?").collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        spec.table(),
        columns.join(", "),
        placeholders.join(",")
    )
}

/// Borrowing adapter binding one cell as a positional SQL parameter.
struct SqlCell<'row>(&'row CellValue);

impl ToSql for SqlCell<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self.0 {
            CellValue::Null => Ok(ToSqlOutput::Owned(Value::Null)),
            CellValue::Text(text) => Ok(ToSqlOutput::Owned(Value::Text(text.clone()))),
            CellValue::Integer(integer) => Ok(ToSqlOutput::Owned(Value::Integer(*integer))),
            CellValue::Float(float) => Ok(ToSqlOutput::Owned(Value::Real(*float))),
            CellValue::Timestamp(stamp) => {
                let rendered = render_timestamp(*stamp)
                    .map_err(|err| rusqlite::Error::ToSqlConversionFailure(Box::new(err)))?;
                Ok(ToSqlOutput::Owned(Value::Text(rendered)))
            }
        }
    }
}

/// Renders a naive timestamp in the destination column format.
fn render_timestamp(stamp: PrimitiveDateTime) -> Result<String, time::error::Format> {
    let format = time::macros::format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    stamp.format(format)
}
