// crates/issue-snapshot-store-sqlite/tests/store_replace.rs
// ============================================================================
// Module: Snapshot Store Tests
// Description: Transactional replacement, rollback, and connect retry.
// Purpose: Prove a failed run never disturbs the previous snapshot.
// ============================================================================

//! ## Overview
//! Integration tests for the snapshot store:
//! - Replace empties the table before inserting and is repeatable
//! - A mid-batch engine failure rolls the whole run back
//! - Arity drift is rejected before any statement executes
//! - Connect retry is bounded and reports the exhausted attempt count
//! - Cells land as text, integers, reals, nulls, and rendered timestamps

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use issue_snapshot_core::CellValue;
use issue_snapshot_core::ExtractorKind;
use issue_snapshot_core::FieldMapping;
use issue_snapshot_core::FieldSpec;
use issue_snapshot_core::MappedRow;
use issue_snapshot_store_sqlite::SqliteSnapshotStore;
use issue_snapshot_store_sqlite::SqliteStoreConfig;
use issue_snapshot_store_sqlite::StoreError;
use rusqlite::Connection;
use tempfile::TempDir;
use time::macros::datetime;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// Four-column specification used by most tests.
fn spec() -> FieldSpec {
    FieldSpec::new("open_issues", "issuekey", "last_refreshed_at", 4, vec![
        FieldMapping {
            column: "summary",
            source_key: "summary",
            kind: ExtractorKind::Raw,
        },
        FieldMapping {
            column: "created",
            source_key: "created",
            kind: ExtractorKind::Timestamp,
        },
    ])
}

/// Creates the destination table with the key as primary key.
fn create_table(connection: &Connection) {
    connection
        .execute(
            "CREATE TABLE open_issues (\
             issuekey TEXT PRIMARY KEY, summary TEXT, created TEXT, last_refreshed_at TEXT)",
            [],
        )
        .unwrap();
}

/// Row with the given key, a summary, and two timestamps.
fn row(key: &str) -> MappedRow {
    MappedRow::new(vec![
        CellValue::Text(key.to_string()),
        CellValue::Text(format!("summary for {key}")),
        CellValue::Timestamp(datetime!(2024-03-05 14:30:00)),
        CellValue::Timestamp(datetime!(2024-06-01 08:00:00)),
    ])
}

/// Reads every key in insertion order.
fn keys(connection: &Connection) -> Vec<String> {
    let mut statement =
        connection.prepare("SELECT issuekey FROM open_issues ORDER BY rowid").unwrap();
    let rows = statement.query_map([], |sql_row| sql_row.get::<_, String>(0)).unwrap();
    rows.map(Result::unwrap).collect()
}

// ============================================================================
// SECTION: Replacement
// ============================================================================

#[test]
fn replace_swaps_the_whole_snapshot() {
    let connection = Connection::open_in_memory().unwrap();
    create_table(&connection);
    let mut store = SqliteSnapshotStore::from_connection(connection);

    let first = store.replace_snapshot(&spec(), &[row("NOC-1"), row("NOC-2")]).unwrap();
    assert_eq!(first, 2);

    let second =
        store.replace_snapshot(&spec(), &[row("NOC-3"), row("NOC-4"), row("NOC-5")]).unwrap();
    assert_eq!(second, 3);

    let connection = store.into_connection();
    assert_eq!(keys(&connection), vec!["NOC-3", "NOC-4", "NOC-5"]);
}

#[test]
fn replace_with_no_rows_empties_the_table() {
    let connection = Connection::open_in_memory().unwrap();
    create_table(&connection);
    let mut store = SqliteSnapshotStore::from_connection(connection);

    store.replace_snapshot(&spec(), &[row("NOC-1")]).unwrap();
    let count = store.replace_snapshot(&spec(), &[]).unwrap();
    assert_eq!(count, 0);

    let connection = store.into_connection();
    assert!(keys(&connection).is_empty());
}

#[test]
fn cells_land_with_their_storage_classes() {
    let connection = Connection::open_in_memory().unwrap();
    connection
        .execute(
            "CREATE TABLE open_issues (\
             issuekey TEXT, votes INTEGER, score REAL, summary TEXT, last_refreshed_at TEXT)",
            [],
        )
        .unwrap();
    let wide = FieldSpec::new("open_issues", "issuekey", "last_refreshed_at", 5, vec![
        FieldMapping {
            column: "votes",
            source_key: "votes",
            kind: ExtractorKind::Raw,
        },
        FieldMapping {
            column: "score",
            source_key: "score",
            kind: ExtractorKind::Raw,
        },
        FieldMapping {
            column: "summary",
            source_key: "summary",
            kind: ExtractorKind::Raw,
        },
    ]);
    let mut store = SqliteSnapshotStore::from_connection(connection);
    store
        .replace_snapshot(&wide, &[MappedRow::new(vec![
            CellValue::Text("NOC-1".to_string()),
            CellValue::Integer(7),
            CellValue::Float(1.5),
            CellValue::Null,
            CellValue::Timestamp(datetime!(2024-06-01 08:00:00)),
        ])])
        .unwrap();

    let connection = store.into_connection();
    let (votes, score, summary, refreshed): (i64, f64, Option<String>, String) = connection
        .query_row(
            "SELECT votes, score, summary, last_refreshed_at FROM open_issues",
            [],
            |sql_row| {
                Ok((sql_row.get(0)?, sql_row.get(1)?, sql_row.get(2)?, sql_row.get(3)?))
            },
        )
        .unwrap();
    assert_eq!(votes, 7);
    assert!((score - 1.5).abs() < f64::EPSILON);
    assert_eq!(summary, None);
    assert_eq!(refreshed, "2024-06-01 08:00:00");
}

// ============================================================================
// SECTION: Rollback
// ============================================================================

#[test]
fn mid_batch_failure_keeps_previous_contents() {
    let connection = Connection::open_in_memory().unwrap();
    create_table(&connection);
    let mut store = SqliteSnapshotStore::from_connection(connection);

    store.replace_snapshot(&spec(), &[row("NOC-1"), row("NOC-2")]).unwrap();

    // Duplicate primary key in the middle of the batch forces an engine error.
    let mut batch: Vec<MappedRow> = (10 .. 20).map(|index| row(&format!("NOC-{index}"))).collect();
    batch[4] = row("NOC-10");
    let err = store.replace_snapshot(&spec(), &batch).unwrap_err();
    assert!(matches!(err, StoreError::Db(_)), "{err:?}");

    let connection = store.into_connection();
    assert_eq!(keys(&connection), vec!["NOC-1", "NOC-2"]);
}

#[test]
fn arity_drift_is_rejected_before_any_statement() {
    let connection = Connection::open_in_memory().unwrap();
    create_table(&connection);
    let mut store = SqliteSnapshotStore::from_connection(connection);

    store.replace_snapshot(&spec(), &[row("NOC-1")]).unwrap();

    let short = MappedRow::new(vec![
        CellValue::Text("NOC-2".to_string()),
        CellValue::Text("missing cells".to_string()),
    ]);
    let err = store.replace_snapshot(&spec(), &[row("NOC-3"), short]).unwrap_err();
    assert!(matches!(err, StoreError::Arity(_)), "{err:?}");

    let connection = store.into_connection();
    assert_eq!(keys(&connection), vec!["NOC-1"]);
}

#[test]
fn inconsistent_specification_is_rejected() {
    let connection = Connection::open_in_memory().unwrap();
    create_table(&connection);
    let mut store = SqliteSnapshotStore::from_connection(connection);

    let drifted = FieldSpec::new("open_issues", "issuekey", "last_refreshed_at", 9, vec![
        FieldMapping {
            column: "summary",
            source_key: "summary",
            kind: ExtractorKind::Raw,
        },
    ]);
    let err = store.replace_snapshot(&drifted, &[]).unwrap_err();
    assert!(matches!(err, StoreError::Spec(_)), "{err:?}");
}

// ============================================================================
// SECTION: Connect Retry
// ============================================================================

#[test]
fn connect_opens_an_existing_database() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snapshot.db");
    create_table(&Connection::open(&path).unwrap());

    let mut store = SqliteSnapshotStore::connect(&SqliteStoreConfig::new(&path)).unwrap();
    store.replace_snapshot(&spec(), &[row("NOC-1")]).unwrap();
    drop(store);

    let connection = Connection::open(&path).unwrap();
    assert_eq!(keys(&connection), vec!["NOC-1"]);
}

#[test]
fn connect_retry_is_bounded() {
    let dir = TempDir::new().unwrap();
    let mut config = SqliteStoreConfig::new(dir.path().join("missing").join("snapshot.db"));
    config.connect_attempts = 2;
    config.connect_retry_delay_ms = 1;

    let err = SqliteSnapshotStore::connect(&config).unwrap_err();
    match err {
        StoreError::NeverReady {
            attempts,
            ..
        } => assert_eq!(attempts, 2),
        other => panic!("unexpected error: {other:?}"),
    }
}
