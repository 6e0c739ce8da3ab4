// crates/issue-snapshot-store-sqlite/src/lib.rs
// ============================================================================
// Module: Issue Snapshot SQLite Store
// Description: Snapshot loader backed by SQLite.
// Purpose: Atomically replace destination table contents per refresh run.
// Dependencies: issue-snapshot-core, log, rusqlite, thiserror, time
// ============================================================================

//! ## Overview
//! The store crate owns the two write-side contracts of the refresh job:
//! bounded connect retry (to tolerate a data store brought up alongside the
//! job) and the all-or-nothing snapshot replace: delete all rows, insert all
//! rows, commit, or roll everything back. Statement text is generated from the
//! same field specification the mapper consumed, so column order cannot
//! drift from cell order.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use store::SqliteSnapshotStore;
pub use store::SqliteStoreConfig;
pub use store::StoreError;
