// crates/issue-snapshot-cli/src/lib.rs
// ============================================================================
// Module: Issue Snapshot CLI Library
// Description: Refresh pipeline shared by the binary and integration tests.
// Purpose: Wire configuration, search client, mapper, and store end to end.
// Dependencies: issue-snapshot-client, issue-snapshot-config,
//               issue-snapshot-core, issue-snapshot-store-sqlite, log, time
// ============================================================================

//! ## Overview
//! The pipeline lives in the library so integration tests can drive a full
//! refresh against fabricated configuration (an in-test HTTP fixture and a
//! temporary database) without spawning the binary. The binary itself only
//! parses arguments, initializes logging, and reports the outcome.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod pipeline;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use pipeline::RefreshError;
pub use pipeline::Source;
pub use pipeline::run_refresh;
