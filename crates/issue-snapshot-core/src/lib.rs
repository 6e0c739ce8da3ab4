// crates/issue-snapshot-core/src/lib.rs
// ============================================================================
// Module: Issue Snapshot Core
// Description: Field model, extractors, field catalogs, and the issue mapper.
// Purpose: Turn raw ticketing search records into fixed-arity snapshot rows.
// Dependencies: serde, serde_json, thiserror, time
// ============================================================================

//! ## Overview
//! This crate holds the pure heart of the refresh job: a typed view over the
//! sparse JSON field map of one ticketing issue, a closed set of total
//! extractors, and the ordered field catalogs that bind destination columns
//! to source keys. Everything here is deterministic and free of I/O; the
//! client and store crates supply the network and database edges.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;
pub mod extract;
pub mod mapper;
pub mod model;
pub mod spec;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use catalog::JIRA_JQL;
pub use catalog::JSM_JQL;
pub use catalog::jira_field_spec;
pub use catalog::jsm_field_spec;
pub use extract::ExtractorKind;
pub use mapper::map_issue;
pub use mapper::map_snapshot;
pub use model::CellValue;
pub use model::FieldValue;
pub use model::MappedRow;
pub use model::RawIssue;
pub use model::Scalar;
pub use spec::FieldMapping;
pub use spec::FieldSpec;
pub use spec::MapError;
pub use spec::SpecError;
