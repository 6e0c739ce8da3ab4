// crates/issue-snapshot-client/src/lib.rs
// ============================================================================
// Module: Issue Snapshot Client
// Description: Blocking search client for the ticketing REST APIs.
// Purpose: Paginate the search endpoint and hand raw issues to the mapper.
// Dependencies: issue-snapshot-core, log, reqwest, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! One client covers both source systems: the endpoint shape is identical
//! (`GET /rest/api/2/search` with `jql`, `startAt`, `maxResults`, `fields`)
//! and only the authentication scheme differs. Fetching is sequential and
//! blocking; a non-success status aborts the whole fetch with no partial
//! result.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod search;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use search::FetchError;
pub use search::SearchAuth;
pub use search::SearchClient;
pub use search::SearchConfig;
pub use search::SearchPage;
