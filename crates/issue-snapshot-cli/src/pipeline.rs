// crates/issue-snapshot-cli/src/pipeline.rs
// ============================================================================
// Module: Refresh Pipeline
// Description: One refresh run: fetch, map, transactionally replace.
// Purpose: Sequential, blocking ETL per source system.
// Dependencies: issue-snapshot-client, issue-snapshot-config,
//               issue-snapshot-core, issue-snapshot-store-sqlite, log, time
// ============================================================================

//! ## Overview
//! A run is fully sequential: paginate the source system's search endpoint,
//! map every record through the source's field catalog under one shared
//! refresh stamp, then replace the destination table inside one transaction.
//! The whole record set and the whole mapped row set are held in memory
//! between those steps; nothing streams into the transaction.

// ============================================================================
// SECTION: Imports
// ============================================================================

use issue_snapshot_client::FetchError;
use issue_snapshot_client::SearchAuth;
use issue_snapshot_client::SearchClient;
use issue_snapshot_client::SearchConfig;
use issue_snapshot_config::ConfigError;
use issue_snapshot_config::EnvSource;
use issue_snapshot_config::JiraConfig;
use issue_snapshot_config::JsmConfig;
use issue_snapshot_config::StoreConfig;
use issue_snapshot_core::FieldSpec;
use issue_snapshot_core::JIRA_JQL;
use issue_snapshot_core::JSM_JQL;
use issue_snapshot_core::MapError;
use issue_snapshot_core::jira_field_spec;
use issue_snapshot_core::jsm_field_spec;
use issue_snapshot_core::map_snapshot;
use issue_snapshot_store_sqlite::SqliteSnapshotStore;
use issue_snapshot_store_sqlite::SqliteStoreConfig;
use issue_snapshot_store_sqlite::StoreError;
use thiserror::Error;
use time::OffsetDateTime;
use time::PrimitiveDateTime;

// ============================================================================
// SECTION: Sources
// ============================================================================

/// The two ticketing sources this job refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Project-tracking system, basic-auth, `jira_open_issues`.
    Jira,
    /// Service-management system, bearer token, `jsm_open_issues`.
    Jsm,
}

impl Source {
    /// Upper-case label used in the completion summary.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Jira => "JIRA",
            Self::Jsm => "JSM",
        }
    }

    /// Field catalog for this source.
    #[must_use]
    pub fn field_spec(self) -> FieldSpec {
        match self {
            Self::Jira => jira_field_spec(),
            Self::Jsm => jsm_field_spec(),
        }
    }

    /// Fixed search filter for this source.
    #[must_use]
    pub const fn jql(self) -> &'static str {
        match self {
            Self::Jira => JIRA_JQL,
            Self::Jsm => JSM_JQL,
        }
    }

    /// Loads this source's search configuration from the environment.
    fn search_config(self, env: &EnvSource) -> Result<SearchConfig, ConfigError> {
        match self {
            Self::Jira => {
                let config = JiraConfig::load(env)?;
                Ok(SearchConfig::new(config.base_url, SearchAuth::Basic {
                    user: config.user,
                    password: config.password,
                }))
            }
            Self::Jsm => {
                let config = JsmConfig::load(env)?;
                Ok(SearchConfig::new(config.base_url, SearchAuth::Bearer(config.token)))
            }
        }
    }
}

// ============================================================================
// SECTION: Pipeline
// ============================================================================

/// Runs one full refresh for the given source and returns the row count.
///
/// # Errors
///
/// Returns [`RefreshError`] on any fatal condition: missing configuration,
/// upstream API error, specification drift, or store failure. On error the
/// destination table keeps its pre-run contents.
pub fn run_refresh(source: Source, env: &EnvSource) -> Result<usize, RefreshError> {
    let spec = source.field_spec();
    let search_config = source.search_config(env)?;
    let store_config = StoreConfig::load(env)?;
    log::info!(
        "refreshing {} from {} into store {} (host {}, user {})",
        spec.table(),
        search_config.base_url,
        store_config.database,
        store_config.host,
        store_config.user
    );

    let client = SearchClient::new(search_config)?;
    let issues = client.fetch_all(source.jql(), &spec.api_fields())?;

    let refreshed_at = naive_now_utc();
    let rows = map_snapshot(&spec, &issues, refreshed_at)?;

    let mut store = SqliteSnapshotStore::connect(&SqliteStoreConfig::new(&store_config.database))?;
    let count = store.replace_snapshot(&spec, &rows)?;
    Ok(count)
}

/// Current UTC wall-clock time with the offset stripped; the shared refresh
/// stamp appended to every row of the run.
fn naive_now_utc() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Fatal refresh failures surfaced at the process boundary.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// Configuration is missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The upstream search API failed; nothing was loaded.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// Specification drift detected before any write.
    #[error(transparent)]
    Map(#[from] MapError),
    /// The store never became ready or the transaction failed and rolled
    /// back.
    #[error(transparent)]
    Store(#[from] StoreError),
}
