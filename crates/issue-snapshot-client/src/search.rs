// crates/issue-snapshot-client/src/search.rs
// ============================================================================
// Module: Search Paginator
// Description: Offset pagination over the ticketing search endpoint.
// Purpose: Accumulate every matching issue, aborting on any upstream error.
// Dependencies: issue-snapshot-core, log, reqwest, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The paginator issues search requests with a monotonically increasing
//! offset and a fixed page size, accumulating each page's `issues` array
//! until `startAt + maxResults` reaches the server-reported `total`. The
//! total is re-read every page; if the upstream data set changes mid-fetch,
//! records may be duplicated or skipped. REST search v2 offers no consistent
//! cursor, so this race is inherited behavior, not defended against.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use issue_snapshot_core::RawIssue;
use reqwest::blocking::Client;
use reqwest::blocking::RequestBuilder;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default page size for search requests.
pub const DEFAULT_PAGE_SIZE: u64 = 100;
/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;
/// Search endpoint path relative to the base URL.
const SEARCH_PATH: &str = "/rest/api/2/search";

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Authentication scheme for the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAuth {
    /// HTTP Basic credentials (the project-tracking source).
    Basic {
        /// Basic-auth user.
        user: String,
        /// Basic-auth password.
        password: String,
    },
    /// Bearer token (the service-management source).
    Bearer(String),
}

/// Configuration for one search client.
///
/// # Invariants
/// - `base_url` carries no trailing slash.
/// - `page_size` is at least 1; the server may cap it lower than requested.
/// - `timeout_ms` applies per request, not per fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Base URL of the source system.
    pub base_url: String,
    /// Authentication scheme.
    pub auth: SearchAuth,
    /// Page size sent as `maxResults`.
    pub page_size: u64,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl SearchConfig {
    /// Builds a configuration with default page size and timeout.
    #[must_use]
    pub const fn new(base_url: String, auth: SearchAuth) -> Self {
        Self {
            base_url,
            auth,
            page_size: DEFAULT_PAGE_SIZE,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

// ============================================================================
// SECTION: Wire Types
// ============================================================================

/// One page of the search response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    /// Total matching issues reported by the server for this page's query.
    pub total: u64,
    /// Issues on this page, in server order.
    #[serde(default)]
    pub issues: Vec<RawIssue>,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Blocking client for one source system's search endpoint.
pub struct SearchClient {
    /// Client configuration.
    config: SearchConfig,
    /// Underlying HTTP client.
    client: Client,
}

impl SearchClient {
    /// Creates a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(config: SearchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(concat!("issue-snapshot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        Ok(Self {
            config,
            client,
        })
    }

    /// Fetches every issue matching `jql`, page by page.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on any transport failure, non-success status,
    /// or undecodable body. Nothing fetched so far is returned on error.
    pub fn fetch_all(&self, jql: &str, fields: &str) -> Result<Vec<RawIssue>, FetchError> {
        let page_size = self.config.page_size.max(1);
        let mut start_at: u64 = 0;
        let mut issues: Vec<RawIssue> = Vec::new();
        loop {
            let page = self.fetch_page(jql, fields, start_at, page_size)?;
            log::debug!(
                "fetched search page at offset {start_at}: {} issues, total {}",
                page.issues.len(),
                page.total
            );
            issues.extend(page.issues);
            if start_at + page_size >= page.total {
                break;
            }
            start_at += page_size;
        }
        log::info!("search fetch complete: {} issues", issues.len());
        Ok(issues)
    }

    /// Fetches one page at the given offset.
    fn fetch_page(
        &self,
        jql: &str,
        fields: &str,
        start_at: u64,
        page_size: u64,
    ) -> Result<SearchPage, FetchError> {
        let url = format!("{}{SEARCH_PATH}", self.config.base_url);
        let request = self
            .client
            .get(&url)
            .query(&[
                ("jql", jql),
                ("startAt", &start_at.to_string()),
                ("maxResults", &page_size.to_string()),
                ("fields", fields),
            ])
            .header("Accept", "application/json");
        let response = self
            .authorize(request)
            .send()
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }
        let body = response.text().map_err(|err| FetchError::Transport(err.to_string()))?;
        serde_json::from_str(&body).map_err(|err| FetchError::Body(err.to_string()))
    }

    /// Attaches the configured authentication scheme.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.auth {
            SearchAuth::Basic {
                user,
                password,
            } => request.basic_auth(user, Some(password)),
            SearchAuth::Bearer(token) => request.bearer_auth(token),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Upstream fetch failures. All variants are fatal to the run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Request could not be sent or the response body could not be read.
    #[error("search request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("search endpoint returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },
    /// The response body did not decode as a search page.
    #[error("search response body undecodable: {0}")]
    Body(String),
}
