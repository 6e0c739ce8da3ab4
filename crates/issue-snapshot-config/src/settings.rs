// crates/issue-snapshot-config/src/settings.rs
// ============================================================================
// Module: Configuration Settings
// Description: Validated configuration structures per external collaborator.
// Purpose: One structure per source system plus the destination store.
// Dependencies: thiserror, url
// ============================================================================

//! ## Overview
//! Recognized configuration surface:
//! - Jira source: `JIRA_BASE_URL`, `JIRA_USER`, `JIRA_PASS`
//! - JSM source: `JSM_BASE_URL`, `JSM_PAT`
//! - Store: `DB_HOST`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`
//!
//! Base URLs must parse as http(s) URLs; a trailing slash is trimmed so path
//! joining stays unambiguous downstream.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use url::Url;

use crate::env::EnvSource;

// ============================================================================
// SECTION: Variable Names
// ============================================================================

/// Jira base URL variable.
pub const JIRA_BASE_URL: &str = "JIRA_BASE_URL";
/// Jira basic-auth user variable.
pub const JIRA_USER: &str = "JIRA_USER";
/// Jira basic-auth password variable.
pub const JIRA_PASS: &str = "JIRA_PASS";
/// JSM base URL variable.
pub const JSM_BASE_URL: &str = "JSM_BASE_URL";
/// JSM personal access token variable.
pub const JSM_PAT: &str = "JSM_PAT";
/// Store host variable.
pub const DB_HOST: &str = "DB_HOST";
/// Store user variable.
pub const DB_USER: &str = "DB_USER";
/// Store password variable.
pub const DB_PASSWORD: &str = "DB_PASSWORD";
/// Store database name variable.
pub const DB_NAME: &str = "DB_NAME";

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Connection settings for the Jira source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraConfig {
    /// Base URL of the Jira server, without trailing slash.
    pub base_url: String,
    /// Basic-auth user.
    pub user: String,
    /// Basic-auth password.
    pub password: String,
}

impl JiraConfig {
    /// Loads and validates the Jira settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is missing, blank, or the base
    /// URL does not parse as an http(s) URL.
    pub fn load(source: &EnvSource) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: require_base_url(source, JIRA_BASE_URL)?,
            user: source.require(JIRA_USER)?,
            password: source.require(JIRA_PASS)?,
        })
    }
}

/// Connection settings for the JSM source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsmConfig {
    /// Base URL of the JSM server, without trailing slash.
    pub base_url: String,
    /// Bearer token.
    pub token: String,
}

impl JsmConfig {
    /// Loads and validates the JSM settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is missing, blank, or the base
    /// URL does not parse as an http(s) URL.
    pub fn load(source: &EnvSource) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: require_base_url(source, JSM_BASE_URL)?,
            token: source.require(JSM_PAT)?,
        })
    }
}

/// Connection settings for the destination store.
///
/// # Invariants
/// - All four variables are required even when the active store engine does
///   not consume every one; the recognized surface stays stable across
///   engines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Store host, used for startup diagnostics.
    pub host: String,
    /// Store user, used for startup diagnostics.
    pub user: String,
    /// Store password.
    pub password: String,
    /// Database name; the embedded engine interprets this as the database
    /// path.
    pub database: String,
}

impl StoreConfig {
    /// Loads and validates the store settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any variable is missing or blank.
    pub fn load(source: &EnvSource) -> Result<Self, ConfigError> {
        Ok(Self {
            host: source.require(DB_HOST)?,
            user: source.require(DB_USER)?,
            password: source.require(DB_PASSWORD)?,
            database: source.require(DB_NAME)?,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Requires a variable and validates it as an http(s) base URL.
fn require_base_url(source: &EnvSource, variable: &'static str) -> Result<String, ConfigError> {
    let raw = source.require(variable)?;
    let parsed = Url::parse(&raw).map_err(|err| ConfigError::InvalidBaseUrl {
        variable,
        message: err.to_string(),
    })?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ConfigError::InvalidBaseUrl {
            variable,
            message: format!("unsupported scheme {}", parsed.scheme()),
        });
    }
    Ok(raw.trim_end_matches('/').to_string())
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading failures.
///
/// # Invariants
/// - Messages name the offending variable and never echo secret values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset.
    #[error("required configuration variable {variable} is not set")]
    Missing {
        /// Variable name.
        variable: &'static str,
    },
    /// A required variable is set but blank.
    #[error("required configuration variable {variable} is empty")]
    Empty {
        /// Variable name.
        variable: &'static str,
    },
    /// A base URL variable does not parse as an http(s) URL.
    #[error("configuration variable {variable} is not a valid base url: {message}")]
    InvalidBaseUrl {
        /// Variable name.
        variable: &'static str,
        /// Parse failure detail.
        message: String,
    },
}
