// crates/issue-snapshot-config/tests/load_validation.rs
// ============================================================================
// Module: Configuration Load Validation Tests
// Description: Presence and URL validation over injected lookups.
// Purpose: Prove the recognized surface is enforced without touching the
//          process environment.
// ============================================================================

//! ## Overview
//! Validation tests for configuration loading:
//! - Complete surfaces load and normalize trailing slashes
//! - Missing and blank variables are rejected by name
//! - Base URLs must parse as http(s)

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

use std::collections::BTreeMap;

use issue_snapshot_config::ConfigError;
use issue_snapshot_config::EnvSource;
use issue_snapshot_config::JiraConfig;
use issue_snapshot_config::JsmConfig;
use issue_snapshot_config::StoreConfig;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds an override source from string pairs.
fn source(pairs: &[(&str, &str)]) -> EnvSource {
    let map: BTreeMap<String, String> =
        pairs.iter().map(|(key, value)| ((*key).to_string(), (*value).to_string())).collect();
    EnvSource::from_overrides(map)
}

/// Complete Jira surface.
fn jira_pairs() -> Vec<(&'static str, &'static str)> {
    vec![
        ("JIRA_BASE_URL", "https://jira.example.net/"),
        ("JIRA_USER", "svc-refresh"),
        ("JIRA_PASS", "secret"),
    ]
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn jira_surface_loads_and_trims_trailing_slash() {
    let config = JiraConfig::load(&source(&jira_pairs())).unwrap();
    assert_eq!(config.base_url, "https://jira.example.net");
    assert_eq!(config.user, "svc-refresh");
    assert_eq!(config.password, "secret");
}

#[test]
fn jsm_surface_loads() {
    let config = JsmConfig::load(&source(&[
        ("JSM_BASE_URL", "https://jsm.example.net"),
        ("JSM_PAT", "token-123"),
    ]))
    .unwrap();
    assert_eq!(config.base_url, "https://jsm.example.net");
    assert_eq!(config.token, "token-123");
}

#[test]
fn store_surface_requires_all_four_variables() {
    let complete = source(&[
        ("DB_HOST", "db.internal"),
        ("DB_USER", "loader"),
        ("DB_PASSWORD", "pw"),
        ("DB_NAME", "tickets"),
    ]);
    let config = StoreConfig::load(&complete).unwrap();
    assert_eq!(config.host, "db.internal");
    assert_eq!(config.database, "tickets");

    let missing = source(&[("DB_HOST", "db.internal"), ("DB_USER", "loader"), ("DB_NAME", "t")]);
    let err = StoreConfig::load(&missing).unwrap_err();
    assert_eq!(err, ConfigError::Missing {
        variable: "DB_PASSWORD",
    });
}

#[test]
fn missing_variable_is_named() {
    let err = JiraConfig::load(&source(&[("JIRA_BASE_URL", "https://jira.example.net")]))
        .unwrap_err();
    assert_eq!(err, ConfigError::Missing {
        variable: "JIRA_USER",
    });
}

#[test]
fn blank_variable_is_rejected() {
    let mut pairs = jira_pairs();
    pairs[2] = ("JIRA_PASS", "   ");
    let err = JiraConfig::load(&source(&pairs)).unwrap_err();
    assert_eq!(err, ConfigError::Empty {
        variable: "JIRA_PASS",
    });
}

#[test]
fn base_url_must_parse() {
    let mut pairs = jira_pairs();
    pairs[0] = ("JIRA_BASE_URL", "not a url");
    let err = JiraConfig::load(&source(&pairs)).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBaseUrl {
        variable: "JIRA_BASE_URL",
        ..
    }));
}

#[test]
fn base_url_scheme_must_be_http_or_https() {
    let err = JsmConfig::load(&source(&[
        ("JSM_BASE_URL", "ftp://jsm.example.net"),
        ("JSM_PAT", "token-123"),
    ]))
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBaseUrl {
        variable: "JSM_BASE_URL",
        ..
    }));
}
