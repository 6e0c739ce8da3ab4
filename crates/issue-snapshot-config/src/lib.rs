// crates/issue-snapshot-config/src/lib.rs
// ============================================================================
// Module: Issue Snapshot Configuration
// Description: Environment-sourced configuration for sources and store.
// Purpose: Replace module-level credential globals with explicit, validated
//          configuration structures passed into each component.
// Dependencies: thiserror, url
// ============================================================================

//! ## Overview
//! All externally supplied settings enter through this crate: base URL and
//! credentials for each ticketing system, and host/user/password/database for
//! the destination store. Lookups go through an [`EnvSource`] so tests can
//! inject fabricated configuration without touching the process environment.
//! Every recognized variable is required and must be non-empty; validation
//! failures name the variable.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod env;
pub mod settings;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::EnvSource;
pub use settings::ConfigError;
pub use settings::JiraConfig;
pub use settings::JsmConfig;
pub use settings::StoreConfig;
