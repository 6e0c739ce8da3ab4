// crates/issue-snapshot-config/src/env.rs
// ============================================================================
// Module: Environment Source
// Description: Key lookup over the process environment or an override map.
// Purpose: Deterministic configuration lookups for production and tests.
// Dependencies: none beyond std
// ============================================================================

//! ## Overview
//! An [`EnvSource`] resolves configuration keys either from the process
//! environment or from an explicit override map. Overrides take precedence
//! and make configuration loading fully deterministic in tests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::settings::ConfigError;

// ============================================================================
// SECTION: Source
// ============================================================================

/// Configuration key source.
///
/// # Invariants
/// - With overrides present, the process environment is never consulted.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    /// Optional override map used for deterministic lookups.
    overrides: Option<BTreeMap<String, String>>,
}

impl EnvSource {
    /// Source backed by the process environment.
    #[must_use]
    pub const fn process() -> Self {
        Self {
            overrides: None,
        }
    }

    /// Source backed by an explicit override map.
    #[must_use]
    pub const fn from_overrides(overrides: BTreeMap<String, String>) -> Self {
        Self {
            overrides: Some(overrides),
        }
    }

    /// Looks up one key.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<String> {
        match &self.overrides {
            Some(overrides) => overrides.get(key).cloned(),
            None => std::env::var(key).ok(),
        }
    }

    /// Looks up one required key, rejecting absent and blank values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when the key is unset and
    /// [`ConfigError::Empty`] when its value is blank.
    pub fn require(&self, key: &'static str) -> Result<String, ConfigError> {
        let value = self.lookup(key).ok_or(ConfigError::Missing {
            variable: key,
        })?;
        if value.trim().is_empty() {
            return Err(ConfigError::Empty {
                variable: key,
            });
        }
        Ok(value)
    }
}
