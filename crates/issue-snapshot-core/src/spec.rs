// crates/issue-snapshot-core/src/spec.rs
// ============================================================================
// Module: Field Specification
// Description: Ordered column/source/extractor catalog for one source system.
// Purpose: Drive both the row builder and the statement builder from one
//          table so positional order can never drift.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! The originals kept two aligned lists per source system: the extraction
//! order in the row builder and the column order in the INSERT statement,
//! synchronized by convention only. One revision desynchronized them with a
//! single missing separator. A [`FieldSpec`] replaces both lists with one
//! ordered table of (destination column, source key, extractor kind) triples
//! plus a declared destination column count; the mapper and the store both
//! consume this table and check their arity against the declaration.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::extract::ExtractorKind;

// ============================================================================
// SECTION: Types
// ============================================================================

/// One (destination column, source key, extractor kind) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    /// Destination column name.
    pub column: &'static str,
    /// Source field key in the raw record's field map.
    pub source_key: &'static str,
    /// Extractor applied to the raw value.
    pub kind: ExtractorKind,
}

/// The full positional specification for one source system.
///
/// # Invariants
/// - Mapping order defines destination column order between the leading key
///   column and the trailing refresh column.
/// - `column_count` is the destination table's declared column count and must
///   equal `mappings.len() + 2`; [`FieldSpec::validate`] enforces this.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Destination table name.
    table: &'static str,
    /// Leading column holding the issue key.
    key_column: &'static str,
    /// Trailing column holding the refresh stamp.
    refreshed_column: &'static str,
    /// Declared destination column count.
    column_count: usize,
    /// Ordered field mappings between the fixed columns.
    mappings: Vec<FieldMapping>,
}

impl FieldSpec {
    /// Builds a specification; call [`FieldSpec::validate`] before use.
    #[must_use]
    pub fn new(
        table: &'static str,
        key_column: &'static str,
        refreshed_column: &'static str,
        column_count: usize,
        mappings: Vec<FieldMapping>,
    ) -> Self {
        Self {
            table,
            key_column,
            refreshed_column,
            column_count,
            mappings,
        }
    }

    /// Destination table name.
    #[must_use]
    pub const fn table(&self) -> &'static str {
        self.table
    }

    /// Declared destination column count.
    #[must_use]
    pub const fn column_count(&self) -> usize {
        self.column_count
    }

    /// Ordered field mappings.
    #[must_use]
    pub fn mappings(&self) -> &[FieldMapping] {
        &self.mappings
    }

    /// Full ordered destination column list: key column, mapped columns,
    /// refresh column.
    #[must_use]
    pub fn columns(&self) -> Vec<&'static str> {
        let mut columns = Vec::with_capacity(self.mappings.len() + 2);
        columns.push(self.key_column);
        columns.extend(self.mappings.iter().map(|mapping| mapping.column));
        columns.push(self.refreshed_column);
        columns
    }

    /// Comma-joined source keys for the search endpoint's `fields` allow-list,
    /// deduplicated in first-seen order.
    #[must_use]
    pub fn api_fields(&self) -> String {
        let mut seen: Vec<&str> = Vec::with_capacity(self.mappings.len());
        for mapping in &self.mappings {
            if !seen.contains(&mapping.source_key) {
                seen.push(mapping.source_key);
            }
        }
        seen.join(",")
    }

    /// Checks internal consistency of the specification.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] when the declared column count disagrees with
    /// the mapping arity, a column name is empty, or a destination column
    /// repeats.
    pub fn validate(&self) -> Result<(), SpecError> {
        let actual = self.mappings.len() + 2;
        if actual != self.column_count {
            return Err(SpecError::DeclaredCountMismatch {
                table: self.table.to_string(),
                declared: self.column_count,
                actual,
            });
        }
        let columns = self.columns();
        for (index, column) in columns.iter().enumerate() {
            if column.is_empty() {
                return Err(SpecError::EmptyColumn {
                    table: self.table.to_string(),
                    position: index,
                });
            }
            if columns[.. index].contains(column) {
                return Err(SpecError::DuplicateColumn {
                    table: self.table.to_string(),
                    column: (*column).to_string(),
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Internal inconsistencies in a field specification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// Declared column count disagrees with the mapping arity.
    #[error(
        "field spec for {table} declares {declared} columns but defines {actual} (key + mappings \
         + refresh stamp)"
    )]
    DeclaredCountMismatch {
        /// Destination table name.
        table: String,
        /// Declared destination column count.
        declared: usize,
        /// Column count implied by the mappings.
        actual: usize,
    },
    /// A destination column name is empty.
    #[error("field spec for {table} has an empty column name at position {position}")]
    EmptyColumn {
        /// Destination table name.
        table: String,
        /// Zero-based column position.
        position: usize,
    },
    /// A destination column name repeats.
    #[error("field spec for {table} repeats destination column {column}")]
    DuplicateColumn {
        /// Destination table name.
        table: String,
        /// Repeated column name.
        column: String,
    },
}

/// Fatal mapping failures.
///
/// # Invariants
/// - Arity mismatches report both counts; this is a development-time contract
///   check against specification drift, not a per-record data-quality issue.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
    /// A mapped row's cell count disagrees with the declared column count.
    #[error("mapped row for {table} has {actual} values but the destination declares {expected} columns")]
    ArityMismatch {
        /// Destination table name.
        table: String,
        /// Declared destination column count.
        expected: usize,
        /// Cell count actually produced.
        actual: usize,
    },
}
