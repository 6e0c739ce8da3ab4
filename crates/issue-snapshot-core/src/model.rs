// crates/issue-snapshot-core/src/model.rs
// ============================================================================
// Module: Issue Field Model
// Description: Typed view over raw search records and mapped snapshot rows.
// Purpose: Replace ad hoc JSON type tests with an exhaustive tagged union.
// Dependencies: serde, serde_json, time
// ============================================================================

//! ## Overview
//! A raw issue arrives as a `key` plus a sparse `fields` object whose values
//! may be absent, scalar, an object with named sub-attributes, or a list of
//! such objects. [`FieldValue`] classifies one field into exactly those four
//! shapes so every extractor becomes a total pattern match. [`CellValue`] is
//! the flattened scalar written to the destination table, and [`MappedRow`]
//! is the fixed-arity tuple produced for one issue.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;
use time::PrimitiveDateTime;

// ============================================================================
// SECTION: Raw Records
// ============================================================================

/// One issue as returned by the ticketing search endpoint.
///
/// # Invariants
/// - `key` is the issue identifier and is always present upstream.
/// - `fields` is sparse: any configured field may be missing or `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawIssue {
    /// Issue key, e.g. `NOC-1234`.
    pub key: String,
    /// Sparse field map keyed by source field identifier.
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl RawIssue {
    /// Looks up one field and classifies its JSON shape.
    ///
    /// A missing key and an explicit JSON `null` both classify as
    /// [`FieldValue::Absent`]; the originals treated them identically.
    #[must_use]
    pub fn field(&self, source_key: &str) -> FieldValue {
        self.fields.get(source_key).map_or(FieldValue::Absent, FieldValue::from_json)
    }
}

// ============================================================================
// SECTION: Field Values
// ============================================================================

/// Scalar leaf of a raw field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// JSON string.
    Text(String),
    /// JSON integral number.
    Integer(i64),
    /// JSON non-integral number.
    Float(f64),
    /// JSON boolean.
    Bool(bool),
}

/// The four shapes a raw issue field can take.
///
/// # Invariants
/// - Classification is total: every JSON value maps to exactly one variant.
/// - `Object` retains the full sub-attribute map so extractors can pick
///   `value`, `displayName`, or `name` as their kind requires.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Field missing from the record, or explicitly `null`.
    Absent,
    /// A bare scalar value.
    Scalar(Scalar),
    /// An object reference carrying named sub-attributes.
    Object(Map<String, Value>),
    /// An ordered multi-value list.
    List(Vec<Value>),
}

impl FieldValue {
    /// Classifies a raw JSON value into its field shape.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::Bool(flag) => Self::Scalar(Scalar::Bool(*flag)),
            Value::Number(number) => number
                .as_i64()
                .map_or_else(
                    || Self::Scalar(Scalar::Float(number.as_f64().unwrap_or(f64::NAN))),
                    |integer| Self::Scalar(Scalar::Integer(integer)),
                ),
            Value::String(text) => Self::Scalar(Scalar::Text(text.clone())),
            Value::Object(map) => Self::Object(map.clone()),
            Value::Array(items) => Self::List(items.clone()),
        }
    }
}

// ============================================================================
// SECTION: Mapped Cells and Rows
// ============================================================================

/// One flattened value bound to a destination column position.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// SQL NULL.
    Null,
    /// Text column value.
    Text(String),
    /// Integer column value.
    Integer(i64),
    /// Floating-point column value.
    Float(f64),
    /// Naive timestamp column value (offset already applied and stripped).
    Timestamp(PrimitiveDateTime),
}

/// The positional tuple produced for one issue.
///
/// # Invariants
/// - Cell order matches the destination column order of the producing
///   [`crate::spec::FieldSpec`]: issue key first, refresh stamp last.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedRow {
    /// Ordered cells, one per destination column.
    cells: Vec<CellValue>,
}

impl MappedRow {
    /// Wraps an ordered cell vector.
    #[must_use]
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self {
            cells,
        }
    }

    /// Number of cells in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true when the row carries no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Ordered view of the cells.
    #[must_use]
    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }
}
