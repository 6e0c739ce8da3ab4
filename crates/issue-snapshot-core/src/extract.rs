// crates/issue-snapshot-core/src/extract.rs
// ============================================================================
// Module: Field Extractors
// Description: Total extraction from one raw field shape to one cell value.
// Purpose: Absorb malformed field values locally; never fail a whole record.
// Dependencies: serde_json, time
// ============================================================================

//! ## Overview
//! Each extractor kind is a total function from an arbitrary field shape to
//! an optional scalar. A wrong shape (a list handed to an object extractor, a
//! garbled timestamp string) yields [`CellValue::Null`] rather than an error:
//! one malformed custom field must not abort extraction of an otherwise
//! valid record. Specification drift, by contrast, is fatal and is caught by
//! the arity check in [`crate::mapper`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;
use time::OffsetDateTime;
use time::PrimitiveDateTime;
use time::UtcOffset;

use crate::model::CellValue;
use crate::model::FieldValue;
use crate::model::Scalar;

// ============================================================================
// SECTION: Extractor Kinds
// ============================================================================

/// The closed set of ways one raw field flattens into one cell.
///
/// # Invariants
/// - Every kind is total over [`FieldValue`]; no input shape panics or errors.
/// - Mismatched shapes extract to [`CellValue::Null`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorKind {
    /// Pass a bare scalar through unchanged.
    Raw,
    /// Single-select custom field: take the object's `value` attribute.
    Option,
    /// User reference: take the object's `displayName` attribute.
    User,
    /// System reference (status, issue type, priority): take the object's
    /// `name` attribute.
    Name,
    /// Multi-select list: join element labels with a comma.
    Multi,
    /// Offset timestamp string parsed and stored naive.
    Timestamp,
}

impl ExtractorKind {
    /// Extracts one cell from one classified field value.
    #[must_use]
    pub fn extract(self, value: &FieldValue) -> CellValue {
        match (self, value) {
            (Self::Raw, FieldValue::Scalar(scalar)) => scalar_cell(scalar),
            (Self::Option, FieldValue::Object(map)) => attribute_text(map, "value"),
            (Self::User, FieldValue::Object(map)) => attribute_text(map, "displayName"),
            (Self::Name, FieldValue::Object(map)) => attribute_text(map, "name"),
            (Self::Multi, FieldValue::List(items)) => CellValue::Text(join_labels(items)),
            (Self::Timestamp, FieldValue::Scalar(Scalar::Text(input))) => {
                parse_search_timestamp(input).map_or(CellValue::Null, CellValue::Timestamp)
            }
            _ => CellValue::Null,
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Converts a raw scalar into its cell representation.
///
/// Booleans store as integers; the destination schema has no boolean type.
fn scalar_cell(scalar: &Scalar) -> CellValue {
    match scalar {
        Scalar::Text(text) => CellValue::Text(text.clone()),
        Scalar::Integer(integer) => CellValue::Integer(*integer),
        Scalar::Float(float) => CellValue::Float(*float),
        Scalar::Bool(flag) => CellValue::Integer(i64::from(*flag)),
    }
}

/// Reads a string sub-attribute from an object reference.
fn attribute_text(map: &Map<String, Value>, attribute: &str) -> CellValue {
    match map.get(attribute) {
        Some(Value::String(text)) => CellValue::Text(text.clone()),
        _ => CellValue::Null,
    }
}

/// Joins multi-value elements: each contributes its non-empty `value`, else
/// its non-empty `displayName`, else an empty string.
fn join_labels(items: &[Value]) -> String {
    let labels: Vec<&str> = items.iter().map(element_label).collect();
    labels.join(",")
}

/// Picks the label for one multi-value element.
fn element_label(item: &Value) -> &str {
    let Value::Object(map) = item else {
        return "";
    };
    if let Some(Value::String(value)) = map.get("value") {
        if !value.is_empty() {
            return value;
        }
    }
    if let Some(Value::String(display)) = map.get("displayName") {
        if !display.is_empty() {
            return display;
        }
    }
    ""
}

/// Parses the search API timestamp format `YYYY-MM-DDThh:mm:ss.fff±hhmm`.
///
/// The offset is consumed by converting to UTC and then discarded; stored
/// timestamps are naive. Any parse failure yields `None`.
#[must_use]
pub fn parse_search_timestamp(input: &str) -> Option<PrimitiveDateTime> {
    let format = time::macros::format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond][offset_hour sign:mandatory][offset_minute]"
    );
    let parsed = OffsetDateTime::parse(input, format).ok()?;
    let utc = parsed.to_offset(UtcOffset::UTC);
    Some(PrimitiveDateTime::new(utc.date(), utc.time()))
}
