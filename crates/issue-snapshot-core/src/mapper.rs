// crates/issue-snapshot-core/src/mapper.rs
// ============================================================================
// Module: Issue Mapper
// Description: Applies a field specification to raw issues.
// Purpose: Produce fixed-arity snapshot rows, failing fast on drift.
// Dependencies: time
// ============================================================================

//! ## Overview
//! For each issue the mapper walks the field specification in order, looks up
//! the named source field, applies the designated extractor, and assembles
//! the positional row: issue key first, one cell per mapping, refresh stamp
//! last. The arity of every row is checked against the specification's
//! declared column count before the row is handed to any loader.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::PrimitiveDateTime;

use crate::model::CellValue;
use crate::model::MappedRow;
use crate::model::RawIssue;
use crate::spec::FieldSpec;
use crate::spec::MapError;

// ============================================================================
// SECTION: Mapping
// ============================================================================

/// Maps one raw issue into one positional snapshot row.
///
/// # Errors
///
/// Returns [`MapError::ArityMismatch`] when the produced cell count disagrees
/// with the specification's declared destination column count.
pub fn map_issue(
    spec: &FieldSpec,
    issue: &RawIssue,
    refreshed_at: PrimitiveDateTime,
) -> Result<MappedRow, MapError> {
    let mut cells = Vec::with_capacity(spec.column_count());
    cells.push(CellValue::Text(issue.key.clone()));
    for mapping in spec.mappings() {
        let value = issue.field(mapping.source_key);
        cells.push(mapping.kind.extract(&value));
    }
    cells.push(CellValue::Timestamp(refreshed_at));
    if cells.len() != spec.column_count() {
        return Err(MapError::ArityMismatch {
            table: spec.table().to_string(),
            expected: spec.column_count(),
            actual: cells.len(),
        });
    }
    Ok(MappedRow::new(cells))
}

/// Maps a whole fetched batch, preserving fetch order.
///
/// All rows share one refresh stamp: the snapshot is a point-in-time
/// replacement, not a per-row observation.
///
/// # Errors
///
/// Returns the first [`MapError`] encountered; a single drifted row fails the
/// whole run before anything is written.
pub fn map_snapshot(
    spec: &FieldSpec,
    issues: &[RawIssue],
    refreshed_at: PrimitiveDateTime,
) -> Result<Vec<MappedRow>, MapError> {
    issues.iter().map(|issue| map_issue(spec, issue, refreshed_at)).collect()
}
