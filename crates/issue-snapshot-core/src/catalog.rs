// crates/issue-snapshot-core/src/catalog.rs
// ============================================================================
// Module: Source Field Catalogs
// Description: Built-in field specifications for the Jira and JSM sources.
// Purpose: Bind destination columns to source keys and extractor kinds in one
//          ordered table per source system.
// Dependencies: none beyond crate-local types
// ============================================================================

//! ## Overview
//! These tables are the authoritative positional mapping between each source
//! system's sparse custom fields and its destination table. Order matters:
//! the mapper emits cells and the store emits columns in exactly this order.
//! The declared column counts include the leading `issuekey` column and the
//! trailing `last_refreshed_at` column.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::extract::ExtractorKind;
use crate::spec::FieldMapping;
use crate::spec::FieldSpec;

// ============================================================================
// SECTION: Search Filters
// ============================================================================

/// Fixed search filter for the Jira source.
pub const JIRA_JQL: &str = "filter = NOC-6";

/// Fixed search filter for the JSM source.
pub const JSM_JQL: &str =
    "issuetype = Incident AND status not in (Canceled, Cancelled, \"Auto Resolved\", Resolved)";

// ============================================================================
// SECTION: Jira Catalog
// ============================================================================

/// Shorthand used only by the catalog tables below.
const fn map(column: &'static str, source_key: &'static str, kind: ExtractorKind) -> FieldMapping {
    FieldMapping {
        column,
        source_key,
        kind,
    }
}

/// Ordered mappings for `jira_open_issues` between `issuekey` and
/// `last_refreshed_at`.
const JIRA_MAPPINGS: [FieldMapping; 51] = [
    map("summary", "summary", ExtractorKind::Raw),
    map("status", "status", ExtractorKind::Name),
    map("assignee", "assignee", ExtractorKind::User),
    map("reporter", "reporter", ExtractorKind::User),
    map("created", "created", ExtractorKind::Timestamp),
    map("updated", "updated", ExtractorKind::Timestamp),
    map("issuetype", "issuetype", ExtractorKind::Name),
    map("brief_description", "customfield_23866", ExtractorKind::Raw),
    map("incident_source", "customfield_14267", ExtractorKind::Option),
    map("country", "customfield_11266", ExtractorKind::Option),
    map("unit", "customfield_15570", ExtractorKind::Option),
    map("affected_ci", "customfield_15262", ExtractorKind::Raw),
    map("infra_app", "customfield_13861", ExtractorKind::Option),
    map("owner_name", "customfield_15578", ExtractorKind::Raw),
    map("incident_geography", "customfield_15560", ExtractorKind::Option),
    map("application_name", "customfield_15960", ExtractorKind::Option),
    map("incident_priority", "customfield_14261", ExtractorKind::Option),
    map("incident_assigned_to", "customfield_13061", ExtractorKind::Option),
    map("site_location", "customfield_15964", ExtractorKind::Raw),
    map("call_summary", "customfield_15579", ExtractorKind::Raw),
    map("jsm_key", "customfield_15574", ExtractorKind::Raw),
    map("response_sla", "customfield_21184", ExtractorKind::Option),
    map("resolution_sla", "customfield_21185", ExtractorKind::Option),
    map("services", "customfield_25561", ExtractorKind::Multi),
    map("category", "customfield_10694", ExtractorKind::Option),
    map("security_incident", "customfield_27870", ExtractorKind::Option),
    map("comments", "customfield_10041", ExtractorKind::Raw),
    map("fault_attribution", "customfield_23979", ExtractorKind::Option),
    map("closure_code", "customfield_15565", ExtractorKind::Option),
    map("resolved_by", "customfield_22361", ExtractorKind::Option),
    map("reason_missed_resolution_sla", "customfield_22716", ExtractorKind::Option),
    map("resources", "customfield_10748", ExtractorKind::Multi),
    map("resolution_completion_date", "customfield_10076", ExtractorKind::Timestamp),
    map("task_type", "customfield_10190", ExtractorKind::Option),
    map("task_sub_type", "customfield_23875", ExtractorKind::Option),
    map("request_type", "customfield_10007", ExtractorKind::Option),
    map("product_variants", "customfield_10078", ExtractorKind::Multi),
    map("customers", "customfield_10001", ExtractorKind::Multi),
    map("priority", "priority", ExtractorKind::Name),
    map("bug_type", "customfield_21460", ExtractorKind::Option),
    map("resolution_details", "customfield_10077", ExtractorKind::Raw),
    map("bug_reason", "customfield_15060", ExtractorKind::Option),
    map("response_sla_bug", "customfield_21161", ExtractorKind::Raw),
    map("resolution_sla_bug", "customfield_21160", ExtractorKind::Raw),
    map("reported_by", "customfield_20760", ExtractorKind::User),
    map("resolved", "resolutiondate", ExtractorKind::Timestamp),
    map("rca", "customfield_10850", ExtractorKind::Raw),
    map("capa", "customfield_10851", ExtractorKind::Raw),
    map("known_issue", "customfield_29660", ExtractorKind::Option),
    map("five_why", "customfield_15162", ExtractorKind::Raw),
    map("validator_approved", "customfield_29662", ExtractorKind::Option),
];

/// Field specification for the Jira source.
#[must_use]
pub fn jira_field_spec() -> FieldSpec {
    FieldSpec::new("jira_open_issues", "issuekey", "last_refreshed_at", 53, JIRA_MAPPINGS.to_vec())
}

// ============================================================================
// SECTION: JSM Catalog
// ============================================================================

/// Ordered mappings for `jsm_open_issues` between `issuekey` and
/// `last_refreshed_at`.
const JSM_MAPPINGS: [FieldMapping; 41] = [
    map("issuetype", "issuetype", ExtractorKind::Name),
    map("unit", "customfield_10130", ExtractorKind::Option),
    map("application", "customfield_10124", ExtractorKind::Option),
    map("status", "status", ExtractorKind::Name),
    map("priority", "priority", ExtractorKind::Name),
    map("summary", "summary", ExtractorKind::Raw),
    map("summary_details", "customfield_10123", ExtractorKind::Raw),
    map("assignee", "assignee", ExtractorKind::User),
    map("created", "created", ExtractorKind::Timestamp),
    map("resolved", "resolutiondate", ExtractorKind::Timestamp),
    map("updated", "updated", ExtractorKind::Timestamp),
    map("site_location", "customfield_10131", ExtractorKind::Raw),
    map("geography", "customfield_10126", ExtractorKind::Option),
    map("country", "customfield_10127", ExtractorKind::Option),
    map("infra_app", "customfield_10132", ExtractorKind::Option),
    map("affected_ci", "customfield_10125", ExtractorKind::Raw),
    map("issue_category", "customfield_10133", ExtractorKind::Option),
    map("owner_name", "customfield_10134", ExtractorKind::Raw),
    map("time_spent_seconds", "aggregatetimespent", ExtractorKind::Raw),
    map("assigned_date_bot", "customfield_10701", ExtractorKind::Timestamp),
    map("escalation_date_l2", "customfield_10300", ExtractorKind::Timestamp),
    map("assigned_date_l2", "customfield_10801", ExtractorKind::Timestamp),
    map("escalation_date_l3", "customfield_10301", ExtractorKind::Timestamp),
    map("sop_id", "customfield_10147", ExtractorKind::Raw),
    map("security_incident_comment", "customfield_10145", ExtractorKind::Raw),
    map("fault_attribution", "customfield_10143", ExtractorKind::Option),
    map("closure_code", "customfield_10146", ExtractorKind::Option),
    map("resolved_by_team", "customfield_10148", ExtractorKind::Option),
    map("assigned_back_l1", "customfield_10803", ExtractorKind::Option),
    map("assigned_back_l2", "customfield_10806", ExtractorKind::Option),
    map("last_level_assignee", "customfield_10804", ExtractorKind::Option),
    map("source", "customfield_10112", ExtractorKind::Option),
    map("call_summary", "customfield_11001", ExtractorKind::Raw),
    map("response_sla", "customfield_11403", ExtractorKind::Option),
    map("resolution_sla", "customfield_11402", ExtractorKind::Option),
    map("reason_missed_response_sla", "customfield_11405", ExtractorKind::Option),
    map("reason_missed_resolution_sla", "customfield_11404", ExtractorKind::Option),
    map("expected_response", "customfield_11400", ExtractorKind::Timestamp),
    map("expected_resolution", "customfield_11401", ExtractorKind::Timestamp),
    map("services", "customfield_11406", ExtractorKind::Option),
    map("service_impact", "customfield_11500", ExtractorKind::Option),
];

/// Field specification for the JSM source.
#[must_use]
pub fn jsm_field_spec() -> FieldSpec {
    FieldSpec::new("jsm_open_issues", "issuekey", "last_refreshed_at", 43, JSM_MAPPINGS.to_vec())
}
