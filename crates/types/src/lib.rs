// crates/types/src/lib.rs
//! Shared data model for natural-language issue search.
//!
//! Every type here crosses the HTTP boundary to the dashboard frontend, so
//! field names serialize in camelCase and TypeScript bindings are generated
//! with ts-rs.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Category of a recognized query fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../src/types/generated/")]
#[serde(rename_all = "lowercase")]
pub enum PartKind {
    Project,
    Status,
    Assignee,
    Reporter,
    Priority,
    #[serde(rename = "type")]
    IssueType,
    Date,
    Text,
    Label,
}

impl PartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Status => "status",
            Self::Assignee => "assignee",
            Self::Reporter => "reporter",
            Self::Priority => "priority",
            Self::IssueType => "type",
            Self::Date => "date",
            Self::Text => "text",
            Self::Label => "label",
        }
    }
}

impl std::fmt::Display for PartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recognized fragment of a natural-language query.
///
/// `translated_clause` is always a standalone JQL predicate, so parts can be
/// joined with `AND` without further checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct QueryPart {
    pub kind: PartKind,
    /// The matched substring, or a synthetic descriptor (e.g. joined project keys).
    pub original_text: String,
    pub translated_clause: String,
}

impl QueryPart {
    pub fn new(
        kind: PartKind,
        original_text: impl Into<String>,
        translated_clause: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            original_text: original_text.into(),
            translated_clause: translated_clause.into(),
        }
    }
}

/// Output of one natural-language → JQL translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    /// Final JQL, always ending in the ordering clause.
    pub query: String,
    /// Parts in stage order: project, status, priority, type, assignee,
    /// reporter, date, free text.
    pub parts: Vec<QueryPart>,
    /// Heuristic score in `[0, 1]`.
    pub confidence: f64,
    /// Example queries, only present when nothing was recognized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub suggestions: Option<Vec<String>>,
}

/// A search the operator ran recently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct RecentSearch {
    pub id: String,
    pub natural_query: String,
    pub query: String,
    /// Epoch milliseconds.
    #[ts(type = "number")]
    pub timestamp: i64,
}

/// A named search the operator pinned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct FavoriteSearch {
    pub id: String,
    pub name: String,
    pub natural_query: String,
    pub query: String,
    /// Epoch milliseconds.
    #[ts(type = "number")]
    pub created_at: i64,
}

/// Response of the natural-language query endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct NlQueryResponse {
    pub result: ConversionResult,
    /// Human-readable summary of the recognized parts.
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_part_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&PartKind::Assignee).unwrap(), "\"assignee\"");
        assert_eq!(serde_json::to_string(&PartKind::IssueType).unwrap(), "\"type\"");
        assert_eq!(PartKind::IssueType.to_string(), "type");
    }

    #[test]
    fn test_query_part_field_names() {
        let part = QueryPart::new(PartKind::Status, "진행중", "status = \"In Progress\"");
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["kind"], "status");
        assert_eq!(json["originalText"], "진행중");
        assert_eq!(json["translatedClause"], "status = \"In Progress\"");
    }

    #[test]
    fn test_suggestions_absent_when_none() {
        let result = ConversionResult {
            query: "ORDER BY updated DESC".into(),
            parts: vec![],
            confidence: 0.0,
            suggestions: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("suggestions").is_none());
    }

    #[test]
    fn test_recent_search_reads_camel_case() {
        let raw = r#"{"id":"1700000000000","naturalQuery":"내 이슈","query":"assignee = currentUser() ORDER BY updated DESC","timestamp":1700000000000}"#;
        let recent: RecentSearch = serde_json::from_str(raw).unwrap();
        assert_eq!(recent.natural_query, "내 이슈");
        assert_eq!(recent.timestamp, 1_700_000_000_000);
    }
}
