// crates/core/src/describe.rs
//! Human-readable summary of recognized query parts.

use jira_nlq_types::{PartKind, QueryPart};

/// Shown when nothing was recognized.
pub const ALL_ISSUES: &str = "모든 이슈";

fn describe_part(part: &QueryPart) -> String {
    let original = &part.original_text;
    match part.kind {
        PartKind::Project => format!("프로젝트: {original}"),
        PartKind::Status => format!("상태: {original}"),
        PartKind::Priority => format!("우선순위: {original}"),
        PartKind::IssueType => format!("유형: {original}"),
        PartKind::Assignee => {
            if part.translated_clause.contains("currentUser") {
                "내게 할당된".to_string()
            } else if part.translated_clause.contains("EMPTY") {
                "미할당".to_string()
            } else {
                format!("담당자: {original}")
            }
        }
        PartKind::Reporter => {
            if part.translated_clause.contains("currentUser") {
                "내가 생성한".to_string()
            } else {
                format!("보고자: {original}")
            }
        }
        PartKind::Date => format!("기간: {original}"),
        PartKind::Text => format!("텍스트: \"{original}\""),
        PartKind::Label => format!("라벨: {original}"),
    }
}

/// Comma-join one phrase per part, preserving order.
pub fn describe(parts: &[QueryPart]) -> String {
    if parts.is_empty() {
        return ALL_ISSUES.to_string();
    }
    parts.iter().map(describe_part).collect::<Vec<_>>().join(", ")
}
