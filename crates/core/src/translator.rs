// crates/core/src/translator.rs
//! Natural-language → JQL translation.
//!
//! The input runs through a fixed sequence of stages (see [`Stage::ORDER`]).
//! Each stage looks at the remaining working text, emits at most one
//! [`QueryPart`], and strips what it recognized so later stages never see it
//! again. Whatever survives every structured stage becomes a full-text
//! `text ~ "..."` clause.
//!
//! Translation never fails: unrecognized input degrades to free text, or to
//! an empty result carrying example suggestions.

use std::sync::OnceLock;

use jira_nlq_types::{ConversionResult, PartKind, QueryPart};
use regex_lite::Regex;
use tracing::{debug, trace};

use crate::vocab::{
    DateBound, PatternRule, Synonym, ASSIGNEE_RULES, DATE_RULES, FILLER_WORDS,
    ISSUE_TYPE_SYNONYMS, ORDER_BY_CLAUSE, PRIORITY_SYNONYMS, REPORTER_RULES,
    STATUS_SYNONYMS, SUGGESTIONS,
};

/// Free text shorter than this (in chars) is dropped.
const MIN_FREE_TEXT_CHARS: usize = 2;

/// Issue-key-like token: 2-10 uppercase letters, optionally `-digits`.
const PROJECT_KEY_PATTERN: &str = r"\b([A-Z]{2,10})(?:-\d+)?\b";

/// One step of the translation pipeline, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Project,
    Status,
    Priority,
    IssueType,
    Assignee,
    Reporter,
    Date,
    FreeText,
}

impl Stage {
    /// Evaluation order. Parts appear in the result in this order.
    pub const ORDER: [Stage; 8] = [
        Stage::Project,
        Stage::Status,
        Stage::Priority,
        Stage::IssueType,
        Stage::Assignee,
        Stage::Reporter,
        Stage::Date,
        Stage::FreeText,
    ];

    /// Confidence added when this stage emits a part.
    pub fn weight(&self) -> f64 {
        match self {
            Stage::Project | Stage::Status | Stage::Assignee => 0.2,
            Stage::Priority | Stage::IssueType | Stage::Reporter | Stage::Date => 0.15,
            Stage::FreeText => 0.1,
        }
    }

    pub fn kind(&self) -> PartKind {
        match self {
            Stage::Project => PartKind::Project,
            Stage::Status => PartKind::Status,
            Stage::Priority => PartKind::Priority,
            Stage::IssueType => PartKind::IssueType,
            Stage::Assignee => PartKind::Assignee,
            Stage::Reporter => PartKind::Reporter,
            Stage::Date => PartKind::Date,
            Stage::FreeText => PartKind::Text,
        }
    }
}

/// A synonym phrase compiled to a case-insensitive literal matcher.
struct CompiledPhrase {
    synonym: Synonym,
    regex: Regex,
}

struct CompiledRule {
    rule: PatternRule,
    regex: Regex,
}

struct CompiledDateRule {
    bound: DateBound,
    regex: Regex,
}

fn compile_phrases(table: &[Synonym]) -> Vec<CompiledPhrase> {
    table
        .iter()
        .map(|synonym| CompiledPhrase {
            synonym: *synonym,
            regex: Regex::new(&format!("(?i){}", regex_lite::escape(synonym.phrase)))
                .expect("escaped literal is a valid regex"),
        })
        .collect()
}

fn compile_rules(table: &[PatternRule]) -> Vec<CompiledRule> {
    table
        .iter()
        .map(|rule| CompiledRule {
            rule: *rule,
            regex: Regex::new(rule.pattern).expect("vocabulary pattern is a valid regex"),
        })
        .collect()
}

fn project_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PROJECT_KEY_PATTERN).expect("project key pattern is valid"))
}

fn separator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[,.\s]+").expect("separator pattern is valid"))
}

fn status_phrases() -> &'static [CompiledPhrase] {
    static TABLE: OnceLock<Vec<CompiledPhrase>> = OnceLock::new();
    TABLE.get_or_init(|| compile_phrases(STATUS_SYNONYMS))
}

fn priority_phrases() -> &'static [CompiledPhrase] {
    static TABLE: OnceLock<Vec<CompiledPhrase>> = OnceLock::new();
    TABLE.get_or_init(|| compile_phrases(PRIORITY_SYNONYMS))
}

fn issue_type_phrases() -> &'static [CompiledPhrase] {
    static TABLE: OnceLock<Vec<CompiledPhrase>> = OnceLock::new();
    TABLE.get_or_init(|| compile_phrases(ISSUE_TYPE_SYNONYMS))
}

fn assignee_rules() -> &'static [CompiledRule] {
    static TABLE: OnceLock<Vec<CompiledRule>> = OnceLock::new();
    TABLE.get_or_init(|| compile_rules(ASSIGNEE_RULES))
}

fn reporter_rules() -> &'static [CompiledRule] {
    static TABLE: OnceLock<Vec<CompiledRule>> = OnceLock::new();
    TABLE.get_or_init(|| compile_rules(REPORTER_RULES))
}

fn date_rules() -> &'static [CompiledDateRule] {
    static TABLE: OnceLock<Vec<CompiledDateRule>> = OnceLock::new();
    TABLE.get_or_init(|| {
        DATE_RULES
            .iter()
            .map(|rule| CompiledDateRule {
                bound: rule.bound,
                regex: Regex::new(rule.pattern).expect("date pattern is a valid regex"),
            })
            .collect()
    })
}

/// Escape a value for use inside a double-quoted JQL string.
fn quote_jql(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Translator configured with an optional project-key allow-list.
///
/// An empty allow-list accepts every issue-key-like token as a project.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    project_keys: Vec<String>,
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            project_keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn project_keys(&self) -> &[String] {
        &self.project_keys
    }

    fn accepts_project(&self, key: &str) -> bool {
        self.project_keys.is_empty() || self.project_keys.iter().any(|k| k == key)
    }

    /// Translate free text into JQL. Same input, same output.
    pub fn translate(&self, input: &str) -> ConversionResult {
        let mut working = input.to_string();
        let mut parts = Vec::new();
        let mut confidence = 0.0;

        for stage in Stage::ORDER {
            let part = match stage {
                Stage::Project => self.extract_projects(&mut working),
                Stage::Status => extract_synonym(&mut working, status_phrases(), stage, "status"),
                Stage::Priority => {
                    extract_synonym(&mut working, priority_phrases(), stage, "priority")
                }
                Stage::IssueType => {
                    extract_synonym(&mut working, issue_type_phrases(), stage, "issuetype")
                }
                Stage::Assignee => extract_rule(&mut working, assignee_rules(), stage),
                Stage::Reporter => extract_rule(&mut working, reporter_rules(), stage),
                Stage::Date => extract_date(&mut working),
                Stage::FreeText => extract_free_text(&working),
            };

            if let Some(part) = part {
                trace!(
                    stage = ?stage,
                    original = %part.original_text,
                    clause = %part.translated_clause,
                    "stage matched"
                );
                confidence += stage.weight();
                parts.push(part);
            }
        }

        let query = if parts.is_empty() {
            ORDER_BY_CLAUSE.to_string()
        } else {
            let clauses: Vec<&str> = parts.iter().map(|p| p.translated_clause.as_str()).collect();
            format!("{} {}", clauses.join(" AND "), ORDER_BY_CLAUSE)
        };

        let confidence = round_confidence(confidence);
        let suggestions = parts
            .is_empty()
            .then(|| SUGGESTIONS.iter().map(|s| s.to_string()).collect());

        debug!(
            input_chars = input.chars().count(),
            parts = parts.len(),
            confidence = confidence,
            query = %query,
            "translated natural-language query"
        );

        ConversionResult {
            query,
            parts,
            confidence,
            suggestions,
        }
    }

    /// Collect project keys from the input and strip the accepted tokens.
    ///
    /// Runs first, so `working` still equals the original input.
    fn extract_projects(&self, working: &mut String) -> Option<QueryPart> {
        let mut keys: Vec<String> = Vec::new();
        let mut remaining = String::with_capacity(working.len());
        let mut last = 0;

        for token in project_regex().find_iter(working.as_str()) {
            let raw = token.as_str();
            let key = raw.split_once('-').map_or(raw, |(key, _)| key);
            if !self.accepts_project(key) {
                continue;
            }
            if !keys.iter().any(|k| k == key) {
                keys.push(key.to_string());
            }
            remaining.push_str(&working[last..token.start()]);
            last = token.end();
        }

        if keys.is_empty() {
            return None;
        }
        remaining.push_str(&working[last..]);
        *working = remaining;

        let clause = match keys.as_slice() {
            [single] => format!("project = {single}"),
            many => format!("project IN ({})", many.join(", ")),
        };
        Some(QueryPart::new(PartKind::Project, keys.join(", "), clause))
    }
}

/// First table entry found anywhere in `working` wins for the whole category.
fn extract_synonym(
    working: &mut String,
    table: &[CompiledPhrase],
    stage: Stage,
    field: &str,
) -> Option<QueryPart> {
    let (phrase, original) = table
        .iter()
        .find_map(|p| p.regex.find(working.as_str()).map(|m| (p, m.as_str().to_string())))?;

    *working = phrase.regex.replace_all(working.as_str(), "").into_owned();
    Some(QueryPart::new(
        stage.kind(),
        original,
        format!("{field} = {}", quote_jql(phrase.synonym.canonical)),
    ))
}

fn extract_rule(working: &mut String, rules: &[CompiledRule], stage: Stage) -> Option<QueryPart> {
    let (rule, original) = rules
        .iter()
        .find_map(|r| r.regex.find(working.as_str()).map(|m| (r, m.as_str().to_string())))?;

    *working = rule.regex.replacen(working.as_str(), 1, "").into_owned();
    Some(QueryPart::new(stage.kind(), original, rule.rule.clause))
}

fn extract_date(working: &mut String) -> Option<QueryPart> {
    let (rule, original, bound) = date_rules().iter().find_map(|r| {
        let caps = r.regex.captures(working.as_str())?;
        let original = caps.get(0)?.as_str().to_string();
        let bound = match r.bound {
            DateBound::Fixed(expr) => expr.to_string(),
            DateBound::LastDays => format!("-{}d", caps.get(1)?.as_str()),
        };
        Some((r, original, bound))
    })?;

    *working = rule.regex.replacen(working.as_str(), 1, "").into_owned();
    Some(QueryPart::new(
        PartKind::Date,
        original,
        format!("created >= {bound}"),
    ))
}

/// Normalize leftover text: separators collapsed, filler words dropped.
pub fn clean_free_text(working: &str) -> String {
    let mut text = separator_regex().replace_all(working, " ").into_owned();
    for filler in FILLER_WORDS {
        text = text.replace(filler, "");
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn extract_free_text(working: &str) -> Option<QueryPart> {
    let cleaned = clean_free_text(working);
    if cleaned.chars().count() < MIN_FREE_TEXT_CHARS {
        return None;
    }
    let clause = format!("text ~ {}", quote_jql(&cleaned));
    Some(QueryPart::new(PartKind::Text, cleaned, clause))
}

/// Clamp to `[0, 1]` and round to hundredths so sums like 0.2 + 0.15 stay exact.
fn round_confidence(raw: f64) -> f64 {
    (raw.clamp(0.0, 1.0) * 100.0).round() / 100.0
}

/// Translate with no project allow-list.
pub fn translate(input: &str) -> ConversionResult {
    Translator::new().translate(input)
}

/// Translate, accepting only the given project keys.
pub fn translate_with_projects<S: AsRef<str>>(input: &str, known_project_keys: &[S]) -> ConversionResult {
    Translator::with_project_keys(known_project_keys.iter().map(|k| k.as_ref().to_string()))
        .translate(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn clauses(result: &ConversionResult) -> Vec<&str> {
        result.parts.iter().map(|p| p.translated_clause.as_str()).collect()
    }

    #[test]
    fn test_my_issues() {
        let result = translate("내 이슈 보여줘");
        assert_eq!(clauses(&result), vec!["assignee = currentUser()"]);
        assert_eq!(result.query, "assignee = currentUser() ORDER BY updated DESC");
        assert_eq!(result.confidence, 0.2);
        assert!(result.suggestions.is_none());
    }

    #[test]
    fn test_project_status_and_type() {
        let result = translate_with_projects("PROJ 진행중인 버그", &["PROJ"]);
        assert_eq!(
            result.query,
            "project = PROJ AND status = \"In Progress\" AND issuetype = \"Bug\" ORDER BY updated DESC"
        );
        let kinds: Vec<PartKind> = result.parts.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, vec![PartKind::Project, PartKind::Status, PartKind::IssueType]);
        assert_eq!(result.parts[0].original_text, "PROJ");
        assert_eq!(result.parts[1].original_text, "진행중");
        assert_eq!(result.confidence, 0.55);
    }

    #[test]
    fn test_recent_days() {
        let result = translate("최근 7일");
        assert_eq!(result.parts.len(), 1);
        assert_eq!(result.parts[0].kind, PartKind::Date);
        assert_eq!(result.parts[0].translated_clause, "created >= -7d");
        assert_eq!(result.query, "created >= -7d ORDER BY updated DESC");
    }

    #[test]
    fn test_empty_input_yields_suggestions() {
        let result = translate("");
        assert_eq!(result.query, "ORDER BY updated DESC");
        assert!(result.parts.is_empty());
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.suggestions.as_ref().map(Vec::len), Some(3));
    }

    #[test]
    fn test_filler_only_input_yields_suggestions() {
        let result = translate("이슈 검색 보여줘.");
        assert!(result.parts.is_empty());
        assert_eq!(result.query, ORDER_BY_CLAUSE);
        assert!(result.suggestions.is_some());
    }

    #[test]
    fn test_project_allow_list() {
        let accepted = translate_with_projects("PROJ-123 그냥 텍스트", &["PROJ"]);
        assert_eq!(accepted.parts[0].translated_clause, "project = PROJ");
        assert_eq!(accepted.parts[1].translated_clause, "text ~ \"그냥 텍스트\"");

        let rejected = translate_with_projects("PROJ-123 그냥 텍스트", &["OTHER"]);
        assert!(rejected.parts.iter().all(|p| p.kind != PartKind::Project));
        // Rejected tokens remain searchable as text.
        assert_eq!(
            rejected.parts[0].translated_clause,
            "text ~ \"PROJ-123 그냥 텍스트\""
        );
    }

    #[test]
    fn test_multiple_projects_use_in() {
        let result = translate("ABC-1 XYZ-22 ABC-3");
        assert_eq!(result.parts[0].translated_clause, "project IN (ABC, XYZ)");
        assert_eq!(result.parts[0].original_text, "ABC, XYZ");
        assert_eq!(result.parts.len(), 1);
    }

    #[test]
    fn test_project_key_length_bounds() {
        assert!(translate("A 버그").parts.iter().all(|p| p.kind != PartKind::Project));
        assert!(translate("ABCDEFGHIJK").parts.iter().all(|p| p.kind != PartKind::Project));
        assert_eq!(translate("ABCDEFGHIJ").parts[0].translated_clause, "project = ABCDEFGHIJ");
    }

    #[test]
    fn test_only_one_status_clause() {
        let result = translate("진행중 완료");
        let statuses: Vec<&QueryPart> =
            result.parts.iter().filter(|p| p.kind == PartKind::Status).collect();
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].translated_clause, "status = \"In Progress\"");
    }

    #[test]
    fn test_status_table_order_beats_input_order() {
        // "done" appears first in the text, but Backlog is earlier in the table.
        let result = translate("done backlog");
        assert_eq!(result.parts[0].translated_clause, "status = \"Backlog\"");
    }

    #[test]
    fn test_status_match_is_case_insensitive_and_strips_all_occurrences() {
        let result = translate("In Progress in progress");
        assert_eq!(clauses(&result), vec!["status = \"In Progress\""]);
        assert_eq!(result.parts[0].original_text, "In Progress");
    }

    #[test]
    fn test_priority_longest_first() {
        assert_eq!(translate("highest").parts[0].translated_clause, "priority = \"Highest\"");
        assert_eq!(translate("lowest").parts[0].translated_clause, "priority = \"Lowest\"");
        assert_eq!(translate("긴급").parts[0].translated_clause, "priority = \"Highest\"");
        assert_eq!(translate("높은").parts[0].translated_clause, "priority = \"High\"");
    }

    #[test]
    fn test_sub_task_wins_over_task() {
        let result = translate("sub-task");
        assert_eq!(clauses(&result), vec!["issuetype = \"Sub-task\""]);
    }

    #[test]
    fn test_unassigned() {
        assert_eq!(clauses(&translate("미할당 버그")), vec!["issuetype = \"Bug\"", "assignee is EMPTY"]);
        assert_eq!(clauses(&translate("unassigned")), vec!["assignee is EMPTY"]);
    }

    #[test]
    fn test_english_assignee_phrases() {
        assert_eq!(clauses(&translate("my issues")), vec!["assignee = currentUser()"]);
        assert_eq!(clauses(&translate("Assigned to me")), vec!["assignee = currentUser()"]);
    }

    #[test]
    fn test_reporter() {
        let result = translate("내가 만든 이슈");
        assert_eq!(clauses(&result), vec!["reporter = currentUser()"]);
        assert_eq!(result.confidence, 0.15);

        assert_eq!(clauses(&translate("issues I reported")), vec!["reporter = currentUser()", "text ~ \"issues\""]);
    }

    #[test]
    fn test_date_phrases() {
        let cases = [
            ("오늘", "created >= startOfDay()"),
            ("today", "created >= startOfDay()"),
            ("이번 주", "created >= startOfWeek()"),
            ("이번달", "created >= startOfMonth()"),
            ("지난 주", "created >= -7d"),
            ("지난 달", "created >= -30d"),
            ("3일 이내", "created >= -3d"),
            ("last 14 days", "created >= -14d"),
            ("최근 30일 동안", "created >= -30d"),
        ];
        for (input, expected) in cases {
            assert_eq!(clauses(&translate(input)), vec![expected], "input: {input}");
        }
    }

    #[test]
    fn test_day_count_beyond_u32_stays_a_date() {
        let result = translate("최근 99999999999일");
        assert_eq!(clauses(&result), vec!["created >= -99999999999d"]);
        assert_eq!(result.parts[0].kind, PartKind::Date);
        assert_eq!(result.confidence, 0.15);
    }

    #[test]
    fn test_free_text_is_quoted_and_escaped() {
        let result = translate("로그인 \"timeout\" 오류");
        assert_eq!(
            result.parts[0].translated_clause,
            "text ~ \"로그인 \\\"timeout\\\" 오류\""
        );
        assert_eq!(result.confidence, 0.1);
    }

    #[test]
    fn test_free_text_collapses_separators() {
        assert_eq!(clean_free_text("  결제,, 실패..  재시도 "), "결제 실패 재시도");
        assert_eq!(clean_free_text("로그인 이슈 찾아"), "로그인");
    }

    #[test]
    fn test_filler_removal_is_exact_word_only() {
        let result = translate("로그인 검색해줘");
        assert_eq!(clauses(&result), vec!["text ~ \"로그인 해줘\""]);
        assert_eq!(clean_free_text("결제 찾아줘"), "결제 줘");
    }

    #[test]
    fn test_single_char_leftover_dropped() {
        assert!(translate("a").parts.is_empty());
        assert_eq!(translate("ab").parts[0].translated_clause, "text ~ \"ab\"");
    }

    #[test]
    fn test_full_query_confidence_clamped() {
        let result = translate_with_projects(
            "PROJ 진행중 긴급 버그 내 이슈 내가 만든 최근 7일 결제 오류",
            &["PROJ"],
        );
        assert_eq!(result.parts.len(), 8);
        assert_eq!(result.confidence, 1.0);
        assert!(result.query.ends_with(ORDER_BY_CLAUSE));
    }

    #[test]
    fn test_translate_is_deterministic() {
        let input = "PROJ 진행중인 버그 최근 7일";
        assert_eq!(translate(input), translate(input));
    }

    #[test]
    fn test_stage_order_matches_part_order() {
        let result = translate("최근 7일 내 이슈 버그 긴급 완료 ABC");
        let kinds: Vec<PartKind> = result.parts.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PartKind::Project,
                PartKind::Status,
                PartKind::Priority,
                PartKind::IssueType,
                PartKind::Assignee,
                PartKind::Date,
            ]
        );
    }
}
