// crates/core/src/vocab.rs
//! Fixed vocabulary recognized by the translator.
//!
//! Every table is an ordered slice and is scanned front to back. The first
//! entry that hits wins for its whole category, so longer phrases that
//! contain a shorter one (`highest` vs `high`, `sub-task` vs `task`) must be
//! listed first.

/// A synonym phrase normalized to a tracker-defined canonical label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Synonym {
    pub phrase: &'static str,
    pub canonical: &'static str,
}

const fn syn(phrase: &'static str, canonical: &'static str) -> Synonym {
    Synonym { phrase, canonical }
}

/// Status synonyms. Canonical values: Backlog, To Do, In Progress, In Review, Done.
pub const STATUS_SYNONYMS: &[Synonym] = &[
    syn("백로그", "Backlog"),
    syn("backlog", "Backlog"),
    syn("할 일", "To Do"),
    syn("할일", "To Do"),
    syn("to do", "To Do"),
    syn("todo", "To Do"),
    syn("진행중", "In Progress"),
    syn("진행 중", "In Progress"),
    syn("작업중", "In Progress"),
    syn("작업 중", "In Progress"),
    syn("in progress", "In Progress"),
    syn("리뷰중", "In Review"),
    syn("리뷰 중", "In Review"),
    syn("검토중", "In Review"),
    syn("검토 중", "In Review"),
    syn("in review", "In Review"),
    syn("review", "In Review"),
    syn("완료", "Done"),
    syn("해결됨", "Done"),
    syn("done", "Done"),
    syn("closed", "Done"),
];

/// Priority synonyms. Canonical values: Highest, High, Medium, Low, Lowest.
pub const PRIORITY_SYNONYMS: &[Synonym] = &[
    syn("긴급", "Highest"),
    syn("최우선", "Highest"),
    syn("highest", "Highest"),
    syn("critical", "Highest"),
    syn("blocker", "Highest"),
    syn("최저", "Lowest"),
    syn("lowest", "Lowest"),
    syn("높은", "High"),
    syn("높음", "High"),
    syn("중요", "High"),
    syn("high", "High"),
    syn("보통", "Medium"),
    syn("중간", "Medium"),
    syn("medium", "Medium"),
    syn("낮은", "Low"),
    syn("낮음", "Low"),
    syn("low", "Low"),
];

/// Issue type synonyms. Canonical values: Bug, Story, Task, Epic, Sub-task.
pub const ISSUE_TYPE_SYNONYMS: &[Synonym] = &[
    syn("서브태스크", "Sub-task"),
    syn("하위 작업", "Sub-task"),
    syn("하위작업", "Sub-task"),
    syn("sub-task", "Sub-task"),
    syn("subtask", "Sub-task"),
    syn("버그", "Bug"),
    syn("결함", "Bug"),
    syn("bug", "Bug"),
    syn("스토리", "Story"),
    syn("story", "Story"),
    syn("태스크", "Task"),
    syn("task", "Task"),
    syn("에픽", "Epic"),
    syn("epic", "Epic"),
];

/// A regex pattern paired with the JQL clause it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternRule {
    pub pattern: &'static str,
    pub clause: &'static str,
}

const fn rule(pattern: &'static str, clause: &'static str) -> PatternRule {
    PatternRule { pattern, clause }
}

pub const ASSIGNED_TO_ME: &str = "assignee = currentUser()";
pub const UNASSIGNED: &str = "assignee is EMPTY";
pub const REPORTED_BY_ME: &str = "reporter = currentUser()";

/// Assignee phrases, evaluated in order.
pub const ASSIGNEE_RULES: &[PatternRule] = &[
    rule(r"내\s*이슈", ASSIGNED_TO_ME),
    rule(r"(내게|나한테|나에게)\s*할당", ASSIGNED_TO_ME),
    rule(r"미할당|할당\s*안\s*된", UNASSIGNED),
    rule(r"(?i)\bunassigned\b", UNASSIGNED),
    rule(r"(?i)\bassigned\s+to\s+me\b", ASSIGNED_TO_ME),
    rule(r"(?i)\bmy\s+issues?\b", ASSIGNED_TO_ME),
];

/// Reporter phrases, evaluated in order.
pub const REPORTER_RULES: &[PatternRule] = &[
    rule(r"내가\s*(만든|생성한|생성|등록한|등록)", REPORTED_BY_ME),
    rule(r"내가\s*보고한", REPORTED_BY_ME),
    rule(r"(?i)\bI\s+(created|reported)\b", REPORTED_BY_ME),
    rule(r"(?i)\b(created|reported)\s+by\s+me\b", REPORTED_BY_ME),
];

/// How a matched date phrase becomes a `created >=` bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    /// A fixed JQL expression such as `startOfWeek()` or `-7d`.
    Fixed(&'static str),
    /// The first capture group holds N; the bound is `-Nd`.
    LastDays,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRule {
    pub pattern: &'static str,
    pub bound: DateBound,
}

const fn date(pattern: &'static str, bound: DateBound) -> DateRule {
    DateRule { pattern, bound }
}

/// Relative date phrases, evaluated in order.
pub const DATE_RULES: &[DateRule] = &[
    date(r"최근\s*(\d+)\s*일(\s*(이내|동안|간))?", DateBound::LastDays),
    date(r"(\d+)\s*일\s*이내", DateBound::LastDays),
    date(r"(?i)\b(?:in\s+the\s+)?last\s+(\d+)\s+days?\b", DateBound::LastDays),
    date(r"오늘|(?i:\btoday\b)", DateBound::Fixed("startOfDay()")),
    date(r"이번\s*주|(?i:\bthis\s+week\b)", DateBound::Fixed("startOfWeek()")),
    date(r"이번\s*달|(?i:\bthis\s+month\b)", DateBound::Fixed("startOfMonth()")),
    date(r"지난\s*주|(?i:\blast\s+week\b)", DateBound::Fixed("-7d")),
    date(r"지난\s*달|(?i:\blast\s+month\b)", DateBound::Fixed("-30d")),
];

/// Filler words dropped before the free-text fallback.
///
/// Only these exact words are removed, so "검색해줘" leaves "해줘" behind.
pub const FILLER_WORDS: &[&str] = &["보여줘", "검색", "찾아", "이슈", "조회"];

/// Example queries offered when nothing in the input was recognized.
pub const SUGGESTIONS: [&str; 3] = [
    "내 이슈 보여줘",
    "PROJ 진행중인 버그",
    "최근 7일 동안 내가 만든 이슈",
];

/// Deterministic ordering clause appended to every query.
pub const ORDER_BY_CLAUSE: &str = "ORDER BY updated DESC";
