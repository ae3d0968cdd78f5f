use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar-aware breakdown of the interval between two dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateDifference {
    pub start: NaiveDate,
    pub target: NaiveDate,
    pub years: i32,
    pub months: i32,
    pub days: i32,
    pub total_days: i64,
    pub total_weeks: i64,
    pub remaining_days: i64,
    pub total_months: i32,
    pub next_anniversary: NaiveDate,
    pub days_until_next_anniversary: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    Upper,
    Lower,
    Title,
    Sentence,
    Capitalize,
    Inverse,
    Alternating,
    Snake,
    Kebab,
    Camel,
    Pascal,
    Dot,
}

impl CaseMode {
    pub const ALL: [CaseMode; 12] = [
        CaseMode::Upper,
        CaseMode::Lower,
        CaseMode::Title,
        CaseMode::Sentence,
        CaseMode::Capitalize,
        CaseMode::Inverse,
        CaseMode::Alternating,
        CaseMode::Snake,
        CaseMode::Kebab,
        CaseMode::Camel,
        CaseMode::Pascal,
        CaseMode::Dot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseMode::Upper => "upper",
            CaseMode::Lower => "lower",
            CaseMode::Title => "title",
            CaseMode::Sentence => "sentence",
            CaseMode::Capitalize => "capitalize",
            CaseMode::Inverse => "inverse",
            CaseMode::Alternating => "alternating",
            CaseMode::Snake => "snake",
            CaseMode::Kebab => "kebab",
            CaseMode::Camel => "camel",
            CaseMode::Pascal => "pascal",
            CaseMode::Dot => "dot",
        }
    }

    pub fn separator(&self) -> Option<char> {
        match self {
            CaseMode::Snake => Some('_'),
            CaseMode::Kebab => Some('-'),
            CaseMode::Dot => Some('.'),
            _ => None,
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|mode| mode.as_str()).collect()
    }
}

impl fmt::Display for CaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCaseMode(pub String);

impl fmt::Display for UnknownCaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown case mode '{}' (expected one of: {})",
            self.0,
            CaseMode::names().join(", ")
        )
    }
}

impl std::error::Error for UnknownCaseMode {}

impl FromStr for CaseMode {
    type Err = UnknownCaseMode;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        CaseMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == wanted)
            .ok_or_else(|| UnknownCaseMode(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseOptions {
    pub preserve_line_breaks: bool,
    pub collapse_whitespace: bool,
    pub dedupe_lines: bool,
    pub skip_articles: bool,
}

impl Default for CaseOptions {
    fn default() -> Self {
        Self {
            preserve_line_breaks: true,
            collapse_whitespace: false,
            dedupe_lines: false,
            skip_articles: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    pub characters: usize,
    pub words: usize,
    pub lines: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseTransformResult {
    pub mode: CaseMode,
    pub converted_text: String,
    pub input_length: usize,
    pub output_length: usize,
    pub input_stats: TextStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    Age,
    Case,
}

/// A job as declared in a batch file, before its input text is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    pub name: String,
    pub kind: JobType,
    pub start: Option<String>,
    /// Defaults to the run date when omitted.
    pub target: Option<String>,
    pub mode: Option<String>,
    pub text: Option<String>,
    /// Path relative to the batch file's directory.
    pub input: Option<String>,
    pub preserve_line_breaks: Option<bool>,
    pub collapse_whitespace: Option<bool>,
    pub dedupe_lines: Option<bool>,
    pub skip_articles: Option<bool>,
}

impl JobSpec {
    /// Per-job overrides layered on top of the batch defaults.
    pub fn case_options(&self, defaults: CaseOptions) -> CaseOptions {
        CaseOptions {
            preserve_line_breaks: self
                .preserve_line_breaks
                .unwrap_or(defaults.preserve_line_breaks),
            collapse_whitespace: self
                .collapse_whitespace
                .unwrap_or(defaults.collapse_whitespace),
            dedupe_lines: self.dedupe_lines.unwrap_or(defaults.dedupe_lines),
            skip_articles: self.skip_articles.unwrap_or(defaults.skip_articles),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobKind {
    Age {
        start: NaiveDate,
        target: NaiveDate,
    },
    Case {
        /// `None` when the configured mode name was not recognised.
        mode: Option<CaseMode>,
        options: CaseOptions,
        text: String,
    },
}

impl JobKind {
    pub fn label(&self) -> &'static str {
        match self {
            JobKind::Age { .. } => "age",
            JobKind::Case { .. } => "case",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub name: String,
    pub kind: JobKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum JobStatus {
    Ok,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobOutcome {
    pub name: String,
    pub kind: String,
    #[serde(flatten)]
    pub status: JobStatus,
    pub summary: String,
    /// 完整計算結果 (age 為 DateDifference, case 為 CaseTransformResult)
    pub output: Option<serde_json::Value>,
    /// Converted text for case jobs, written to its own file on load.
    #[serde(skip)]
    pub text_output: Option<String>,
}

impl JobOutcome {
    pub fn is_ok(&self) -> bool {
        self.status == JobStatus::Ok
    }
}

#[derive(Debug, Clone)]
pub struct BatchResult {
    pub outcomes: Vec<JobOutcome>,
    pub json_report: String,
    pub csv_report: String,
}

impl BatchResult {
    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_ok()).count()
    }
}
