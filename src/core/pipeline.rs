use crate::core::case_transform::convert;
use crate::core::date_diff::compute_difference;
use crate::core::{BatchResult, ConfigProvider, Job, JobKind, Pipeline, Storage};
use crate::domain::model::{CaseMode, JobOutcome, JobSpec, JobStatus, JobType};
use crate::utils::error::{Result, ToolError};
use crate::utils::validation::{parse_date, validate_required_field};
use chrono::NaiveDate;
use std::collections::HashSet;

pub const JSON_REPORT: &str = "report.json";
pub const CSV_REPORT: &str = "report.csv";

/// Runs batch jobs: inputs are read from `inputs`, results written to `outputs`.
pub struct BatchPipeline<S: Storage, C: ConfigProvider> {
    inputs: S,
    outputs: S,
    config: C,
    today: NaiveDate,
}

impl<S: Storage, C: ConfigProvider> BatchPipeline<S, C> {
    pub fn new(inputs: S, outputs: S, config: C) -> Self {
        Self {
            inputs,
            outputs,
            config,
            today: chrono::Local::now().date_naive(),
        }
    }

    /// Fixes the date used for age jobs without a `target`.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    async fn resolve_job(&self, spec: &JobSpec) -> Result<Job> {
        let kind = match spec.kind {
            JobType::Age => {
                let field = format!("{}.start", spec.name);
                let start = parse_date(&field, validate_required_field(&field, &spec.start)?)?;
                let target = match &spec.target {
                    Some(target) => parse_date(&format!("{}.target", spec.name), target)?,
                    None => self.today,
                };
                JobKind::Age { start, target }
            }
            JobType::Case => {
                let field = format!("{}.mode", spec.name);
                let mode_name = validate_required_field(&field, &spec.mode)?;
                let mode = match mode_name.parse::<CaseMode>() {
                    Ok(mode) => Some(mode),
                    Err(e) if self.config.lenient_modes() => {
                        tracing::warn!("Job '{}': {}; text will be left unchanged", spec.name, e);
                        None
                    }
                    Err(e) => {
                        return Err(ToolError::InvalidConfigValueError {
                            field,
                            value: mode_name.clone(),
                            reason: e.to_string(),
                        })
                    }
                };

                let text = match (&spec.text, &spec.input) {
                    (Some(text), _) => text.clone(),
                    (None, Some(input)) => {
                        let bytes = self.inputs.read_file(input).await?;
                        String::from_utf8(bytes).map_err(|e| ToolError::ProcessingError {
                            message: format!("{} is not valid UTF-8: {}", input, e),
                        })?
                    }
                    (None, None) => {
                        return Err(ToolError::ConfigError {
                            message: format!("case job '{}' has no text or input", spec.name),
                        })
                    }
                };

                JobKind::Case {
                    mode,
                    options: spec.case_options(self.config.case_defaults()),
                    text,
                }
            }
        };

        Ok(Job {
            name: spec.name.clone(),
            kind,
        })
    }
}

/// Runs one job. Engine errors become a failed outcome, never an `Err`.
pub fn run_job(job: &Job) -> Result<JobOutcome> {
    let (status, summary, output, text_output) = match &job.kind {
        JobKind::Age { start, target } => match compute_difference(*start, *target) {
            Ok(diff) => (
                JobStatus::Ok,
                format!("{} ({} days)", diff.short_label(), diff.total_days),
                Some(serde_json::to_value(&diff)?),
                None,
            ),
            Err(e) => {
                tracing::warn!("Job '{}' failed: {}", job.name, e);
                (JobStatus::Failed(e.to_string()), String::new(), None, None)
            }
        },
        JobKind::Case {
            mode: Some(mode),
            options,
            text,
        } => {
            let result = convert(text, *mode, options);
            let summary = format!(
                "{}: {} -> {} chars",
                mode, result.input_length, result.output_length
            );
            let converted = result.converted_text.clone();
            (
                JobStatus::Ok,
                summary,
                Some(serde_json::to_value(&result)?),
                Some(converted),
            )
        }
        JobKind::Case {
            mode: None, text, ..
        } => (
            JobStatus::Ok,
            "unknown mode, text left unchanged".to_string(),
            None,
            Some(text.clone()),
        ),
    };

    Ok(JobOutcome {
        name: job.name.clone(),
        kind: job.kind.label().to_string(),
        status,
        summary,
        output,
        text_output,
    })
}

pub fn render_csv_report(outcomes: &[JobOutcome]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["name", "kind", "status", "summary", "message"])?;

    for outcome in outcomes {
        let (status, message) = match &outcome.status {
            JobStatus::Ok => ("ok", ""),
            JobStatus::Failed(message) => ("failed", message.as_str()),
        };
        writer.write_record([
            outcome.name.as_str(),
            outcome.kind.as_str(),
            status,
            outcome.summary.as_str(),
            message,
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ToolError::ProcessingError {
            message: format!("Failed to finish CSV report: {}", e),
        })?;
    String::from_utf8(bytes).map_err(|e| ToolError::ProcessingError {
        message: format!("CSV report is not valid UTF-8: {}", e),
    })
}

/// 工作名稱轉成安全的檔名
pub fn output_file_name(job_name: &str) -> String {
    let stem: String = job_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim_start_matches('.');
    if stem.is_empty() {
        "job.txt".to_string()
    } else {
        format!("{}.txt", stem)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for BatchPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Job>> {
        let specs = self.config.job_specs();
        let mut jobs = Vec::with_capacity(specs.len());

        for spec in specs {
            tracing::debug!("Resolving job '{}' ({:?})", spec.name, spec.kind);
            jobs.push(self.resolve_job(spec).await?);
        }

        Ok(jobs)
    }

    async fn transform(&self, jobs: Vec<Job>) -> Result<BatchResult> {
        let outcomes = jobs.iter().map(run_job).collect::<Result<Vec<_>>>()?;

        let json_report = serde_json::to_string_pretty(&outcomes)?;
        let csv_report = render_csv_report(&outcomes)?;

        Ok(BatchResult {
            outcomes,
            json_report,
            csv_report,
        })
    }

    async fn load(&self, result: BatchResult) -> Result<String> {
        let mut written = HashSet::new();
        for outcome in &result.outcomes {
            if let Some(text) = &outcome.text_output {
                let file_name = output_file_name(&outcome.name);
                if !written.insert(file_name.clone()) {
                    return Err(ToolError::ProcessingError {
                        message: format!(
                            "Job '{}' would overwrite {} written by an earlier job",
                            outcome.name, file_name
                        ),
                    });
                }
                self.outputs.write_file(&file_name, text.as_bytes()).await?;
            }
        }

        for format in self.config.output_formats() {
            match format.as_str() {
                "json" => {
                    self.outputs
                        .write_file(JSON_REPORT, result.json_report.as_bytes())
                        .await?
                }
                "csv" => {
                    self.outputs
                        .write_file(CSV_REPORT, result.csv_report.as_bytes())
                        .await?
                }
                other => tracing::warn!("Skipping unsupported output format '{}'", other),
            }
        }

        Ok(self.config.output_path().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CaseOptions;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockStorage {
        files: Mutex<HashMap<String, Vec<u8>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, data: &str) -> Self {
            let storage = Self::default();
            storage
                .files
                .lock()
                .unwrap()
                .insert(path.to_string(), data.as_bytes().to_vec());
            storage
        }

        fn get(&self, path: &str) -> Option<String> {
            self.files
                .lock()
                .unwrap()
                .get(path)
                .map(|data| String::from_utf8(data.clone()).unwrap())
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.lock().unwrap().get(path).cloned().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::NotFound, path.to_string()).into()
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct TestConfig {
        jobs: Vec<JobSpec>,
        formats: Vec<String>,
        lenient: bool,
    }

    impl ConfigProvider for TestConfig {
        fn output_path(&self) -> &str {
            "memory"
        }

        fn output_formats(&self) -> &[String] {
            &self.formats
        }

        fn job_specs(&self) -> &[JobSpec] {
            &self.jobs
        }

        fn case_defaults(&self) -> CaseOptions {
            CaseOptions::default()
        }

        fn lenient_modes(&self) -> bool {
            self.lenient
        }
    }

    fn spec(name: &str, kind: JobType) -> JobSpec {
        JobSpec {
            name: name.to_string(),
            kind,
            start: None,
            target: None,
            mode: None,
            text: None,
            input: None,
            preserve_line_breaks: None,
            collapse_whitespace: None,
            dedupe_lines: None,
            skip_articles: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_extract_reads_input_and_defaults_target() {
        let mut age = spec("age", JobType::Age);
        age.start = Some("2000-01-01".to_string());
        let mut case = spec("case", JobType::Case);
        case.mode = Some("kebab".to_string());
        case.input = Some("in.txt".to_string());

        let config = TestConfig {
            jobs: vec![age, case],
            formats: vec!["json".to_string()],
            lenient: false,
        };
        let pipeline = BatchPipeline::new(
            MockStorage::with_file("in.txt", "Hello, World!"),
            MockStorage::default(),
            config,
        )
        .with_today(date(2024, 6, 1));

        let jobs = pipeline.extract().await.unwrap();
        assert_eq!(
            jobs[0].kind,
            JobKind::Age {
                start: date(2000, 1, 1),
                target: date(2024, 6, 1)
            }
        );
        match &jobs[1].kind {
            JobKind::Case { mode, text, .. } => {
                assert_eq!(*mode, Some(CaseMode::Kebab));
                assert_eq!(text, "Hello, World!");
            }
            other => panic!("unexpected job kind: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_extract_rejects_unknown_mode_when_strict() {
        let mut case = spec("case", JobType::Case);
        case.mode = Some("shouting".to_string());
        case.text = Some("hi".to_string());

        let config = TestConfig {
            jobs: vec![case],
            formats: vec![],
            lenient: false,
        };
        let pipeline = BatchPipeline::new(MockStorage::default(), MockStorage::default(), config);

        assert!(matches!(
            pipeline.extract().await,
            Err(ToolError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_invalid_range_becomes_failed_outcome() {
        let job = Job {
            name: "backwards".to_string(),
            kind: JobKind::Age {
                start: date(2024, 1, 2),
                target: date(2024, 1, 1),
            },
        };

        let outcome = run_job(&job).unwrap();
        assert!(!outcome.is_ok());
        assert!(outcome.output.is_none());
        assert_eq!(
            outcome.status,
            JobStatus::Failed("Start date 2024-01-02 is after target date 2024-01-01".to_string())
        );
    }

    #[test]
    fn test_unknown_mode_outcome_is_identity() {
        let job = Job {
            name: "raw".to_string(),
            kind: JobKind::Case {
                mode: None,
                options: CaseOptions::default(),
                text: "Leave Me".to_string(),
            },
        };

        let outcome = run_job(&job).unwrap();
        assert!(outcome.is_ok());
        assert_eq!(outcome.text_output.as_deref(), Some("Leave Me"));
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("headline"), "headline.txt");
        assert_eq!(output_file_name("../etc/passwd"), "_etc_passwd.txt");
        assert_eq!(output_file_name("my job"), "my_job.txt");
        assert_eq!(output_file_name(""), "job.txt");
    }

    #[tokio::test]
    async fn test_load_refuses_to_overwrite_text_output() {
        let mut first = spec("my job", JobType::Case);
        first.mode = Some("upper".to_string());
        first.text = Some("first".to_string());
        let mut second = spec("my_job", JobType::Case);
        second.mode = Some("upper".to_string());
        second.text = Some("second".to_string());

        let config = TestConfig {
            jobs: vec![first, second],
            formats: vec!["json".to_string()],
            lenient: false,
        };
        let pipeline = BatchPipeline::new(MockStorage::default(), MockStorage::default(), config);

        let jobs = pipeline.extract().await.unwrap();
        let result = pipeline.transform(jobs).await.unwrap();
        assert!(matches!(
            pipeline.load(result).await,
            Err(ToolError::ProcessingError { .. })
        ));
        assert_eq!(pipeline.outputs.get("my_job.txt").as_deref(), Some("FIRST"));
        assert!(pipeline.outputs.get(JSON_REPORT).is_none());
    }

    #[tokio::test]
    async fn test_load_writes_text_and_reports() {
        let mut case = spec("shout", JobType::Case);
        case.mode = Some("upper".to_string());
        case.text = Some("hi there".to_string());

        let config = TestConfig {
            jobs: vec![case],
            formats: vec!["json".to_string(), "csv".to_string()],
            lenient: false,
        };
        let pipeline = BatchPipeline::new(MockStorage::default(), MockStorage::default(), config);

        let jobs = pipeline.extract().await.unwrap();
        let result = pipeline.transform(jobs).await.unwrap();
        let output_path = pipeline.load(result).await.unwrap();

        assert_eq!(output_path, "memory");
        assert_eq!(pipeline.outputs.get("shout.txt").as_deref(), Some("HI THERE"));

        let csv = pipeline.outputs.get(CSV_REPORT).unwrap();
        assert!(csv.starts_with("name,kind,status,summary,message\n"));
        assert!(csv.contains("shout,case,ok,upper: 8 -> 8 chars,"));

        let json: serde_json::Value =
            serde_json::from_str(&pipeline.outputs.get(JSON_REPORT).unwrap()).unwrap();
        assert_eq!(json[0]["status"], "ok");
        assert_eq!(json[0]["output"]["converted_text"], "HI THERE");
    }
}
