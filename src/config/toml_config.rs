use crate::core::pipeline::output_file_name;
use crate::domain::model::{CaseMode, CaseOptions, JobSpec, JobType};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, ToolError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

pub const OUTPUT_FORMATS: [&str; 2] = ["json", "csv"];

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    pub batch: BatchSection,
    /// Defaults applied to every case job.
    pub case: Option<CaseOptions>,
    pub output: OutputConfig,
    #[serde(default)]
    pub jobs: Vec<JobSpec>,
    #[serde(skip)]
    base_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSection {
    pub name: String,
    pub description: Option<String>,
    pub lenient_modes: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
}

fn default_formats() -> Vec<String> {
    vec!["json".to_string()]
}

impl BatchConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(config)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        let mut config: BatchConfig =
            toml::from_str(&processed_content).map_err(|e| ToolError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        config.base_dir = PathBuf::from(".");
        Ok(config)
    }

    /// 替換環境變數 (例如 ${OUTPUT_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("batch.name", &self.batch.name)?;
        validation::validate_path("output.path", &self.output.path)?;

        if self.output.formats.is_empty() {
            return Err(ToolError::MissingConfigError {
                field: "output.formats".to_string(),
            });
        }
        for format in &self.output.formats {
            validation::validate_one_of("output.formats", format, &OUTPUT_FORMATS)?;
        }

        // 名稱清理後才比對，避免 "my job" 與 "my_job" 寫到同一個檔案
        let mut file_names = HashSet::new();
        for (index, job) in self.jobs.iter().enumerate() {
            let prefix = format!("jobs[{}]", index);
            validation::validate_non_empty_string(&format!("{}.name", prefix), &job.name)?;
            let file_name = output_file_name(&job.name);
            if !file_names.insert(file_name.clone()) {
                return Err(ToolError::InvalidConfigValueError {
                    field: format!("{}.name", prefix),
                    value: job.name.clone(),
                    reason: format!(
                        "Job names must be unique after conversion to file names ({})",
                        file_name
                    ),
                });
            }

            match job.kind {
                JobType::Age => self.validate_age_job(&prefix, job)?,
                JobType::Case => self.validate_case_job(&prefix, job)?,
            }
        }

        Ok(())
    }

    fn validate_age_job(&self, prefix: &str, job: &JobSpec) -> Result<()> {
        let field = format!("{}.start", prefix);
        let start = validation::validate_required_field(&field, &job.start)?;
        validation::parse_date(&field, start)?;

        if let Some(target) = &job.target {
            validation::parse_date(&format!("{}.target", prefix), target)?;
        }
        Ok(())
    }

    fn validate_case_job(&self, prefix: &str, job: &JobSpec) -> Result<()> {
        let field = format!("{}.mode", prefix);
        let mode = validation::validate_required_field(&field, &job.mode)?;
        if !self.lenient_modes() && mode.parse::<CaseMode>().is_err() {
            validation::validate_one_of(&field, mode, &CaseMode::names())?;
        }

        match (&job.text, &job.input) {
            (Some(_), None) => Ok(()),
            (None, Some(input)) => validation::validate_path(&format!("{}.input", prefix), input),
            _ => Err(ToolError::ConfigValidationError {
                field: prefix.to_string(),
                message: "Case jobs need exactly one of `text` or `input`".to_string(),
            }),
        }
    }

    /// Directory relative `input` paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl ConfigProvider for BatchConfig {
    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }

    fn job_specs(&self) -> &[JobSpec] {
        &self.jobs
    }

    fn case_defaults(&self) -> CaseOptions {
        self.case.unwrap_or_default()
    }

    fn lenient_modes(&self) -> bool {
        self.batch.lenient_modes.unwrap_or(false)
    }
}

impl Validate for BatchConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
