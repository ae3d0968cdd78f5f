use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Start date {start} is after target date {target}")]
    InvalidRange { start: NaiveDate, target: NaiveDate },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Io,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ToolError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ToolError::InvalidRange { .. } | ToolError::ValidationError { .. } => {
                ErrorCategory::Input
            }
            ToolError::ConfigError { .. }
            | ToolError::ConfigValidationError { .. }
            | ToolError::MissingConfigError { .. }
            | ToolError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ToolError::IoError(_) => ErrorCategory::Io,
            ToolError::SerializationError(_)
            | ToolError::CsvError(_)
            | ToolError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ToolError::InvalidRange { .. } => {
                "Swap the two dates, or pick a target date on or after the start date"
            }
            ToolError::ValidationError { .. } | ToolError::InvalidConfigValueError { .. } => {
                "Check the value format (dates are YYYY-MM-DD) and try again"
            }
            ToolError::MissingConfigError { .. } => "Add the missing field to the configuration",
            ToolError::ConfigError { .. } | ToolError::ConfigValidationError { .. } => {
                "Make sure the configuration file exists and is valid TOML"
            }
            ToolError::IoError(_) => "Check file paths and permissions",
            ToolError::SerializationError(_)
            | ToolError::CsvError(_)
            | ToolError::ProcessingError { .. } => "Re-run with --verbose for details",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ToolError::InvalidRange { .. } => {
                "Date of birth cannot be in the future of the target date!".to_string()
            }
            ToolError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            ToolError::MissingConfigError { field } => format!("Please provide {}", field),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ToolError>;
