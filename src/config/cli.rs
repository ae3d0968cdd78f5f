use crate::domain::model::{CaseMode, CaseOptions, UnknownCaseMode};
use crate::utils::error::{Result, ToolError};
use crate::utils::validation::{self, Validate};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "small-tools")]
#[command(about = "Date difference and text case utilities", version)]
pub struct CliConfig {
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Years, months and days between two dates
    Age(AgeArgs),
    /// Convert text between cases
    Case(CaseArgs),
    /// Run the jobs listed in a TOML batch file
    Batch(BatchArgs),
}

#[derive(Debug, Clone, Args)]
pub struct AgeArgs {
    /// Start date (date of birth), YYYY-MM-DD
    #[arg(long)]
    pub start: String,

    /// Target date, YYYY-MM-DD. Defaults to today
    #[arg(long)]
    pub target: Option<String>,

    /// Reject start dates more than this many years before the target
    #[arg(long, default_value = "150")]
    pub max_years: u32,

    #[arg(long, help = "Print the result as JSON")]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct CaseArgs {
    /// upper, lower, title, sentence, capitalize, inverse, alternating,
    /// snake, kebab, camel, pascal or dot
    #[arg(short, long, default_value = "upper")]
    pub mode: String,

    /// Text to convert
    #[arg(short, long, conflicts_with = "input")]
    pub text: Option<String>,

    /// Read text from a file; stdin is used when neither --text nor --input is given
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    #[arg(long, help = "Convert the whole text at once instead of line by line")]
    pub no_preserve_line_breaks: bool,

    #[arg(long, help = "Replace whitespace runs with a single space and trim")]
    pub collapse_whitespace: bool,

    #[arg(long, help = "Drop repeated lines, keeping the first")]
    pub dedupe_lines: bool,

    #[arg(long, help = "Keep articles and short conjunctions lowercase in title case")]
    pub skip_articles: bool,

    #[arg(long, help = "Print character, word and line counts")]
    pub stats: bool,

    #[arg(long, help = "Print the result as JSON")]
    pub json: bool,
}

impl CaseArgs {
    pub fn options(&self) -> CaseOptions {
        CaseOptions {
            preserve_line_breaks: !self.no_preserve_line_breaks,
            collapse_whitespace: self.collapse_whitespace,
            dedupe_lines: self.dedupe_lines,
            skip_articles: self.skip_articles,
        }
    }

    pub fn case_mode(&self) -> Result<CaseMode> {
        self.mode
            .parse()
            .map_err(|e: UnknownCaseMode| ToolError::InvalidConfigValueError {
                field: "mode".to_string(),
                value: self.mode.clone(),
                reason: e.to_string(),
            })
    }
}

#[derive(Debug, Clone, Args)]
pub struct BatchArgs {
    /// Path to the TOML batch file
    #[arg(short, long, default_value = "small-tools.toml")]
    pub config: String,

    /// Override output.path from the batch file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Show what would run without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Age(args) => {
                validation::parse_date("start", &args.start)?;
                if let Some(target) = &args.target {
                    validation::parse_date("target", target)?;
                }
                if args.max_years == 0 {
                    return Err(ToolError::ValidationError {
                        message: "--max-years must be at least 1".to_string(),
                    });
                }
                Ok(())
            }
            Command::Case(args) => {
                args.case_mode()?;
                if let Some(input) = &args.input {
                    validation::validate_path("input", &input.to_string_lossy())?;
                }
                Ok(())
            }
            Command::Batch(args) => {
                validation::validate_path("config", &args.config)?;
                if let Some(output) = &args.output {
                    validation::validate_path("output", output)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_command() {
        let config = CliConfig::parse_from([
            "small-tools",
            "case",
            "--mode",
            "Title",
            "--text",
            "hello world",
            "--skip-articles",
            "--no-preserve-line-breaks",
        ]);

        let Command::Case(args) = &config.command else {
            panic!("expected case command");
        };
        assert_eq!(args.case_mode().unwrap(), CaseMode::Title);
        let options = args.options();
        assert!(options.skip_articles);
        assert!(!options.preserve_line_breaks);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_mode_fails_validation() {
        let config = CliConfig::parse_from(["small-tools", "case", "--mode", "yelling"]);
        assert!(matches!(
            config.validate(),
            Err(ToolError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_age_command_validates_dates() {
        let config = CliConfig::parse_from(["small-tools", "age", "--start", "2000-02-29"]);
        assert!(config.validate().is_ok());

        let config = CliConfig::parse_from(["small-tools", "age", "--start", "29/02/2000"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_text_and_input_conflict() {
        let result = CliConfig::try_parse_from([
            "small-tools",
            "case",
            "--text",
            "a",
            "--input",
            "a.txt",
        ]);
        assert!(result.is_err());
    }
}
