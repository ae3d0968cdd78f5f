use clap::Parser;
use small_tools::config::cli::{AgeArgs, BatchArgs, CaseArgs, Command};
use small_tools::core::case_transform::convert;
use small_tools::core::date_diff::{compute_difference, format_display_date};
use small_tools::core::Pipeline;
use small_tools::domain::model::JobKind;
use small_tools::utils::error::{ErrorSeverity, Result, ToolError};
use small_tools::utils::logger;
use small_tools::utils::validation::{self, Validate};
use small_tools::{BatchConfig, BatchEngine, BatchPipeline, CliConfig, LocalStorage};
use tokio::io::AsyncReadExt;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Input validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let result = match &config.command {
        Command::Age(args) => run_age(args),
        Command::Case(args) => run_case(args).await,
        Command::Batch(args) => run_batch(args).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

fn run_age(args: &AgeArgs) -> Result<()> {
    let start = validation::parse_date("start", &args.start)?;
    let target = match &args.target {
        Some(target) => validation::parse_date("target", target)?,
        None => chrono::Local::now().date_naive(),
    };
    validation::validate_date_window("start", start, target, args.max_years)?;

    let diff = compute_difference(start, target)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&diff)?);
        return Ok(());
    }

    println!("{}", diff.age_statement());
    println!(
        "Age:              {} years, {} months, {} days",
        diff.years, diff.months, diff.days
    );
    println!("Total days:       {}", diff.total_days);
    println!("Total weeks:      {}", diff.weeks_label());
    println!("Total months:     {}", diff.total_months);
    println!(
        "Next anniversary: {} (in {} days)",
        format_display_date(diff.next_anniversary),
        diff.days_until_next_anniversary
    );
    Ok(())
}

async fn run_case(args: &CaseArgs) -> Result<()> {
    let mode = args.case_mode()?;
    let text = match (&args.text, &args.input) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => tokio::fs::read_to_string(path).await?,
        (None, None) => {
            let mut buffer = String::new();
            tokio::io::stdin().read_to_string(&mut buffer).await?;
            buffer
        }
    };

    let result = convert(&text, mode, &args.options());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", result.converted_text);
    if args.stats {
        let stats = result.input_stats;
        eprintln!(
            "Characters: {}  Words: {}  Lines: {}  Output characters: {}",
            stats.characters, stats.words, stats.lines, result.output_length
        );
    }
    Ok(())
}

async fn run_batch(args: &BatchArgs) -> Result<()> {
    tracing::info!("📁 Loading batch file from: {}", args.config);
    let mut config = BatchConfig::from_file(&args.config)?;

    // 應用命令列覆蓋設定
    if let Some(output) = &args.output {
        config.output.path = output.clone();
        tracing::info!("🔧 Output path overridden to: {}", output);
    }

    config.validate()?;
    tracing::info!(
        "✅ Batch '{}' loaded: {} jobs, formats [{}]",
        config.batch.name,
        config.jobs.len(),
        config.output.formats.join(", ")
    );

    let inputs = LocalStorage::new(config.base_dir());
    let outputs = LocalStorage::new(config.output.path.clone());
    let pipeline = BatchPipeline::new(inputs, outputs, config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        for job in pipeline.extract().await? {
            match &job.kind {
                JobKind::Age { start, target } => println!(
                    "age   {}: {} -> {}",
                    job.name,
                    format_display_date(*start),
                    format_display_date(*target)
                ),
                JobKind::Case { mode, text, .. } => println!(
                    "case  {}: {} ({} chars)",
                    job.name,
                    mode.map(|m| m.as_str()).unwrap_or("unchanged"),
                    text.chars().count()
                ),
            }
        }
        return Ok(());
    }

    let engine = BatchEngine::new(pipeline);
    let summary = engine.run().await?;

    println!("✅ Batch completed: {} jobs", summary.jobs);
    println!("📁 Output saved to: {}", summary.output_path);

    if summary.failed > 0 {
        return Err(ToolError::ValidationError {
            message: format!(
                "{} of {} jobs failed; see the report for details",
                summary.failed, summary.jobs
            ),
        });
    }
    Ok(())
}
