//! CLI entry point for the vacancy report tool.
//!
//! Provides subcommands for rendering the yearly/city spreadsheet from a
//! vacancy CSV export and for logging the computed series without rendering.

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use vacancy_report::config::{
    DEFAULT_OUTPUT, INPUT_ENV, PROFESSION_ENV, resolve_path, resolve_setting,
};
use vacancy_report::output::{ReportRenderer, XlsxRenderer, print_json, print_pretty};
use vacancy_report::report::ReportSummary;
use vacancy_report::{PipelineConfig, analyze};

#[derive(Parser)]
#[command(name = "vacancy_report")]
#[command(about = "Salary and vacancy statistics by year and city", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the two-sheet xlsx report
    Report {
        /// Vacancy CSV export (plain or .gz); falls back to $VACANCY_INPUT, then a prompt
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Profession to break out; falls back to $VACANCY_PROFESSION, then a prompt
        #[arg(short, long)]
        profession: Option<String>,

        /// Spreadsheet to write
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
    },
    /// Log the computed series without writing a spreadsheet
    Summary {
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(short, long)]
        profession: Option<String>,

        /// Emit JSON instead of the debug representation
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_logging()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            input,
            profession,
            output,
        } => {
            let config = pipeline_config(input, profession)?;
            let run = analyze(&config)
                .with_context(|| format!("failed to analyze {}", config.input.display()))?;

            XlsxRenderer.render(&run.bundle, &config.profession, &output)?;
        }
        Commands::Summary {
            input,
            profession,
            json,
        } => {
            let config = pipeline_config(input, profession)?;
            let run = analyze(&config)
                .with_context(|| format!("failed to analyze {}", config.input.display()))?;

            if json {
                print_json(&ReportSummary {
                    generated_at: Utc::now(),
                    profession: &config.profession,
                    total_vacancies: run.total_vacancies,
                    skipped_rows: run.skipped_rows,
                    bundle: &run.bundle,
                })?;
            } else {
                print_pretty(&run.bundle);
            }
        }
    }

    Ok(())
}

/// Logging setup: colored stderr + JSON rolling log file.
///
/// The returned guard flushes the file writer when dropped at the end of `main`.
fn init_logging() -> Result<WorkerGuard> {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/vacancy_report.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("vacancy_report.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(file_guard)
}

/// Resolves the input file and profession from CLI, environment, or an
/// interactive prompt, in that order.
fn pipeline_config(input: Option<PathBuf>, profession: Option<String>) -> Result<PipelineConfig> {
    let input = match resolve_path(input, INPUT_ENV) {
        Some(input) => input,
        None => PathBuf::from(prompt("Введите название файла: ")?),
    };
    let profession = match resolve_setting(profession, PROFESSION_ENV) {
        Some(profession) => profession,
        None => prompt("Введите название профессии: ")?,
    };

    info!(input = %input.display(), profession = %profession, "Pipeline configured");
    Ok(PipelineConfig::new(input, profession))
}

fn prompt(label: &str) -> Result<String> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{label}")?;
    stdout.flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;

    let value = line.trim().to_string();
    if value.is_empty() {
        bail!("no value entered for {:?}", label.trim_end_matches([':', ' ']));
    }
    Ok(value)
}
