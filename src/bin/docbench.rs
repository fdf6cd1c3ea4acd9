//! docbench CLI binary entry point.
//!
//! ## Usage
//!
//! ```bash
//! # Clone the configured projects
//! docbench collect
//!
//! # Extract and strip docstrings, write the corpus
//! docbench build --offline
//!
//! # Look at the docstrings of one file without touching it
//! docbench extract src/pkg/module.py
//!
//! # Score a summary document against the corpus
//! docbench compare --corpus data/symbol_docstrings.json \
//!     --summary result/summary.md --output result/matches.json
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use docbench::cli::{run_build, run_collect, run_compare, run_extract, BuildArgs, CompareArgs};
use docbench::compare::{render_details, render_report};
use docbench::config::Config;
use docbench::error::{DocbenchError, OutputErrorCode};
use docbench::output::{emit_response, CompareResponse, ErrorResponse};

// ============================================================================
// CLI Structure
// ============================================================================

/// Build docstring benchmark corpora from Python projects.
#[derive(Parser, Debug)]
#[command(name = "docbench", version, about = "Docstring benchmark corpus builder")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

/// Global arguments shared by all subcommands.
#[derive(Parser, Debug)]
struct GlobalArgs {
    /// Configuration file (default: ./docbench.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level for tracing output.
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Output format for the compare report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    /// Human-readable text summary (default).
    #[default]
    Text,
    /// JSON response.
    Json,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Clone the configured projects (existing directories are skipped).
    Collect,
    /// Extract and strip docstrings, then write the corpus.
    Build {
        /// Skip cloning; process projects already on disk.
        #[arg(long)]
        offline: bool,
        /// Process this directory instead of the configured projects.
        /// Can be given multiple times.
        #[arg(long = "project", value_name = "DIR")]
        projects: Vec<PathBuf>,
        /// Extract without rewriting any source file.
        #[arg(long)]
        dry_run: bool,
        /// Corpus output path (overrides build.corpus_output).
        #[arg(long, value_name = "FILE")]
        corpus_output: Option<PathBuf>,
    },
    /// Print the docstrings of a file or directory as JSON.
    Extract {
        /// Python file or directory.
        path: PathBuf,
        /// Directory qualified names are relative to.
        #[arg(long)]
        base: Option<PathBuf>,
    },
    /// Match a summary document against the corpus.
    Compare {
        /// Corpus JSON file.
        #[arg(long)]
        corpus: Option<PathBuf>,
        /// Summary markdown document.
        #[arg(long)]
        summary: Option<PathBuf>,
        /// Where to write the detailed match results.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Only match corpus symbols containing this substring.
        #[arg(long)]
        corpus_filter: Option<String>,
        /// Prefix for summary keys.
        #[arg(long)]
        key_prefix: Option<String>,
        /// Insert the section stem into summary keys.
        #[arg(long)]
        include_section: bool,
        /// Number of top-scoring pairs to report.
        #[arg(long)]
        top_k: Option<usize>,
        /// Print every match result before the text report.
        #[arg(long)]
        details: bool,
        /// Output format.
        #[arg(long, value_enum, default_value = "text")]
        format: ReportFormat,
    },
}

// ============================================================================
// Entry point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.global.log_level, cli.global.log_json);

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Errors go to stdout as JSON, like every other response
            let error_code = OutputErrorCode::from(&err);
            let response = ErrorResponse::from_error(&err);
            let _ = emit_response(&response, &mut io::stdout());
            let _ = io::stdout().flush();
            ExitCode::from(error_code.code())
        }
    }
}

/// Initialize tracing subscriber.
fn init_tracing(level: LogLevel, json: bool) {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Execute the CLI command.
fn execute(cli: Cli) -> Result<(), DocbenchError> {
    let cwd = std::env::current_dir()
        .map_err(|e| DocbenchError::internal(format!("failed to get current directory: {}", e)))?;
    let config = Config::resolve(cli.global.config.as_deref(), &cwd)?;

    match cli.command {
        Command::Collect => emit(&run_collect(&config)?),
        Command::Build {
            offline,
            projects,
            dry_run,
            corpus_output,
        } => {
            let args = BuildArgs {
                offline,
                projects,
                dry_run,
                corpus_output,
            };
            emit(&run_build(&config, &args)?)
        }
        Command::Extract { path, base } => emit(&run_extract(&path, base.as_deref())?),
        Command::Compare {
            corpus,
            summary,
            output,
            corpus_filter,
            key_prefix,
            include_section,
            top_k,
            details,
            format,
        } => {
            let args = CompareArgs {
                corpus,
                summary,
                output,
                corpus_filter,
                key_prefix,
                include_section,
                top_k,
            };
            let (options, outcome) = run_compare(&config, &args)?;
            match format {
                ReportFormat::Json => emit(&CompareResponse::new(
                    options.output.display().to_string(),
                    outcome.statistics,
                )),
                ReportFormat::Text => {
                    let mut text = String::new();
                    if details {
                        text.push_str(&render_details(&outcome.results));
                    }
                    text.push_str(&render_report(&outcome, &options.output));
                    io::stdout()
                        .write_all(text.as_bytes())
                        .map_err(|e| DocbenchError::output_write("<stdout>", e))
                }
            }
        }
    }
}

fn emit<T: serde::Serialize>(response: &T) -> Result<(), DocbenchError> {
    emit_response(response, &mut io::stdout())
        .map_err(|e| DocbenchError::output_write("<stdout>", e))
}
