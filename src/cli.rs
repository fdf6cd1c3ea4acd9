//! CLI front door.
//!
//! Each `run_*` function merges configuration with command-line overrides,
//! runs one pipeline and returns the response the binary prints:
//! - `collect` - clone the configured projects
//! - `build` - acquire, extract and strip, save the corpus
//! - `extract` - read-only docstring dump of a file or directory
//! - `compare` - match a summary document against the corpus
//!
//! All functions return `Result<T, DocbenchError>`; the caller turns an error
//! into an error response and exit code.

use std::path::{Path, PathBuf};

use docbench_python::process::ProcessMode;

use crate::acquire::{acquire_projects, available_projects};
use crate::compare::{compare_summary, CompareOptions, CompareOutcome};
use crate::config::Config;
use crate::error::DocbenchError;
use crate::output::{BuildResponse, CollectResponse, ExtractResponse};
use crate::pipeline::{build_and_save, extract_path, ProjectRoot};
use crate::summary::SummaryKeying;

/// Command-line overrides for `build`.
#[derive(Debug, Clone, Default)]
pub struct BuildArgs {
    /// Skip acquisition and use what is already on disk.
    pub offline: bool,
    /// Explicit project directories; replaces the configured project list.
    pub projects: Vec<PathBuf>,
    pub dry_run: bool,
    pub corpus_output: Option<PathBuf>,
}

/// Command-line overrides for `compare`.
#[derive(Debug, Clone, Default)]
pub struct CompareArgs {
    pub corpus: Option<PathBuf>,
    pub summary: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub corpus_filter: Option<String>,
    pub key_prefix: Option<String>,
    pub include_section: bool,
    pub top_k: Option<usize>,
}

/// Clone every configured project that is not already present.
pub fn run_collect(config: &Config) -> Result<CollectResponse, DocbenchError> {
    if config.projects.is_empty() {
        tracing::warn!("no projects configured");
    }
    Ok(CollectResponse::new(acquire_projects(config)?))
}

/// Build the corpus from the configured projects or explicit directories.
pub fn run_build(config: &Config, args: &BuildArgs) -> Result<BuildResponse, DocbenchError> {
    let (roots, acquisition) = if args.projects.is_empty() {
        let acquisition = if args.offline {
            Vec::new()
        } else {
            acquire_projects(config)?
        };
        let roots = available_projects(config)
            .into_iter()
            .map(|(name, root)| ProjectRoot::new(name, root))
            .collect::<Vec<_>>();
        (roots, acquisition)
    } else {
        let roots = args
            .projects
            .iter()
            .map(|dir| ProjectRoot::from_dir(dir))
            .collect::<Result<Vec<_>, _>>()?;
        (roots, Vec::new())
    };

    if roots.is_empty() {
        tracing::warn!("no project directories to process");
    }

    let mode = if args.dry_run || config.build.dry_run {
        ProcessMode::DryRun
    } else {
        ProcessMode::Strip
    };
    let corpus_output = args
        .corpus_output
        .clone()
        .unwrap_or_else(|| config.build.corpus_output.clone());

    build_and_save(&roots, mode, &corpus_output, acquisition)
}

/// Dump the docstrings of a file or directory.
pub fn run_extract(path: &Path, base: Option<&Path>) -> Result<ExtractResponse, DocbenchError> {
    extract_path(path, base)
}

/// Merge `[compare]` configuration with flag overrides.
///
/// Corpus, summary and output paths have no defaults.
pub fn compare_options(
    config: &Config,
    args: &CompareArgs,
) -> Result<CompareOptions, DocbenchError> {
    let settings = &config.compare;
    let top_k = args.top_k.unwrap_or(settings.top_k);
    if top_k == 0 {
        return Err(DocbenchError::invalid_args("--top-k must be at least 1"));
    }

    Ok(CompareOptions {
        corpus: required(&args.corpus, &settings.corpus, "corpus")?,
        summary: required(&args.summary, &settings.summary, "summary")?,
        output: required(&args.output, &settings.output, "output")?,
        corpus_filter: args
            .corpus_filter
            .clone()
            .or_else(|| settings.corpus_filter.clone()),
        keying: SummaryKeying {
            key_prefix: args
                .key_prefix
                .clone()
                .or_else(|| settings.key_prefix.clone()),
            include_section: args.include_section || settings.include_section,
        },
        top_k,
    })
}

fn required(
    flag: &Option<PathBuf>,
    configured: &Option<PathBuf>,
    name: &str,
) -> Result<PathBuf, DocbenchError> {
    flag.clone().or_else(|| configured.clone()).ok_or_else(|| {
        DocbenchError::invalid_args(format!(
            "--{} is required (or set compare.{} in the config file)",
            name, name
        ))
    })
}

/// Run the compare pipeline.
pub fn run_compare(
    config: &Config,
    args: &CompareArgs,
) -> Result<(CompareOptions, CompareOutcome), DocbenchError> {
    let options = compare_options(config, args)?;
    let outcome = compare_summary(&options)?;
    Ok((options, outcome))
}
