//! Corpus build and extraction pipelines.
//!
//! A build visits each project root in order, processes every Python file
//! under it as one independent unit, and merges the extracted records into a
//! single [`SymbolCorpus`]. Qualified names are relative to the project root.

use std::path::{Path, PathBuf};

use docbench_python::files::collect_python_files;
use docbench_python::process::{extract_file, process_file, FileOutcome, ProcessMode};

use crate::corpus::SymbolCorpus;
use crate::error::DocbenchError;
use crate::output::{
    BuildResponse, ExtractResponse, FailureStage, FileCounts, FileFailure, ProjectAcquisition,
    ProjectReport,
};

/// A project root to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    pub name: String,
    pub root: PathBuf,
}

impl ProjectRoot {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        ProjectRoot {
            name: name.into(),
            root: root.into(),
        }
    }

    /// A root named after its final directory component.
    pub fn from_dir(root: &Path) -> Result<Self, DocbenchError> {
        if !root.is_dir() {
            return Err(DocbenchError::file_not_found(root.display().to_string()));
        }
        let name = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());
        Ok(ProjectRoot::new(name, root))
    }
}

/// Result of processing a set of projects.
#[derive(Debug, Default)]
pub struct BuildOutcome {
    pub corpus: SymbolCorpus,
    pub projects: Vec<ProjectReport>,
}

/// Process every Python file of one project, merging records into `corpus`.
pub fn build_project(
    project: &ProjectRoot,
    mode: ProcessMode,
    corpus: &mut SymbolCorpus,
) -> ProjectReport {
    let _span = tracing::info_span!("project", name = %project.name).entered();
    tracing::info!("processing project {} at {}", project.name, project.root.display());

    let mut report = ProjectReport {
        name: project.name.clone(),
        root: project.root.display().to_string(),
        files: FileCounts::default(),
        symbols: 0,
        failures: Vec::new(),
    };

    let files = match collect_python_files(&project.root) {
        Ok(files) => files,
        Err(err) => {
            tracing::warn!("skipping project {}: {}", project.name, err);
            report.failures.push(FileFailure {
                file: report.root.clone(),
                stage: FailureStage::Read,
                message: err.to_string(),
            });
            return report;
        }
    };

    for path in &files {
        let processed = process_file(path, &project.root, mode);
        report.files.total += 1;
        match &processed.outcome {
            FileOutcome::Stripped { .. } => report.files.stripped += 1,
            FileOutcome::Unchanged => report.files.unchanged += 1,
            _ => report.files.failed += 1,
        }
        if let Some(failure) = processed.failure() {
            report.failures.push(failure);
        }
        // Records from a file whose rewrite failed are still kept
        report.symbols += processed.symbols.len();
        corpus.merge(processed.symbols);
    }

    tracing::info!(
        "project {}: {} files, {} symbols, {} failed",
        project.name,
        report.files.total,
        report.symbols,
        report.files.failed
    );
    report
}

/// Process projects in order into one corpus.
pub fn build_corpus(projects: &[ProjectRoot], mode: ProcessMode) -> BuildOutcome {
    let mut outcome = BuildOutcome::default();
    for project in projects {
        let report = build_project(project, mode, &mut outcome.corpus);
        outcome.projects.push(report);
    }
    outcome
}

/// Build the corpus and save it to `corpus_output`.
///
/// Per-file problems end up in the report; failing to save the corpus is the
/// only fatal error.
pub fn build_and_save(
    projects: &[ProjectRoot],
    mode: ProcessMode,
    corpus_output: &Path,
    acquisition: Vec<ProjectAcquisition>,
) -> Result<BuildResponse, DocbenchError> {
    let outcome = build_corpus(projects, mode);
    outcome.corpus.save(corpus_output).map_err(|err| {
        // A missing parent is a write problem here, not missing input
        DocbenchError::output_write(corpus_output.display().to_string(), err)
    })?;
    Ok(BuildResponse::new(
        mode == ProcessMode::DryRun,
        corpus_output.display().to_string(),
        outcome.corpus.len(),
        acquisition,
        outcome.projects,
    ))
}

/// Extract docstrings from a file or directory without modifying anything.
///
/// `base` anchors qualified names. It defaults to the directory itself, or
/// to the parent directory for a single file. For a single file any failure
/// is returned as an error; for a directory failures are listed.
pub fn extract_path(path: &Path, base: Option<&Path>) -> Result<ExtractResponse, DocbenchError> {
    if !path.exists() {
        return Err(DocbenchError::file_not_found(path.display().to_string()));
    }

    if path.is_file() {
        let base = match base {
            Some(base) => base.to_path_buf(),
            None => path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        };
        let symbols = extract_file(path, &base).into_result()?;
        return Ok(ExtractResponse::new(1, symbols, Vec::new()));
    }

    let base = base.unwrap_or(path);
    let files = collect_python_files(path)?;
    let mut corpus = SymbolCorpus::new();
    let mut failures = Vec::new();
    for file in &files {
        let processed = extract_file(file, base);
        if let Some(failure) = processed.failure() {
            failures.push(failure);
        }
        corpus.merge(processed.symbols);
    }
    Ok(ExtractResponse::new(files.len(), corpus.into_symbols(), failures))
}
