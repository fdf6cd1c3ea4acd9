//! Source acquisition: shallow clones of the configured projects.
//!
//! Acquisition is best-effort. A project whose clone fails is reported and
//! skipped; only a projects directory that cannot be created stops the run.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use thiserror::Error;
use wait_timeout::ChildExt;

use crate::config::Config;
use crate::error::DocbenchError;
use crate::output::{AcquisitionState, ProjectAcquisition};

/// Error type for cloning one project.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    /// No `git` executable on PATH.
    #[error("git executable not found: {0}")]
    GitNotFound(#[from] which::Error),

    /// `git` could not be started or waited on.
    #[error("failed to run git: {0}")]
    Io(#[from] io::Error),

    /// `git clone` exited unsuccessfully.
    #[error("git clone failed: {stderr}")]
    CloneFailed { stderr: String },

    /// `git clone` was killed after the configured timeout.
    #[error("git clone timed out after {secs}s")]
    TimedOut { secs: u64 },
}

/// A located `git` executable.
#[derive(Debug, Clone)]
pub struct Git {
    program: PathBuf,
}

impl Git {
    /// Find `git` on PATH.
    pub fn locate() -> Result<Self, AcquisitionError> {
        let program = which::which("git")?;
        tracing::debug!("using git at {}", program.display());
        Ok(Git { program })
    }

    /// `git clone --depth <depth> <url> <dest>`.
    ///
    /// Without a timeout the call blocks until git exits.
    pub fn shallow_clone(
        &self,
        url: &str,
        dest: &Path,
        depth: u32,
        timeout: Option<Duration>,
    ) -> Result<(), AcquisitionError> {
        let mut command = Command::new(&self.program);
        command
            .args(["clone", "--quiet", "--depth", &depth.to_string(), url])
            .arg(dest)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let Some(timeout) = timeout else {
            let output = command.output()?;
            if !output.status.success() {
                return Err(clone_failed(&output.stderr));
            }
            return Ok(());
        };

        let mut child = command.spawn()?;
        match child.wait_timeout(timeout)? {
            Some(status) => {
                let mut stderr = Vec::new();
                if let Some(mut pipe) = child.stderr.take() {
                    pipe.read_to_end(&mut stderr).ok();
                }
                if !status.success() {
                    return Err(clone_failed(&stderr));
                }
                Ok(())
            }
            None => {
                // Timeout - kill the process
                let _ = child.kill();
                let _ = child.wait(); // Reap the zombie
                // A partial checkout would be taken for a present project next run
                let _ = fs::remove_dir_all(dest);
                tracing::warn!("git clone of {} timed out after {:?}", url, timeout);
                Err(AcquisitionError::TimedOut {
                    secs: timeout.as_secs(),
                })
            }
        }
    }
}

fn clone_failed(stderr: &[u8]) -> AcquisitionError {
    AcquisitionError::CloneFailed {
        stderr: String::from_utf8_lossy(stderr).trim().to_string(),
    }
}

/// Clone every configured project that is not already present.
///
/// `git` is only looked up once a clone is actually needed, so a fully
/// populated projects directory works without it.
pub fn acquire_projects(config: &Config) -> Result<Vec<ProjectAcquisition>, DocbenchError> {
    let projects_dir = &config.collect.projects_dir;
    fs::create_dir_all(projects_dir)
        .map_err(|e| DocbenchError::output_write(projects_dir.display().to_string(), e))?;

    let timeout = config.collect.clone_timeout_secs.map(Duration::from_secs);
    let mut git: Option<Result<Git, String>> = None;
    let mut results = Vec::with_capacity(config.projects.len());

    for project in &config.projects {
        let dest = config.project_dir(project);
        let path = dest.display().to_string();

        if dest.exists() {
            tracing::info!("project {} already present, skipping clone", project.name);
            results.push(ProjectAcquisition {
                name: project.name.clone(),
                path,
                state: AcquisitionState::Present,
                error: None,
            });
            continue;
        }

        tracing::info!("cloning {} from {}", project.name, project.url);
        let outcome = match git.get_or_insert_with(|| Git::locate().map_err(|e| e.to_string())) {
            Ok(git) => git
                .shallow_clone(&project.url, &dest, config.collect.clone_depth, timeout)
                .map_err(|e| e.to_string()),
            Err(message) => Err(message.clone()),
        };

        let acquisition = match outcome {
            Ok(()) => ProjectAcquisition {
                name: project.name.clone(),
                path,
                state: AcquisitionState::Cloned,
                error: None,
            },
            Err(message) => {
                tracing::warn!("failed to clone {}: {}", project.name, message);
                ProjectAcquisition {
                    name: project.name.clone(),
                    path,
                    state: AcquisitionState::Failed,
                    error: Some(message),
                }
            }
        };
        results.push(acquisition);
    }

    Ok(results)
}

/// Configured projects whose directory exists, as `(name, root)` pairs.
pub fn available_projects(config: &Config) -> Vec<(String, PathBuf)> {
    config
        .projects
        .iter()
        .filter_map(|project| {
            let dir = config.project_dir(project);
            if dir.is_dir() {
                Some((project.name.clone(), dir))
            } else {
                tracing::debug!("project {} not present at {}", project.name, dir.display());
                None
            }
        })
        .collect()
}
