//! Configuration handling for docbench
//!
//! Configuration lives in a TOML file (`docbench.toml` by default). Every
//! section and field is optional; CLI flags override individual values.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DocbenchError;

/// Config file looked up in the current directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "docbench.toml";

/// Docbench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Source acquisition settings
    #[serde(default)]
    pub collect: CollectConfig,

    /// Projects to clone and process
    #[serde(default)]
    pub projects: Vec<ProjectSpec>,

    /// Corpus build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Summary comparison settings
    #[serde(default)]
    pub compare: CompareConfig,
}

/// Source acquisition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectConfig {
    /// Directory the projects are cloned into
    #[serde(default = "default_projects_dir")]
    pub projects_dir: PathBuf,

    /// `git clone --depth` value
    #[serde(default = "default_clone_depth")]
    pub clone_depth: u32,

    /// Kill a clone that runs longer than this many seconds
    #[serde(default)]
    pub clone_timeout_secs: Option<u64>,
}

/// One project to collect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSpec {
    /// Directory name under the projects directory
    pub name: String,

    /// Repository URL
    pub url: String,
}

/// Corpus build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Where the corpus JSON is written
    #[serde(default = "default_corpus_output")]
    pub corpus_output: PathBuf,

    /// Extract without rewriting source files
    #[serde(default)]
    pub dry_run: bool,
}

/// Summary comparison configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Corpus JSON to compare against
    #[serde(default)]
    pub corpus: Option<PathBuf>,

    /// Summary markdown document
    #[serde(default)]
    pub summary: Option<PathBuf>,

    /// Where the detailed match results are written
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Only corpus symbols containing this substring take part
    #[serde(default)]
    pub corpus_filter: Option<String>,

    /// Prefix for summary keys
    #[serde(default)]
    pub key_prefix: Option<String>,

    /// Insert the section stem between prefix and symbol
    #[serde(default)]
    pub include_section: bool,

    /// Size of the top-scoring list in the report
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_projects_dir() -> PathBuf {
    PathBuf::from("projects")
}

fn default_clone_depth() -> u32 {
    1
}

fn default_corpus_output() -> PathBuf {
    PathBuf::from("data").join("symbol_docstrings.json")
}

fn default_top_k() -> usize {
    crate::stats::DEFAULT_TOP_K
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            projects_dir: default_projects_dir(),
            clone_depth: default_clone_depth(),
            clone_timeout_secs: None,
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            corpus_output: default_corpus_output(),
            dry_run: false,
        }
    }
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            corpus: None,
            summary: None,
            output: None,
            corpus_filter: None,
            key_prefix: None,
            include_section: false,
            top_k: default_top_k(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, DocbenchError> {
        let content = fs::read_to_string(path).map_err(|e| config_error(path, e))?;
        let config: Config = toml::from_str(&content).map_err(|e| config_error(path, e))?;
        config.validate().map_err(|message| config_error(path, message))?;
        Ok(config)
    }

    /// Load the named file, or `docbench.toml` in `dir` if it exists, or
    /// fall back to defaults.
    ///
    /// An explicitly named file must exist.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Self, DocbenchError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let default_path = dir.join(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            Self::load(&default_path)
        } else {
            tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
            Ok(Config::default())
        }
    }

    /// Reject project lists that would clone outside the projects directory
    /// or into the same directory twice.
    fn validate(&self) -> Result<(), String> {
        if self.collect.clone_depth == 0 {
            return Err("collect.clone_depth must be at least 1".to_string());
        }
        let mut seen = std::collections::HashSet::new();
        for project in &self.projects {
            let name = project.name.as_str();
            if name.is_empty()
                || name == "."
                || name == ".."
                || name.contains(['/', '\\'])
            {
                return Err(format!("invalid project name `{}`", name));
            }
            if !seen.insert(name) {
                return Err(format!("duplicate project name `{}`", name));
            }
        }
        Ok(())
    }

    /// Directory a project is cloned into.
    pub fn project_dir(&self, project: &ProjectSpec) -> PathBuf {
        self.collect.projects_dir.join(&project.name)
    }
}

fn config_error(path: &Path, message: impl std::fmt::Display) -> DocbenchError {
    DocbenchError::Config {
        path: path.display().to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.collect.projects_dir, PathBuf::from("projects"));
        assert_eq!(config.collect.clone_depth, 1);
        assert!(config.collect.clone_timeout_secs.is_none());
        assert!(config.projects.is_empty());
        assert!(!config.build.dry_run);
        assert_eq!(config.compare.top_k, 5);
        assert!(config.compare.corpus.is_none());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docbench.toml");
        fs::write(
            &path,
            r#"
[collect]
clone_timeout_secs = 600

[[projects]]
name = "flask"
url = "https://github.com/pallets/flask"

[compare]
key_prefix = "pandas.core.methods"
include_section = true
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.collect.clone_depth, 1);
        assert_eq!(config.collect.clone_timeout_secs, Some(600));
        assert_eq!(config.projects.len(), 1);
        assert_eq!(config.projects[0].name, "flask");
        assert_eq!(
            config.project_dir(&config.projects[0]),
            PathBuf::from("projects").join("flask")
        );
        assert_eq!(config.compare.key_prefix.as_deref(), Some("pandas.core.methods"));
        assert!(config.compare.include_section);
        assert_eq!(
            config.build.corpus_output,
            PathBuf::from("data").join("symbol_docstrings.json")
        );
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[collect\nprojects_dir = 1").unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(DocbenchError::Config { .. })
        ));
    }

    #[test]
    fn test_project_names_are_validated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docbench.toml");
        fs::write(
            &path,
            "[[projects]]\nname = \"../escape\"\nurl = \"u\"\n",
        )
        .unwrap();
        assert!(Config::load(&path).is_err());

        fs::write(
            &path,
            "[[projects]]\nname = \"a\"\nurl = \"u\"\n[[projects]]\nname = \"a\"\nurl = \"v\"\n",
        )
        .unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("duplicate project name"));
    }

    #[test]
    fn test_resolve_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::resolve(None, dir.path()).unwrap();
        assert!(config.projects.is_empty());

        let missing = dir.path().join("missing.toml");
        assert!(Config::resolve(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn test_resolve_picks_up_default_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "[build]\ndry_run = true\n",
        )
        .unwrap();
        let config = Config::resolve(None, dir.path()).unwrap();
        assert!(config.build.dry_run);
    }

    #[test]
    fn test_sample_config_parses() {
        let config: Config = toml::from_str(include_str!("../docbench.toml")).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.projects.len(), 10);
        assert_eq!(config.projects[0].name, "flask");
        assert_eq!(config.collect.clone_depth, 1);
    }
}
