//! Qualified names for Python declarations.
//!
//! A file's module name is its path relative to the project base with the
//! extension dropped and separators turned into dots. A package initializer
//! (`pkg/__init__.py`) takes its package's name. Nested declarations append
//! their own names: method `f` of class `C` in `a/b.py` is `a.b.C.f`.
//!
//! Names depend only on the file path and lexical nesting, never on the order
//! in which declarations are visited.

use std::path::{Component, Path};

use thiserror::Error;

const PACKAGE_INITIALIZER: &str = "__init__";

/// Error type for module name resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The file is not located under the base path.
    #[error("{file} is not under {base}")]
    OutsideBase { file: String, base: String },

    /// The relative path has no usable components.
    #[error("cannot derive a module name from {file}")]
    NoComponents { file: String },
}

/// Qualified-name source for the declarations of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedNameResolver {
    module: String,
}

impl QualifiedNameResolver {
    /// Resolver for a file located under `base`.
    pub fn for_file(file: &Path, base: &Path) -> Result<Self, ResolveError> {
        Ok(QualifiedNameResolver {
            module: module_name(file, base)?,
        })
    }

    /// Resolver for a known module name.
    pub fn for_module(module: impl Into<String>) -> Self {
        QualifiedNameResolver {
            module: module.into(),
        }
    }

    /// The module's own identifier.
    pub fn module_name(&self) -> &str {
        &self.module
    }

    /// Identifier of a declaration nested under `nesting`, outermost first.
    pub fn qualify<S: AsRef<str>>(&self, nesting: &[S]) -> String {
        let mut name = self.module.clone();
        for segment in nesting {
            name.push('.');
            name.push_str(segment.as_ref());
        }
        name
    }
}

/// Compute the module name of `file` relative to `base`.
pub fn module_name(file: &Path, base: &Path) -> Result<String, ResolveError> {
    let relative = file
        .strip_prefix(base)
        .map_err(|_| ResolveError::OutsideBase {
            file: file.display().to_string(),
            base: base.display().to_string(),
        })?;

    let mut segments: Vec<String> = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => segments.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => {
                return Err(ResolveError::OutsideBase {
                    file: file.display().to_string(),
                    base: base.display().to_string(),
                })
            }
        }
    }

    let Some(last) = segments.pop() else {
        return Err(ResolveError::NoComponents {
            file: file.display().to_string(),
        });
    };
    let stem = match last.rfind('.') {
        Some(dot) if dot > 0 => last[..dot].to_string(),
        _ => last,
    };
    if stem != PACKAGE_INITIALIZER || segments.is_empty() {
        segments.push(stem);
    }

    Ok(segments.join("."))
}

/// Qualified name of a declaration nested under `nesting` in `file`.
pub fn resolve<S: AsRef<str>>(
    file: &Path,
    base: &Path,
    nesting: &[S],
) -> Result<String, ResolveError> {
    Ok(QualifiedNameResolver::for_file(file, base)?.qualify(nesting))
}
