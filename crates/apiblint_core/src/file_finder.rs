//! Document discovery.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::LinterError;

/// Resolves path arguments to the documents to lint.
///
/// Files are kept when their extension matches; directories are walked
/// recursively. Exclude globs apply to both, matched against the path as
/// given and, when a base directory is set, against the path relative to it.
pub struct FileFinder {
    extensions: Vec<String>,
    exclude_globs: Option<GlobSet>,
    base_dir: Option<PathBuf>,
}

impl FileFinder {
    pub fn new(extensions: &[String], exclude: &[String]) -> Result<Self, LinterError> {
        let exclude_globs = Self::build_globset(exclude)?;

        Ok(Self {
            extensions: extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect(),
            exclude_globs,
            base_dir: None,
        })
    }

    /// Resolves exclude globs against `base_dir` as well, usually the
    /// directory holding the config file.
    pub fn with_base_dir(mut self, base_dir: Option<PathBuf>) -> Self {
        self.base_dir = base_dir;
        self
    }

    fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>, LinterError> {
        if patterns.is_empty() {
            return Ok(None);
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern)
                .map_err(|e| LinterError::config(format!("Invalid glob pattern: {}", e)))?;
            builder.add(glob);
        }

        let globset = builder
            .build()
            .map_err(|e| LinterError::config(format!("Failed to build globset: {}", e)))?;

        Ok(Some(globset))
    }

    /// Whether `path` has one of the document extensions.
    pub fn is_document(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    /// Checks if a path is excluded by the configured globs.
    pub fn should_ignore(&self, path: &Path) -> bool {
        let Some(excludes) = &self.exclude_globs else {
            return false;
        };
        excludes.is_match(path)
            || self
                .relative_to_base(path)
                .is_some_and(|relative| excludes.is_match(relative))
    }

    fn relative_to_base(&self, path: &Path) -> Option<PathBuf> {
        let base = self.base_dir.as_deref()?;
        let base = if base.as_os_str().is_empty() {
            Path::new(".")
        } else {
            base
        };
        let base = std::path::absolute(base).ok()?;
        let path = std::path::absolute(path).ok()?;
        path.strip_prefix(&base).ok().map(Path::to_path_buf)
    }

    /// Returns the sorted, deduplicated documents under `paths`.
    ///
    /// A path that does not exist is an error.
    pub fn discover_files<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<PathBuf>, LinterError> {
        let mut files = Vec::new();

        for path in paths {
            let path = path.as_ref();
            let metadata = path.metadata().map_err(|e| {
                LinterError::config(format!("Cannot read path {}: {}", path.display(), e))
            })?;

            if metadata.is_file() {
                if self.is_document(path) && !self.should_ignore(path) {
                    files.push(path.to_path_buf());
                } else {
                    debug!("Skipping {}", path.display());
                }
                continue;
            }

            for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
                let entry_path = entry.path();
                if entry.file_type().is_file()
                    && self.is_document(entry_path)
                    && !self.should_ignore(entry_path)
                {
                    files.push(entry_path.to_path_buf());
                }
            }
        }

        files.sort();
        files.dedup();

        info!("Discovered {} documents to lint", files.len());
        Ok(files)
    }
}
