//! Vault scanning.
//!
//! Walks a directory tree, reads every markdown file and feeds its lines to
//! the recognizer. Task file paths are relative to the vault root and always
//! use `/` as the separator.
//!
//! Both synchronous and asynchronous scans are provided:
//! - `scan()` - Reads files one after another using `std::fs`
//! - `scan_async()` - Reads and recognizes files concurrently on a tokio `JoinSet`
//!
//! Both produce identical, deterministically ordered results.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use globset::{Glob, GlobSet, GlobSetBuilder};
use mdtasks_core::models::Task;
use mdtasks_core::recognize::recognize_document;
use thiserror::Error;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::TaskIndex;

/// Files scanned when no include patterns are configured.
pub const DEFAULT_INCLUDE: &[&str] = &["**/*.md"];

/// Directories that are never scanned.
pub const BUILTIN_EXCLUDE: &[&str] = &["**/.git/**", "**/.obsidian/**", "**/node_modules/**"];

/// Errors that can occur while scanning a vault.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The vault root is missing or not a directory.
    #[error("vault root does not exist or is not a directory: '{path}'")]
    RootNotFound {
        /// The configured root.
        path: PathBuf,
    },

    /// An include or exclude pattern could not be compiled.
    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        /// The offending pattern.
        pattern: String,
        /// The underlying glob error.
        #[source]
        source: globset::Error,
    },

    /// Directory traversal failed.
    #[error("failed to walk '{path}': {source}")]
    WalkError {
        /// The path being visited when the error occurred.
        path: PathBuf,
        /// The underlying walk error.
        #[source]
        source: walkdir::Error,
    },

    /// I/O error during file read.
    #[error("failed to read '{path}': {source}")]
    ReadError {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A background read task panicked or was cancelled.
    #[error("scan task failed: {0}")]
    Join(#[from] JoinError),
}

/// Result type for scan operations.
pub type Result<T> = std::result::Result<T, ScanError>;

/// A file selected for scanning.
#[derive(Debug, Clone)]
struct VaultFile {
    path: PathBuf,
    relative: String,
}

/// Collects tasks from markdown files under a root directory.
///
/// # Example
///
/// ```no_run
/// use mdtasks_vault::VaultScanner;
///
/// let index = VaultScanner::new("/home/me/notes")
///     .exclude(["Templates/**"])
///     .scan()?;
/// println!("{} tasks in {} files", index.len(), index.files_scanned);
/// # Ok::<(), mdtasks_vault::ScanError>(())
/// ```
#[derive(Debug, Clone)]
pub struct VaultScanner {
    root: PathBuf,
    include: Vec<String>,
    exclude: Vec<String>,
    follow_symlinks: bool,
}

impl VaultScanner {
    /// Creates a scanner for `root` that reads every `.md` file.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            include: DEFAULT_INCLUDE.iter().map(|p| p.to_string()).collect(),
            exclude: Vec::new(),
            follow_symlinks: false,
        }
    }

    /// Replaces the include patterns. An empty list keeps the default.
    pub fn include<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        if !patterns.is_empty() {
            self.include = patterns;
        }
        self
    }

    /// Adds exclude patterns on top of [`BUILTIN_EXCLUDE`].
    pub fn exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets whether symbolic links are followed while walking.
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Returns the vault root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scans the vault synchronously.
    ///
    /// # Errors
    ///
    /// Returns an error if the root is missing, a pattern is invalid, the
    /// walk fails, or a file cannot be read. Files that are not valid UTF-8
    /// are skipped with a warning.
    pub fn scan(&self) -> Result<TaskIndex> {
        let files = self.collect_files()?;
        let mut index = TaskIndex::new(&self.root);

        for file in &files {
            let Some(text) = read_document(&file.path)? else {
                continue;
            };
            let tasks = recognize_file(&text, &file.relative);
            index.tasks.extend(tasks);
            index.files_scanned += 1;
        }

        Ok(finish(index))
    }

    /// Scans the vault, reading and recognizing files concurrently.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Same as [`VaultScanner::scan`], plus [`ScanError::Join`] if a
    /// background task fails.
    pub async fn scan_async(&self) -> Result<TaskIndex> {
        let files = self.collect_files()?;
        let mut set = JoinSet::new();

        for (order, file) in files.into_iter().enumerate() {
            set.spawn(async move {
                let text = read_document_async(&file.path).await?;
                let tasks = text.map(|text| recognize_file(&text, &file.relative));
                Ok::<_, ScanError>((order, tasks))
            });
        }

        let mut results = Vec::with_capacity(set.len());
        while let Some(joined) = set.join_next().await {
            results.push(joined??);
        }
        results.sort_by_key(|(order, _)| *order);

        let mut index = TaskIndex::new(&self.root);
        for (_, tasks) in results {
            if let Some(tasks) = tasks {
                index.tasks.extend(tasks);
                index.files_scanned += 1;
            }
        }

        Ok(finish(index))
    }

    /// Walks the root and returns matching files sorted by relative path.
    fn collect_files(&self) -> Result<Vec<VaultFile>> {
        if !self.root.is_dir() {
            return Err(ScanError::RootNotFound {
                path: self.root.clone(),
            });
        }

        let include_set = build_globset(&self.include)?;
        let exclude_set = build_globset(
            BUILTIN_EXCLUDE
                .iter()
                .map(|p| p.to_string())
                .chain(self.exclude.iter().cloned()),
        )?;

        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root).follow_links(self.follow_symlinks);
        for entry in walker {
            let entry = entry.map_err(|source| {
                let path = source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.clone());
                ScanError::WalkError { path, source }
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = relative_path(&self.root, entry.path());
            if exclude_set.is_match(&relative) || !include_set.is_match(&relative) {
                continue;
            }

            files.push(VaultFile {
                path: entry.into_path(),
                relative,
            });
        }

        files.sort_by(|a, b| a.relative.cmp(&b.relative));
        Ok(files)
    }
}

fn recognize_file(text: &str, relative: &str) -> Vec<Task> {
    let tasks = recognize_document(text, relative);
    debug!(path = relative, tasks = tasks.len(), "scanned file");
    tasks
}

fn finish(mut index: TaskIndex) -> TaskIndex {
    index.scanned_at = Utc::now();
    info!(
        root = %index.root.display(),
        files = index.files_scanned,
        tasks = index.tasks.len(),
        "vault scan complete"
    );
    index
}

/// Reads a file, returning `None` for content that is not valid UTF-8.
fn read_document(path: &Path) -> Result<Option<String>> {
    classify_read(path, fs::read_to_string(path))
}

async fn read_document_async(path: &Path) -> Result<Option<String>> {
    classify_read(path, tokio::fs::read_to_string(path).await)
}

fn classify_read(path: &Path, result: io::Result<String>) -> Result<Option<String>> {
    match result {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            warn!(path = %path.display(), "skipping file that is not valid UTF-8");
            Ok(None)
        }
        Err(source) => Err(ScanError::ReadError {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn build_globset<I, S>(patterns: I) -> Result<GlobSet>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let glob = Glob::new(pattern).map_err(|source| ScanError::InvalidGlob {
            pattern: pattern.to_string(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ScanError::InvalidGlob {
        pattern: String::new(),
        source,
    })
}

/// Root-relative path joined with `/`.
fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_uses_forward_slashes() {
        let root = PathBuf::from("vault");
        let path = root.join("projects").join("alpha.md");
        assert_eq!(relative_path(&root, &path), "projects/alpha.md");
    }

    #[test]
    fn test_relative_path_outside_root() {
        let path = PathBuf::from("other").join("b.md");
        assert_eq!(relative_path(Path::new("vault"), &path), "other/b.md");
    }

    #[test]
    fn test_include_empty_keeps_default() {
        let scanner = VaultScanner::new("v").include(Vec::<String>::new());
        assert_eq!(scanner.include, vec!["**/*.md".to_string()]);
    }

    #[test]
    fn test_exclude_accumulates() {
        let scanner = VaultScanner::new("v").exclude(["a/**"]).exclude(["b/**"]);
        assert_eq!(scanner.exclude, vec!["a/**".to_string(), "b/**".to_string()]);
    }

    #[test]
    fn test_build_globset_rejects_invalid_pattern() {
        let err = build_globset(["[unclosed"]).unwrap_err();
        assert!(matches!(err, ScanError::InvalidGlob { ref pattern, .. } if pattern == "[unclosed"));
    }

    #[test]
    fn test_missing_root() {
        let err = VaultScanner::new("/nonexistent/mdtasks/vault").scan().unwrap_err();
        assert!(matches!(err, ScanError::RootNotFound { .. }));
        assert!(err.to_string().contains("/nonexistent/mdtasks/vault"));
    }
}
