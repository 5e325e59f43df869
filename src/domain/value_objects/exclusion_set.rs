//! Exclusion set value object
//!
//! Paths a mirror sync must never transfer or delete: a fixed list of
//! patterns plus the entries of a local ignore file, matched with gitignore
//! semantics.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Paths excluded from every sync: version control metadata, logs and the
/// two host-specific config files.
pub const DEFAULT_EXCLUDES: [&str; 4] = [
    ".git",
    "log",
    "config/application.conf",
    "config/riepete.conf",
];

/// Maximum ignore file size (64KB)
const MAX_FILE_SIZE: u64 = 65536;

/// Maximum number of patterns allowed in the ignore file
const MAX_PATTERNS: usize = 1000;

/// Static exclusions merged with the patterns of an ignore file.
#[derive(Debug, Clone)]
pub struct ExclusionSet {
    patterns: Vec<String>,
    ignore_file: Option<PathBuf>,
    matcher: Gitignore,
    ignore_file_patterns: usize,
}

impl ExclusionSet {
    /// Static patterns only.
    pub fn new(root: &Path, patterns: &[String]) -> Result<Self, IgnoreError> {
        Self::build(root, patterns, None)
    }

    /// Static patterns plus the ignore file, when it exists.
    ///
    /// A missing ignore file is not an error: the set then holds the static
    /// patterns only and [`ignore_file`](Self::ignore_file) is `None`.
    pub fn load(root: &Path, patterns: &[String], ignore_file: &Path) -> Result<Self, IgnoreError> {
        if !ignore_file.is_file() {
            return Self::new(root, patterns);
        }

        let metadata = fs::metadata(ignore_file).map_err(IgnoreError::Io)?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(IgnoreError::FileTooLarge {
                path: ignore_file.to_path_buf(),
                size: metadata.len(),
                limit: MAX_FILE_SIZE,
            });
        }

        let content = fs::read_to_string(ignore_file).map_err(IgnoreError::Io)?;
        Self::from_content(root, patterns, ignore_file, &content)
    }

    /// Static patterns plus ignore-file content given as a string.
    pub fn from_content(
        root: &Path,
        patterns: &[String],
        ignore_file: &Path,
        content: &str,
    ) -> Result<Self, IgnoreError> {
        Self::build(root, patterns, Some((ignore_file, content)))
    }

    fn build(
        root: &Path,
        patterns: &[String],
        ignore_file: Option<(&Path, &str)>,
    ) -> Result<Self, IgnoreError> {
        let mut builder = GitignoreBuilder::new(root);

        for pattern in patterns {
            builder
                .add_line(None, pattern)
                .map_err(|e| IgnoreError::InvalidPattern {
                    path: PathBuf::from("<static>"),
                    line: 0,
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
        }

        let mut ignore_file_patterns = 0;
        if let Some((path, content)) = ignore_file {
            for (line_num, line) in content.lines().enumerate() {
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    continue;
                }

                ignore_file_patterns += 1;
                if ignore_file_patterns > MAX_PATTERNS {
                    return Err(IgnoreError::TooManyPatterns {
                        path: path.to_path_buf(),
                        count: ignore_file_patterns,
                        limit: MAX_PATTERNS,
                    });
                }

                builder
                    .add_line(Some(path.to_path_buf()), line)
                    .map_err(|e| IgnoreError::InvalidPattern {
                        path: path.to_path_buf(),
                        line: line_num + 1,
                        pattern: line.to_string(),
                        message: e.to_string(),
                    })?;
            }
        }

        let matcher = builder
            .build()
            .map_err(|e| IgnoreError::BuildFailed(e.to_string()))?;

        Ok(Self {
            patterns: patterns.to_vec(),
            ignore_file: ignore_file.map(|(path, _)| path.to_path_buf()),
            matcher,
            ignore_file_patterns,
        })
    }

    /// Check a path relative to the transfer root.
    ///
    /// A path is excluded when it or any of its parents matches.
    pub fn is_excluded(&self, rel_path: &Path, is_dir: bool) -> bool {
        if rel_path.as_os_str().is_empty() {
            return false;
        }
        self.matcher
            .matched_path_or_any_parents(rel_path, is_dir)
            .is_ignore()
    }

    /// The static patterns, in configuration order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// The ignore file merged into this set, if it existed.
    pub fn ignore_file(&self) -> Option<&Path> {
        self.ignore_file.as_deref()
    }

    /// Number of patterns contributed by the ignore file.
    pub fn ignore_file_pattern_count(&self) -> usize {
        self.ignore_file_patterns
    }
}

/// Errors that can occur when loading the ignore file.
#[derive(Debug, Error)]
pub enum IgnoreError {
    #[error("ignore file exceeds {}KB limit ({size} bytes): {}", .limit / 1024, .path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("ignore file has {count} patterns, exceeds {limit} limit: {}", .path.display())]
    TooManyPatterns {
        path: PathBuf,
        count: usize,
        limit: usize,
    },

    #[error("invalid exclude pattern at {}:{line}: '{pattern}' - {message}", .path.display())]
    InvalidPattern {
        path: PathBuf,
        line: usize,
        pattern: String,
        message: String,
    },

    #[error("failed to build exclude matcher: {0}")]
    BuildFailed(String),

    #[error("IO error reading ignore file: {0}")]
    Io(#[source] std::io::Error),
}
