/*!
 * Core types and data structures for codedigest
 */

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::language::{syntax_for, Language};

/// An included file, read and (optionally) stripped
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// File name
    pub name: String,
    /// Relative path from scan root
    pub path: PathBuf,
    /// Lower-cased extension with leading dot, empty if none
    pub extension: String,
    /// Size on disk in bytes
    pub size: u64,
    /// Language resolved from the extension
    pub language: Option<Language>,
    /// Cleaned content, or an inline error marker if the read failed
    pub content: String,
    /// Line count before comment stripping
    pub original_lines: usize,
    /// Whether `content` is an error marker
    pub read_failed: bool,
}

impl SourceFile {
    /// Fenced code block tag
    pub fn syntax(&self) -> &'static str {
        syntax_for(&self.extension)
    }

    /// Line count of the emitted content
    pub fn lines(&self) -> usize {
        count_lines(&self.content)
    }
}

/// Included files sharing one directory
#[derive(Debug, Clone)]
pub struct DirectoryGroup {
    /// Directory relative to the scan root, `.` for the root itself
    pub rel_dir: String,
    /// Files sorted by lower-cased name
    pub files: Vec<SourceFile>,
}

impl DirectoryGroup {
    /// Whether this group is the scan root
    pub fn is_root(&self) -> bool {
        self.rel_dir == "."
    }
}

/// Everything the writer needs: the root and its sorted directory groups
#[derive(Debug, Clone)]
pub struct Digest {
    /// Absolute scan root
    pub root: PathBuf,
    /// Groups sorted by relative directory
    pub groups: Vec<DirectoryGroup>,
}

impl Digest {
    /// Root directory name
    pub fn root_name(&self) -> String {
        self.root
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.root.display().to_string())
    }

    /// All files in output order
    pub fn files(&self) -> impl Iterator<Item = &SourceFile> {
        self.groups.iter().flat_map(|group| group.files.iter())
    }

    /// Aggregate statistics over the included files
    pub fn statistics(&self) -> Statistics {
        let mut stats = Statistics {
            total_directories: self.groups.len(),
            ..Statistics::default()
        };

        for file in self.files() {
            stats.total_files += 1;
            stats.total_size += file.size;
            *stats.file_types.entry(file.extension.clone()).or_insert(0) += 1;
        }

        stats
    }
}

/// Totals shown in the document header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    /// Directories holding at least one included file
    pub total_directories: usize,
    /// Included files, unreadable ones too
    pub total_files: usize,
    /// Sum of file sizes in bytes
    pub total_size: u64,
    /// File count per extension
    pub file_types: BTreeMap<String, usize>,
}

/// Number of lines as split on `\n`, ignoring a final trailing newline
pub fn count_lines(text: &str) -> usize {
    if text.is_empty() {
        0
    } else {
        text.strip_suffix('\n').unwrap_or(text).split('\n').count()
    }
}
