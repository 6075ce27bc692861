/*!
 * Directory walking and file reading
 */

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use rayon::prelude::*;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::error::Result;
use crate::language::{extension_of, Language};
use crate::policy::InclusionPolicy;
use crate::strip::strip;
use crate::types::{count_lines, Digest, DirectoryGroup, SourceFile};
use crate::utils::{relative_dir_key, truncate_display};

/// Scanner for directory contents
pub struct Scanner {
    /// Scanner configuration
    config: Config,
    /// Inclusion rules derived from the configuration
    policy: InclusionPolicy,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        let policy = config.policy();
        Self {
            config,
            policy,
            progress,
        }
    }

    /// Scan the target directory and return the sorted digest
    pub fn scan(&self) -> Result<Digest> {
        let root = fs::canonicalize(&self.config.target_dir)?;
        info!("Analyzing: {}", root.display());

        let paths = self.discover(&root);
        self.progress.set_length(paths.len() as u64);

        // Order is restored below, so completion order does not matter
        let files: Vec<SourceFile> = paths
            .par_iter()
            .map(|rel_path| self.process_file(&root, rel_path))
            .collect();

        Ok(Digest {
            root,
            groups: group_files(files),
        })
    }

    /// Relative paths of every included file under `root`
    pub fn discover(&self, root: &Path) -> Vec<PathBuf> {
        let output = self.config.output_path_abs();

        WalkDir::new(root)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| !self.should_skip(root, entry, output.as_deref()))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(is_file_entry)
            .filter_map(|entry| {
                let rel_path = entry.path().strip_prefix(root).ok()?.to_path_buf();
                if self.policy.is_included(&rel_path) {
                    Some(rel_path)
                } else {
                    debug!("Excluded {}", rel_path.display());
                    None
                }
            })
            .collect()
    }

    /// Hidden entries, excluded directories and the output file are never walked
    fn should_skip(&self, root: &Path, entry: &DirEntry, output: Option<&Path>) -> bool {
        if entry.depth() == 0 {
            return false;
        }

        if entry.file_name().to_string_lossy().starts_with('.') {
            return true;
        }

        if output.is_some_and(|output| entry.path() == output) {
            return true;
        }

        let rel_path = entry.path().strip_prefix(root).unwrap_or(entry.path());
        entry.file_type().is_dir() && self.policy.is_excluded_dir(rel_path)
    }

    /// Read one file and strip its comments if requested
    fn process_file(&self, root: &Path, rel_path: &Path) -> SourceFile {
        let abs_path = root.join(rel_path);
        let name = rel_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        self.progress
            .set_message(format!("Current file: {}", truncate_display(&name, 40)));

        let size = fs::metadata(&abs_path).map(|m| m.len()).unwrap_or(0);
        let language = Language::from_path(rel_path);

        let (content, original_lines, read_failed) = match read_text(&abs_path) {
            Ok(raw) => {
                let original_lines = count_lines(&raw);
                let content = match language {
                    Some(lang) if self.config.options.remove_comments => strip(&raw, lang.family()),
                    _ => raw,
                };
                (content, original_lines, false)
            }
            Err(e) => {
                warn!("Error reading {}: {}", rel_path.display(), e);
                (format!("Error reading file: {}", e), 0, true)
            }
        };

        self.progress.inc(1);

        SourceFile {
            name,
            path: rel_path.to_path_buf(),
            extension: extension_of(rel_path),
            size,
            language,
            content,
            original_lines,
            read_failed,
        }
    }
}

/// Regular files, and symlinks that resolve to one
///
/// Links to directories are listed by the walk but never descended into.
fn is_file_entry(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

/// Read a file as UTF-8, falling back to Latin-1 for other encodings
pub fn read_text(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8(bytes)
        .unwrap_or_else(|e| e.into_bytes().into_iter().map(char::from).collect()))
}

/// Group files by directory, directories in lexicographic order and files
/// by case-insensitive name
pub fn group_files(files: Vec<SourceFile>) -> Vec<DirectoryGroup> {
    let mut by_dir: BTreeMap<String, Vec<SourceFile>> = BTreeMap::new();

    for file in files {
        let rel_dir = relative_dir_key(file.path.parent().unwrap_or(Path::new("")));
        by_dir.entry(rel_dir).or_default().push(file);
    }

    by_dir
        .into_iter()
        .map(|(rel_dir, mut files)| {
            files.sort_by(|a, b| {
                a.name
                    .to_lowercase()
                    .cmp(&b.name.to_lowercase())
                    .then_with(|| a.name.cmp(&b.name))
            });
            DirectoryGroup { rel_dir, files }
        })
        .collect()
}
