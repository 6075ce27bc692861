/*!
 * Markdown writer implementation for codedigest
 */

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Local};
use tempfile::NamedTempFile;
use tracing::info;

use crate::config::Config;
use crate::error::{Result, ResultExt};
use crate::interrupt::Interrupt;
use crate::tree::render_tree;
use crate::types::{DirectoryGroup, Digest, SourceFile};
use crate::utils::format_file_size;

const TOOL_NAME: &str = "Code Structure and Content Analyzer";

/// Markdown writer for a scanned digest
pub struct MarkdownWriter {
    /// Writer configuration
    config: Config,
}

impl MarkdownWriter {
    /// Create a new Markdown writer
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Render the digest and atomically replace the output file with it
    ///
    /// Ctrl-C is held back for the duration of the write.
    pub fn write(&self, digest: &Digest, interrupt: &Interrupt) -> Result<()> {
        let document = self.render(digest, Local::now());
        info!("Writing to: {}", self.config.output_file.display());

        let _guard = interrupt.defer()?;
        write_atomic(&self.config.output_file, document.as_bytes(), interrupt)
    }

    /// Render the complete document
    pub fn render(&self, digest: &Digest, generated_at: DateTime<Local>) -> String {
        let mut lines: Vec<String> = Vec::new();

        self.write_header(digest, generated_at, &mut lines);
        self.write_statistics(digest, &mut lines);
        self.write_tree(digest, &mut lines);
        self.write_contents(digest, &mut lines);
        self.write_footer(&mut lines);

        lines.join("\n")
    }

    fn write_header(&self, digest: &Digest, generated_at: DateTime<Local>, lines: &mut Vec<String>) {
        let options = &self.config.options;
        let comments = if options.remove_comments {
            "Comments Removed"
        } else {
            "Comments Preserved"
        };
        let hostname = hostname::get()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        lines.extend([
            "# Code Structure Analysis".to_string(),
            String::new(),
            format!("**Generated on:** {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
            format!("**Root Directory:** `{}`", digest.root.display()),
            format!("**Comment Processing:** {}", comments),
            format!("**Markdown Included:** {}", options.markdown_mode.describe()),
            format!("**JavaScript/JSX:** {}", included(options.include_js)),
            format!("**Profile:** {}", self.config.profile),
            format!("**Host:** {}", hostname),
            format!("**Analysis Tool:** {} (codedigest {})", TOOL_NAME, crate::VERSION),
            String::new(),
            "---".to_string(),
            String::new(),
        ]);
    }

    fn write_statistics(&self, digest: &Digest, lines: &mut Vec<String>) {
        let stats = digest.statistics();

        lines.extend([
            "## 📊 Project Statistics".to_string(),
            String::new(),
            format!("- **Total Directories (with files):** {}", stats.total_directories),
            format!("- **Total Included Files:** {}", stats.total_files),
            format!("- **Total Size:** {}", format_file_size(stats.total_size)),
            String::new(),
        ]);

        if !stats.file_types.is_empty() {
            lines.extend(["### File Type Breakdown".to_string(), String::new()]);
            for (ext, count) in &stats.file_types {
                lines.push(format!("- **{}**: {} files", ext, count));
            }
            lines.extend([String::new(), "---".to_string(), String::new()]);
        }
    }

    fn write_tree(&self, digest: &Digest, lines: &mut Vec<String>) {
        lines.extend([
            "## 📁 Directory Structure (Included Files)".to_string(),
            String::new(),
            "```".to_string(),
        ]);
        lines.extend(render_tree(digest));
        lines.extend([
            "```".to_string(),
            String::new(),
            "---".to_string(),
            String::new(),
        ]);
    }

    fn write_contents(&self, digest: &Digest, lines: &mut Vec<String>) {
        let state = if self.config.options.remove_comments {
            "(comments removed)"
        } else {
            "(with comments)"
        };
        lines.extend([
            "## 💻 File Contents".to_string(),
            String::new(),
            format!("Complete content of all included files {}:", state),
            String::new(),
        ]);

        let group_count = digest.groups.len();
        for (group_index, group) in digest.groups.iter().enumerate() {
            self.write_group_header(digest, group, lines);

            for (file_index, file) in group.files.iter().enumerate() {
                self.write_file(file, lines);

                let last_file = group_index + 1 == group_count && file_index + 1 == group.files.len();
                if !last_file {
                    lines.extend(["---".to_string(), String::new()]);
                }
            }
        }
    }

    fn write_group_header(&self, digest: &Digest, group: &DirectoryGroup, lines: &mut Vec<String>) {
        let (title, full_path) = if group.is_root() {
            ("Root Directory".to_string(), digest.root.clone())
        } else {
            (
                format!("Directory: {}", group.rel_dir),
                digest.root.join(&group.rel_dir),
            )
        };

        lines.extend([
            format!("### {}", title),
            String::new(),
            format!("**Full Path:** `{}`", full_path.display()),
            format!("**Files:** {}", group.files.len()),
            String::new(),
        ]);
    }

    fn write_file(&self, file: &SourceFile, lines: &mut Vec<String>) {
        let syntax = file.syntax();
        lines.extend([
            format!("#### 💾 {}", file.name),
            String::new(),
            format!("**File Path:** `{}`", file.path.display()),
            format!("**File Type:** {} ({})", file.extension.to_uppercase(), syntax),
            String::new(),
            format!("```{}", syntax),
            file.content.clone(),
            "```".to_string(),
            String::new(),
        ]);
    }

    fn write_footer(&self, lines: &mut Vec<String>) {
        let options = &self.config.options;
        let comments = if options.remove_comments {
            "Removed for clean documentation"
        } else {
            "Preserved as written"
        };

        lines.extend([
            String::new(),
            "---".to_string(),
            String::new(),
            format!(
                "**Analysis completed on {}**",
                Local::now().format("%Y-%m-%d at %H:%M:%S")
            ),
            format!("**Comments:** {}", comments),
            format!("**JavaScript/JSX:** {}", included(options.include_js)),
            String::new(),
            format!("*Generated by {}*", TOOL_NAME),
        ]);
    }
}

fn included(flag: bool) -> &'static str {
    if flag {
        "Included"
    } else {
        "Excluded"
    }
}

/// Write `bytes` to a temporary file next to `path`, then move it into place
///
/// Readers of `path` see either the previous file or the complete new one.
/// An interrupt recorded before the move discards the temporary file.
pub fn write_atomic(path: &Path, bytes: &[u8], interrupt: &Interrupt) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).write_context(|| dir.display().to_string())?;
    file.write_all(bytes)
        .write_context(|| path.display().to_string())?;
    file.as_file()
        .sync_all()
        .write_context(|| path.display().to_string())?;

    interrupt.check()?;
    file.persist(path)
        .write_context(|| path.display().to_string())?;

    Ok(())
}
