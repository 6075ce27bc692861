/*!
 * Configuration handling for codedigest
 */

use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};
use clap_complete::Shell;
use serde::Serialize;

use crate::error::Result;
use crate::policy::{InclusionPolicy, MarkdownMode, Profile};
use crate::{bail, ensure};

/// Output file used when `-o` is not given
pub const DEFAULT_OUTPUT: &str = "code_structure_analysis.md";

/// Format of the end-of-run report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Console tables
    #[default]
    Table,
    /// A single JSON object on stdout
    Json,
}

/// Command-line arguments for codedigest
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "codedigest",
    version = env!("CARGO_PKG_VERSION"),
    about = "Analyze project code structure and consolidate code files into Markdown",
    long_about = "Walks a project, selects source files by extension and path rules, optionally strips comments, and writes one Markdown document with statistics, a directory tree and every file's content.",
    after_help = "With none of --remove-comments/--keep-comments, --md, --include-js/--exclude-js or --output given, an interactive menu asks for them."
)]
pub struct Args {
    /// Directory to analyze
    #[clap(default_value = ".")]
    pub directory: String,

    /// Output Markdown file [default: code_structure_analysis.md]
    #[clap(short, long)]
    pub output: Option<String>,

    /// Remove all comments and documentation from code
    #[clap(long, conflicts_with = "keep_comments")]
    pub remove_comments: bool,

    /// Keep all comments and documentation in code
    #[clap(long)]
    pub keep_comments: bool,

    /// Markdown inclusion policy [default: readme]
    #[clap(long, value_enum)]
    pub md: Option<MarkdownMode>,

    /// Exclude JavaScript/JSX files (.js/.jsx/.jsxc)
    #[clap(long, conflicts_with = "include_js")]
    pub exclude_js: bool,

    /// Include JavaScript/JSX files (.js/.jsx/.jsxc)
    #[clap(long)]
    pub include_js: bool,

    /// Extension and exclusion profile
    #[clap(long, value_enum, default_value_t = Profile::default())]
    pub profile: Profile,

    /// Number of threads to use for reading files
    #[clap(long, default_value = "4")]
    pub threads: usize,

    /// Format of the end-of-run report
    #[clap(long, value_enum, default_value_t = ReportFormat::default())]
    pub report: ReportFormat,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[clap(short, long)]
    pub quiet: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

impl Args {
    /// Comment handling chosen on the command line, if any
    pub fn comment_choice(&self) -> Option<bool> {
        if self.remove_comments {
            Some(true)
        } else if self.keep_comments {
            Some(false)
        } else {
            None
        }
    }

    /// JavaScript inclusion chosen on the command line, if any
    pub fn js_choice(&self) -> Option<bool> {
        if self.exclude_js {
            Some(false)
        } else if self.include_js {
            Some(true)
        } else {
            None
        }
    }

    /// No option flag at all was given, so every option is asked for
    pub fn needs_menu(&self) -> bool {
        self.comment_choice().is_none()
            && self.md.is_none()
            && self.js_choice().is_none()
            && self.output.is_none()
    }
}

/// The user-facing choices, from flags or the interactive menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Options {
    /// Strip comments from supported languages
    pub remove_comments: bool,
    /// Markdown selection
    pub markdown_mode: MarkdownMode,
    /// Include .js/.jsx/.jsxc files
    pub include_js: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            remove_comments: false,
            markdown_mode: MarkdownMode::default(),
            include_js: true,
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory to analyze
    pub target_dir: PathBuf,

    /// Output Markdown file path
    pub output_file: PathBuf,

    /// Comment, Markdown and JavaScript choices
    pub options: Options,

    /// Extension and exclusion profile
    pub profile: Profile,

    /// Number of threads to use for processing
    pub num_threads: usize,

    /// Report format
    pub report: ReportFormat,
}

impl Config {
    /// Create configuration from command-line arguments
    ///
    /// Options missing from the command line take their defaults; the entry
    /// point may replace them with menu answers before the run starts.
    pub fn from_args(args: &Args) -> Self {
        let defaults = Options::default();
        Self {
            target_dir: PathBuf::from(&args.directory),
            output_file: PathBuf::from(args.output.as_deref().unwrap_or(DEFAULT_OUTPUT)),
            options: Options {
                remove_comments: args.comment_choice().unwrap_or(defaults.remove_comments),
                markdown_mode: args.md.unwrap_or(defaults.markdown_mode),
                include_js: args.js_choice().unwrap_or(defaults.include_js),
            },
            profile: args.profile,
            num_threads: args.threads,
            report: args.report,
        }
    }

    /// Inclusion rules for this run
    pub fn policy(&self) -> InclusionPolicy {
        InclusionPolicy::new(
            self.profile,
            self.options.markdown_mode,
            self.options.include_js,
        )
    }

    /// Validate the configuration before any work begins
    pub fn validate(&self) -> Result<()> {
        let shown = self.target_dir.display().to_string();
        ensure!(self.target_dir.exists(), PathNotFound, "{}", shown);
        ensure!(self.target_dir.is_dir(), NotADirectory, "{}", shown);
        ensure!(self.num_threads > 0, Config, "--threads must be at least 1");

        if let Some(parent) = self.output_file.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                bail!(Config, "Output directory not found: {}", parent.display());
            }
        }

        Ok(())
    }

    /// Absolute path of the output file, so the walk can skip it
    pub fn output_path_abs(&self) -> Option<PathBuf> {
        let name = self.output_file.file_name()?;
        let parent = match self.output_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::canonicalize(parent).ok().map(|dir| dir.join(name))
    }
}
