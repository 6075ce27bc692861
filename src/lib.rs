/*!
 * codedigest - Consolidate a project's source files into one Markdown document
 *
 * This library walks a project directory, keeps the files its inclusion
 * policy selects, optionally strips their comments, and renders a single
 * Markdown document with statistics, a directory tree and every file's
 * content, for use as context for Large Language Models.
 */

pub mod config;
pub mod error;
pub mod interrupt;
pub mod language;
pub mod logging;
pub mod policy;
pub mod prompt;
pub mod report;
pub mod scanner;
pub mod strip;
pub mod tree;
pub mod types;
pub mod utils;
pub mod writer;

#[cfg(test)]
mod tests;

// Re-export main components for easier access
pub use config::{Args, Config, Options, ReportFormat};
pub use error::{CodeDigestError, Result};
pub use language::{Family, Language};
pub use policy::{is_included, InclusionPolicy, MarkdownMode, Profile};
pub use report::{FileReportInfo, Reporter, ScanReport};
pub use scanner::Scanner;
pub use strip::strip;
pub use types::{Digest, DirectoryGroup, SourceFile, Statistics};
pub use utils::format_file_size;
pub use writer::MarkdownWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
