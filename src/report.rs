/*!
 * Reporting functionality for codedigest
 *
 * Summarizes a finished run either as console tables rendered with the
 * tabled library or as a single JSON object.
 */

use std::time::Duration;

use serde::{Serialize, Serializer};
use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::config::{Options, ReportFormat};
use crate::error::Result;
use crate::policy::Profile;
use crate::types::{Digest, Statistics};
use crate::utils::format_file_size;

/// Information about a file in the report
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileReportInfo {
    /// Path relative to the scan root
    pub path: String,
    /// Size on disk in bytes
    pub size: u64,
    /// Lines before comment stripping
    pub original_lines: usize,
    /// Lines written to the document
    pub lines: usize,
    /// Whether the file could not be read
    pub read_failed: bool,
}

/// Summary of one run
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Output file path
    pub output_file: String,
    /// Time taken to scan and write
    #[serde(serialize_with = "serialize_duration")]
    pub duration: Duration,
    /// Effective options
    pub options: Options,
    /// Profile in use
    pub profile: Profile,
    /// Aggregate statistics
    pub statistics: Statistics,
    /// Details for each file, in document order
    pub files: Vec<FileReportInfo>,
}

impl ScanReport {
    /// Build a report from a written digest
    pub fn new(
        digest: &Digest,
        output_file: String,
        duration: Duration,
        options: Options,
        profile: Profile,
    ) -> Self {
        let files = digest
            .files()
            .map(|file| FileReportInfo {
                path: file.path.display().to_string(),
                size: file.size,
                original_lines: file.original_lines,
                lines: file.lines(),
                read_failed: file.read_failed,
            })
            .collect();

        Self {
            output_file,
            duration,
            options,
            profile,
            statistics: digest.statistics(),
            files,
        }
    }

    /// Lines removed by comment stripping, over readable files
    pub fn lines_removed(&self) -> usize {
        self.files
            .iter()
            .filter(|f| !f.read_failed)
            .map(|f| f.original_lines.saturating_sub(f.lines))
            .sum()
    }

    /// Files whose content is an error marker
    pub fn unreadable(&self) -> usize {
        self.files.iter().filter(|f| f.read_failed).count()
    }
}

fn serialize_duration<S: Serializer>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Report generator for scan results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &ScanReport) -> Result<String> {
        match self.format {
            ReportFormat::Table => Ok(self.generate_console_report(report)),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &ScanReport) -> Result<()> {
        println!("\n{}", self.generate_report(report)?);
        Ok(())
    }

    fn create_summary_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let stats = &report.statistics;
        let mut rows = vec![
            SummaryRow {
                key: "📂 Output File".to_string(),
                value: report.output_file.clone(),
            },
            SummaryRow {
                key: "⏱️ Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "📁 Directories".to_string(),
                value: self.format_number(stats.total_directories),
            },
            SummaryRow {
                key: "📄 Files Processed".to_string(),
                value: self.format_number(stats.total_files),
            },
            SummaryRow {
                key: "📦 Total Size".to_string(),
                value: format_file_size(stats.total_size),
            },
        ];

        if report.options.remove_comments {
            rows.push(SummaryRow {
                key: "✂️ Comment Lines Removed".to_string(),
                value: self.format_number(report.lines_removed()),
            });
        }

        let unreadable = report.unreadable();
        if unreadable > 0 {
            rows.push(SummaryRow {
                key: "⚠️ Unreadable Files".to_string(),
                value: unreadable.to_string(),
            });
        }

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_files_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Size")]
            size: String,

            #[tabled(rename = "Lines")]
            lines: String,
        }

        // Largest first
        let mut files: Vec<_> = report.files.iter().collect();
        files.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));

        let files_to_show = if files.len() > 15 {
            &files[0..10]
        } else {
            &files[..]
        };

        let rows: Vec<FileRow> = files_to_show
            .iter()
            .map(|info| FileRow {
                path: crate::utils::truncate_display(&info.path, 60),
                size: format_file_size(info.size),
                lines: self.format_number(info.lines),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn generate_console_report(&self, report: &ScanReport) -> String {
        let summary_table = self.create_summary_table(report);
        let files_table = self.create_files_table(report);

        let summary_title = "✅  ANALYSIS COMPLETE";
        let files_title = if report.files.len() > 15 {
            "📋  TOP 10 LARGEST FILES"
        } else {
            "📋  INCLUDED FILES"
        };

        format!(
            "{}\n{}\n\n{}\n{}",
            files_title, files_table, summary_title, summary_table
        )
    }
}
