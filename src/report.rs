/*!
 * Reporting functionality for dumpctx
 *
 * Renders a summary of a finished run as console tables using the tabled
 * library.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::types::{IncludedFile, SkippedFile, Snapshot};
use crate::utils::format_file_size;

/// Statistics for a finished run
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Output file path
    pub output_file: String,
    /// Time taken to collect and write
    pub duration: Duration,
    /// Files whose content was written
    pub included: Vec<IncludedFile>,
    /// Files that could not be read
    pub skipped: Vec<SkippedFile>,
    /// Number of directories in the tree
    pub directories: usize,
}

impl ScanReport {
    pub fn new(output_file: String, duration: Duration, snapshot: &Snapshot) -> Self {
        Self {
            output_file,
            duration,
            included: snapshot.included.clone(),
            skipped: snapshot.skipped.clone(),
            directories: snapshot.directories,
        }
    }

    /// Total bytes of included content
    pub fn total_size(&self) -> u64 {
        self.included.iter().map(|f| f.size).sum()
    }
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for run results
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
    pub fn generate_report(&self, report: &ScanReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &ScanReport) {
        println!("\n{}", self.generate_report(report));
    }

    // Keep the tail of long paths, cutting at a separator
    fn format_path(&self, path: &str, max_len: usize) -> String {
        if path.len() <= max_len {
            return path.to_string();
        }

        let mut segments = Vec::new();
        let mut current_len = 3; // "..."
        for part in path.split('/').rev() {
            let part_len = part.len() + 1;
            if current_len + part_len > max_len {
                break;
            }
            segments.push(part);
            current_len += part_len;
        }

        if segments.is_empty() {
            // a single oversized name: keep its last characters
            let tail: String = path
                .chars()
                .rev()
                .take(max_len.saturating_sub(3))
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            return format!("...{}", tail);
        }

        let mut result = String::from("...");
        for part in segments.iter().rev() {
            result.push('/');
            result.push_str(part);
        }
        result
    }

    fn styled(mut table: Table) -> String {
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));
        table.to_string()
    }

    fn create_summary_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let rows = vec![
            SummaryRow {
                key: "📂 Output File".to_string(),
                value: report.output_file.clone(),
            },
            SummaryRow {
                key: "⏱️ Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "📄 Files Included".to_string(),
                value: self.format_number(report.included.len()),
            },
            SummaryRow {
                key: "📁 Directories".to_string(),
                value: self.format_number(report.directories),
            },
            SummaryRow {
                key: "📦 Total Size".to_string(),
                value: format_file_size(report.total_size()),
            },
            SummaryRow {
                key: "⚠️ Unreadable Files".to_string(),
                value: self.format_number(report.skipped.len()),
            },
        ];

        Self::styled(Table::new(rows))
    }

    fn create_files_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Size")]
            size: String,
        }

        let mut files: Vec<&IncludedFile> = report.included.iter().collect();
        files.sort_by(|a, b| b.size.cmp(&a.size));

        let files_to_show = if files.len() > 15 {
            &files[0..10]
        } else {
            &files[..]
        };

        let rows: Vec<FileRow> = files_to_show
            .iter()
            .map(|file| FileRow {
                path: self.format_path(&file.path, 60),
                lines: self.format_number(file.lines),
                size: format_file_size(file.size),
            })
            .collect();

        Self::styled(Table::new(rows))
    }

    fn create_skipped_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SkippedRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Error")]
            reason: String,
        }

        let rows: Vec<SkippedRow> = report
            .skipped
            .iter()
            .map(|file| SkippedRow {
                path: self.format_path(&file.path, 60),
                reason: file.reason.clone(),
            })
            .collect();

        Self::styled(Table::new(rows))
    }

    fn generate_console_report(&self, report: &ScanReport) -> String {
        let files_title = if report.included.len() > 15 {
            "📋  TOP 10 LARGEST FILES"
        } else {
            "📋  INCLUDED FILES"
        };

        let mut out = format!("{}\n{}\n", files_title, self.create_files_table(report));

        if !report.skipped.is_empty() {
            out.push_str(&format!(
                "\n⚠️  UNREADABLE FILES\n{}\n",
                self.create_skipped_table(report)
            ));
        }

        out.push_str(&format!(
            "\n✅  SNAPSHOT COMPLETE\n{}",
            self.create_summary_table(report)
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(included: usize, skipped: usize) -> ScanReport {
        ScanReport {
            output_file: "/tmp/context.txt".to_string(),
            duration: Duration::from_millis(5),
            included: (0..included)
                .map(|i| IncludedFile {
                    path: format!("src/file{}.rs", i),
                    size: (i as u64 + 1) * 100,
                    lines: i + 1,
                })
                .collect(),
            skipped: (0..skipped)
                .map(|i| SkippedFile {
                    path: format!("gone{}.rs", i),
                    reason: "No such file or directory".to_string(),
                })
                .collect(),
            directories: 1,
        }
    }

    #[test]
    fn lists_all_files_when_few() {
        let text = Reporter::new(ReportFormat::ConsoleTable).generate_report(&report(3, 0));
        assert!(text.contains("INCLUDED FILES"));
        assert!(text.contains("src/file0.rs"));
        assert!(text.contains("src/file2.rs"));
        assert!(text.contains("/tmp/context.txt"));
        assert!(!text.contains("UNREADABLE FILES"));
    }

    #[test]
    fn lists_top_ten_when_many() {
        let text = Reporter::new(ReportFormat::ConsoleTable).generate_report(&report(20, 0));
        assert!(text.contains("TOP 10 LARGEST FILES"));
        // largest sizes belong to the highest indices
        assert!(text.contains("src/file19.rs"));
        assert!(!text.contains("src/file0.rs "));
    }

    #[test]
    fn shows_unreadable_files() {
        let text = Reporter::new(ReportFormat::ConsoleTable).generate_report(&report(1, 2));
        assert!(text.contains("UNREADABLE FILES"));
        assert!(text.contains("gone1.rs"));
    }

    #[test]
    fn truncates_long_paths() {
        let reporter = Reporter::new(ReportFormat::ConsoleTable);
        let long = format!("{}tail/name.rs", "segment/".repeat(10));
        let formatted = reporter.format_path(&long, 20);
        assert!(formatted.starts_with("..."));
        assert!(formatted.ends_with("/tail/name.rs"));
        assert!(formatted.len() <= 20);
        assert_eq!(reporter.format_path("short.rs", 20), "short.rs");
    }
}
