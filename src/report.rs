use crate::diff::{ChangeReport, ChangeType};
use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// Only new, deleted and modified files.
    Changes,
    /// Unchanged files as well.
    All,
}

fn status_code(change_type: ChangeType) -> &'static str {
    match change_type {
        ChangeType::New => "A",
        ChangeType::Deleted => "D",
        ChangeType::Modified => "M",
        ChangeType::Unchanged => ".",
    }
}

pub fn print_report(report: &ChangeReport, mode: ReportMode) {
    for line in format_report(report, mode, Local::now()) {
        println!("{}", line);
    }
}

fn format_report(report: &ChangeReport, mode: ReportMode, now: DateTime<Local>) -> Vec<String> {
    let mut lines = vec![format!(
        "Integrity scan report ({})",
        now.format("%Y-%m-%d %H:%M:%S")
    )];

    for (path, change_type) in report.entries() {
        if change_type == ChangeType::Unchanged && mode == ReportMode::Changes {
            continue;
        }
        lines.push(format!("{:<2} {}", status_code(change_type), path));
    }

    if report.is_clean() {
        lines.push("No changes detected.".to_string());
    } else {
        lines.push(String::new());
        lines.push(format!(
            "{} new, {} deleted, {} modified",
            report.new.len(),
            report.deleted.len(),
            report.modified.len()
        ));
    }

    lines
}
