//! Terminal rendering helpers
//!
//! Status labels and messages, duration/size formatting, and the bounded
//! results preview table.

use colored::*;
use serde_json::Value;

use actrun_core::domain::run::RunStatus;

const PREVIEW_MAX_ROWS: usize = 20;
const PREVIEW_MAX_COLS: usize = 8;
const PREVIEW_CELL_WIDTH: usize = 40;

/// Human label for a run status
pub fn status_label(status: RunStatus) -> &'static str {
    match status {
        RunStatus::Ready => "Ready",
        RunStatus::Running => "Running",
        RunStatus::Succeeded => "Completed",
        RunStatus::Failed => "Failed",
        RunStatus::Aborted => "Aborted",
        RunStatus::TimingOut => "Timing Out",
        RunStatus::TimedOut => "Timed Out",
    }
}

/// One-line progress message for a run status
pub fn status_message(status: RunStatus) -> &'static str {
    match status {
        RunStatus::Ready => "Preparing to start...",
        RunStatus::Running => "Processing your request...",
        RunStatus::Succeeded => "Actor completed successfully!",
        RunStatus::Failed => "Actor run failed. Check the logs for details.",
        RunStatus::Aborted => "Actor run was aborted.",
        RunStatus::TimingOut => "Actor is taking longer than expected...",
        RunStatus::TimedOut => "Actor run timed out.",
    }
}

/// Colorize a run status for display
pub fn colorize_status(status: RunStatus) -> ColoredString {
    let label = status_label(status);
    match status {
        RunStatus::Ready => label.yellow(),
        RunStatus::Running | RunStatus::TimingOut => label.cyan(),
        RunStatus::Succeeded => label.green(),
        RunStatus::Failed | RunStatus::TimedOut => label.red(),
        RunStatus::Aborted => label.dimmed(),
    }
}

/// Truncate text for single-line display
pub fn truncate(text: &str, length: usize) -> String {
    if text.chars().count() > length {
        let cut: String = text.chars().take(length).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

/// Format a byte count for the stats card
pub fn format_bytes(bytes: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let exp = (bytes as f64).log(1024.0).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exp as i32);
    format!("{:.2} {}", value, UNITS[exp])
        .replace(".00 ", " ")
}

/// Format an elapsed duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let seconds = duration.as_secs();
    let minutes = seconds / 60;
    let hours = minutes / 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds % 60)
    } else {
        format!("{}s", seconds)
    }
}

/// Render a bounded preview table of result records.
///
/// Columns are the union of record keys in order of first appearance,
/// capped at [`PREVIEW_MAX_COLS`]; rows are capped at [`PREVIEW_MAX_ROWS`];
/// cells are truncated. Returns `None` when there is nothing tabular to
/// show.
pub fn preview_table(results: &Value) -> Option<String> {
    let records = results.as_array()?;
    if records.is_empty() {
        return None;
    }

    let mut columns: Vec<String> = Vec::new();
    for record in records {
        if let Some(obj) = record.as_object() {
            for key in obj.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }
    }
    columns.truncate(PREVIEW_MAX_COLS);
    if columns.is_empty() {
        return None;
    }

    let rows: Vec<Vec<String>> = records
        .iter()
        .take(PREVIEW_MAX_ROWS)
        .map(|record| {
            columns
                .iter()
                .map(|col| {
                    let cell = match record.get(col) {
                        None | Some(Value::Null) => String::new(),
                        Some(Value::String(s)) => s.clone(),
                        Some(other) => other.to_string(),
                    };
                    truncate(&cell, PREVIEW_CELL_WIDTH)
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .max()
                .unwrap_or(0)
                .max(col.chars().count())
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(col, w)| format!("{:<width$}", col, width = *w))
        .collect();
    out.push_str(&header.join("  "));
    out.push('\n');

    let total_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    out.push_str(&"─".repeat(total_width));
    out.push('\n');

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect();
        out.push_str(&line.join("  "));
        out.push('\n');
    }

    Some(out)
}

/// Print the summary statistics for a result set
pub fn print_result_stats(results: &Value, elapsed: Option<std::time::Duration>) {
    let count = results.as_array().map_or(1, Vec::len);
    let size = serde_json::to_string(results).map(|s| s.len()).unwrap_or(0);

    println!("{}", "Statistics:".bold());
    println!("  Total Items: {}", count.to_string().cyan());
    println!("  Data Size:   {}", format_bytes(size).cyan());
    if let Some(elapsed) = elapsed {
        println!("  Execution:   {}", format_duration(elapsed).cyan());
    }
    if let Some(first) = results.as_array().and_then(|r| r.first())
        && let Some(obj) = first.as_object()
    {
        println!("  Fields:      {}", obj.len().to_string().cyan());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer piece of text", 8), "a longer...");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 Bytes");
        assert_eq!(format_bytes(512), "512 Bytes");
        assert_eq!(format_bytes(2048), "2 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3 MB");
    }

    #[test]
    fn test_format_duration() {
        use std::time::Duration;
        assert_eq!(format_duration(Duration::from_secs(42)), "42s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_duration(Duration::from_secs(3700)), "1h 1m");
    }

    #[test]
    fn test_preview_table_shape() {
        let results = json!([
            { "name": "a", "value": 1 },
            { "name": "b", "extra": true }
        ]);
        let table = preview_table(&results).unwrap();
        let mut lines = table.lines();

        let header = lines.next().unwrap();
        assert!(header.contains("name"));
        assert!(header.contains("value"));
        assert!(header.contains("extra"));

        // Separator plus one line per record.
        assert_eq!(lines.count(), 3);
    }

    #[test]
    fn test_preview_table_rejects_non_tabular() {
        assert!(preview_table(&json!([])).is_none());
        assert!(preview_table(&json!({ "not": "an array" })).is_none());
        assert!(preview_table(&json!([1, 2, 3])).is_none());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(status_label(RunStatus::Succeeded), "Completed");
        assert_eq!(status_label(RunStatus::TimedOut), "Timed Out");
        assert_eq!(status_message(RunStatus::Running), "Processing your request...");
    }
}
