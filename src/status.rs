// System status display — database size, comment totals, latest comments.

use anyhow::Result;
use std::path::Path;

use crate::db;
use crate::db::queries;
use crate::moderation::ModerationThresholds;
use crate::output::terminal;

/// Display system status to the terminal.
pub fn show(db_path: &str, thresholds: &ModerationThresholds) -> Result<()> {
    println!(
        "Thresholds: reject at toxicity >= {:.2}, review at >= {:.2}",
        thresholds.reject_toxicity, thresholds.review_toxicity
    );

    if !Path::new(db_path).exists() {
        println!("Database: not initialized");
        println!("\nRun `quill init` to set up the database.");
        return Ok(());
    }

    let file_size = std::fs::metadata(db_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", db_path, file_size);

    let conn = db::open(db_path)?;
    let counts = queries::decision_counts(&conn)?;
    println!("Comments: {} total", counts.total());
    terminal::display_decision_summary(&counts);

    if counts.pending > 0 {
        println!("  Run `quill queue` to review pending comments");
    }

    let recent = queries::list_recent(&conn, 5)?;
    if !recent.is_empty() {
        terminal::display_comment_list("Most recent", &recent);
    }

    Ok(())
}

/// Format a byte count as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
