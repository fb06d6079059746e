// Markdown audit report.
//
// Rejected comments are hidden from readers but their reasons are kept, and
// this report is where staff read them. It also lists the review queue.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use crate::db::models::{Comment, DecisionCounts};

/// Most comments listed per section; the totals table always counts all of them.
pub const REPORT_ROW_LIMIT: u32 = 500;

/// Render the report as a markdown string.
///
/// `pending` and `rejected` may be the newest slice of a longer list; section
/// headings use the totals from `counts` and say when rows were left out.
pub fn render_report(counts: &DecisionCounts, pending: &[Comment], rejected: &[Comment]) -> String {
    let mut md = String::new();

    let _ = writeln!(md, "# Comment moderation report\n");
    let _ = writeln!(md, "| Decision | Comments |");
    let _ = writeln!(md, "|---|---|");
    let _ = writeln!(md, "| Approved | {} |", counts.approved);
    let _ = writeln!(md, "| Pending | {} |", counts.pending);
    let _ = writeln!(md, "| Rejected | {} |", counts.rejected);
    let _ = writeln!(md, "| **Total** | **{}** |\n", counts.total());

    let _ = writeln!(md, "## Awaiting review ({})\n", counts.pending);
    write_truncation_note(&mut md, pending.len(), counts.pending);
    write_table(&mut md, pending);

    let _ = writeln!(md, "## Rejected ({})\n", counts.rejected);
    write_truncation_note(&mut md, rejected.len(), counts.rejected);
    write_table(&mut md, rejected);

    md
}

/// Render the report and write it to `path`, creating parent directories.
/// Returns the path as a string for display.
pub fn generate_report(
    counts: &DecisionCounts,
    pending: &[Comment],
    rejected: &[Comment],
    path: &str,
) -> Result<String> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create report directory for {path}"))?;
        }
    }

    let md = render_report(counts, pending, rejected);
    std::fs::write(path, md).with_context(|| format!("Failed to write report to {path}"))?;
    Ok(path.to_string())
}

fn write_truncation_note(md: &mut String, shown: usize, total: i64) {
    if (shown as i64) < total {
        let _ = writeln!(md, "_Showing the newest {shown} of {total}._\n");
    }
}

fn write_table(md: &mut String, comments: &[Comment]) {
    if comments.is_empty() {
        let _ = writeln!(md, "_None._\n");
        return;
    }

    let _ = writeln!(md, "| ID | Post | Author | Tox | Reason | Moderated by | Text |");
    let _ = writeln!(md, "|---|---|---|---|---|---|---|");
    for c in comments {
        let text = super::truncate_chars(&super::single_line(&c.text), 80);
        let _ = writeln!(
            md,
            "| {} | {} | {} | {:.2} | {} | {} | {} |",
            c.id,
            c.post_id,
            escape_cell(c.display_author()),
            c.toxicity,
            escape_cell(&c.reason),
            c.moderated_by.as_deref().unwrap_or("auto"),
            escape_cell(&text),
        );
    }
    md.push('\n');
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
