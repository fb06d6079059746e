// Rescore pipeline: re-run the scorer over stored comments.
//
// Used after the thresholds change. Only comments the scorer decided are
// touched; superuser bypasses and staff reviews keep their decision.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rusqlite::Connection;
use tracing::info;

use crate::db::queries;
use crate::moderation::{evaluate_with, ModerationThresholds};

/// What a rescore changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RescoreSummary {
    /// Automatically-moderated comments examined
    pub examined: usize,
    /// Comments whose decision changed
    pub changed: usize,
}

/// Rescore every automatically-moderated comment with `thresholds`.
pub fn run(
    conn: &Connection,
    thresholds: &ModerationThresholds,
    show_progress: bool,
) -> Result<RescoreSummary> {
    let comments = queries::list_auto_moderated(conn)?;
    info!(count = comments.len(), "Rescoring automatically moderated comments");

    let pb = if show_progress {
        let pb = ProgressBar::new(comments.len() as u64);
        pb.set_style(ProgressStyle::default_bar().template("  Rescoring [{bar:30}] {pos}/{len}")?);
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut summary = RescoreSummary::default();
    for comment in &comments {
        let verdict = evaluate_with(&comment.text, thresholds);
        summary.examined += 1;
        if verdict.decision != comment.decision || verdict.reason != comment.reason {
            if verdict.decision != comment.decision {
                summary.changed += 1;
                info!(
                    id = comment.id,
                    from = %comment.decision,
                    to = %verdict.decision,
                    "Decision changed"
                );
            }
            queries::update_verdict(conn, comment.id, &verdict)?;
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(summary)
}
