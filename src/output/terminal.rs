// Colored terminal output for verdicts and comment lists.
//
// This module handles all terminal-specific formatting: colors and tables.
// The main.rs commands delegate here.

use colored::Colorize;

use crate::db::models::{Comment, CommentThread, DecisionCounts};
use crate::moderation::{Decision, ModerationVerdict};

/// Display the full verdict for one piece of text.
pub fn display_verdict(text: &str, verdict: &ModerationVerdict) {
    println!("\n{}", "=== Moderation verdict ===".bold());
    println!("  Text: {}", super::truncate_chars(text, 120).dimmed());
    println!("  Decision: {}", colorize_decision(verdict.decision));
    println!("  Reason: {}", verdict.reason);
    println!("  Toxicity: {:.3}", verdict.toxicity);
    println!("  Sentiment: {:+.3}", verdict.sentiment);

    let spam = if verdict.is_spam {
        "yes".red().to_string()
    } else {
        "no".green().to_string()
    };
    println!("  Spam: {spam}");
    for reason in &verdict.spam_reasons {
        println!("    - {reason}");
    }
}

/// One line per text: decision, scores and a preview. Used by `check --file`.
pub fn display_batch(results: &[(String, ModerationVerdict)]) {
    println!(
        "\n{}",
        format!("=== Checked {} comments ===", results.len()).bold()
    );
    println!();
    println!(
        "  {:>4}  {:<10} {:>5} {:>6}  {}",
        "#".dimmed(),
        "Decision".dimmed(),
        "Tox".dimmed(),
        "Sent".dimmed(),
        "Text".dimmed(),
    );
    println!("  {}", "-".repeat(78).dimmed());

    for (i, (text, verdict)) in results.iter().enumerate() {
        println!(
            "  {:>4}. {:<10} {:>5.2} {:>+6.2}  {}",
            i + 1,
            colorize_decision(verdict.decision),
            verdict.toxicity,
            verdict.sentiment,
            super::truncate_chars(text, 50),
        );
    }

    let counts = tally(results.iter().map(|(_, v)| v.decision));
    println!();
    display_decision_summary(&counts);
}

/// A table of stored comments.
pub fn display_comment_list(title: &str, comments: &[Comment]) {
    println!(
        "\n{}",
        format!("=== {title} ({} comments) ===", comments.len()).bold()
    );
    if comments.is_empty() {
        println!("  Nothing here.");
        return;
    }
    println!();

    for comment in comments {
        print_comment(comment, "  ");
    }
    println!();
}

/// What readers see on a post: top-level comments with replies indented.
pub fn display_threads(title: &str, threads: &[CommentThread]) {
    let replies: usize = threads.iter().map(|t| t.replies.len()).sum();
    println!(
        "\n{}",
        format!("=== {title} ({} comments, {replies} replies) ===", threads.len()).bold()
    );
    if threads.is_empty() {
        println!("  Nothing here.");
        return;
    }
    println!();

    for thread in threads {
        print_comment(&thread.comment, "  ");
        for reply in &thread.replies {
            print_comment(reply, "      ↳ ");
        }
    }
    println!();
}

fn print_comment(comment: &Comment, indent: &str) {
    let pad = " ".repeat(indent.chars().count());
    println!(
        "{indent}#{:<5} post {:<5} {:<10} {:<20} {}",
        comment.id,
        comment.post_id,
        colorize_decision(comment.decision),
        super::truncate_chars(comment.display_author(), 20),
        comment.created_at.dimmed(),
    );
    println!("{pad}       \"{}\"", super::truncate_chars(&comment.text, 100));
    let by = comment
        .moderated_by
        .as_deref()
        .map(|who| format!(" ({who})"))
        .unwrap_or_default();
    println!(
        "{pad}       {} tox {:.2}  sent {:+.2}{}",
        comment.reason.dimmed(),
        comment.toxicity,
        comment.sentiment,
        by.dimmed(),
    );
}

/// Per-decision totals with the usual color coding.
pub fn display_decision_summary(counts: &DecisionCounts) {
    println!("  {} approved", counts.approved.to_string().green());
    if counts.pending > 0 {
        println!("  {} awaiting review", counts.pending.to_string().yellow());
    }
    if counts.rejected > 0 {
        println!("  {} rejected", counts.rejected.to_string().red());
    }
}

fn tally(decisions: impl Iterator<Item = Decision>) -> DecisionCounts {
    let mut counts = DecisionCounts::default();
    for decision in decisions {
        match decision {
            Decision::Approved => counts.approved += 1,
            Decision::Pending => counts.pending += 1,
            Decision::Rejected => counts.rejected += 1,
        }
    }
    counts
}

/// Colorize a decision.
fn colorize_decision(decision: Decision) -> colored::ColoredString {
    match decision {
        Decision::Approved => decision.as_str().green(),
        Decision::Pending => decision.as_str().yellow(),
        Decision::Rejected => decision.as_str().red().bold(),
    }
}
