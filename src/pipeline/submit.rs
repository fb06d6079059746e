// Submission pipeline: score a new comment once and store it with its verdict.

use anyhow::Result;
use rusqlite::Connection;
use tracing::{debug, info};

use crate::comments::{moderate_submission, normalize_text, Submitter};
use crate::db::models::Comment;
use crate::db::queries;
use crate::moderation::ModerationThresholds;

/// Moderate and persist a new comment on `post_id`, returning the stored row.
///
/// The text is trimmed first; empty or overlong text is an error and nothing
/// is stored. `parent_id` makes the comment a reply. A parent that doesn't
/// exist or belongs to another post is ignored and the comment is stored as
/// top-level. Replies to a reply are attached to that reply's parent.
pub fn run(
    conn: &Connection,
    post_id: i64,
    parent_id: Option<i64>,
    author_name: &str,
    text: &str,
    submitter: &Submitter,
    thresholds: &ModerationThresholds,
) -> Result<Comment> {
    let text = normalize_text(text)?;
    let mut submission = moderate_submission(post_id, author_name, text, submitter, thresholds);
    if let Some(parent_id) = parent_id {
        submission.comment.parent_id = resolve_parent(conn, post_id, parent_id)?;
    }
    debug!(
        post_id,
        toxicity = submission.verdict.toxicity,
        sentiment = submission.verdict.sentiment,
        is_spam = submission.verdict.is_spam,
        "Comment scored"
    );

    let id = queries::insert_comment(conn, &submission)?;
    info!(
        id,
        post_id,
        decision = %submission.verdict.decision,
        reason = %submission.verdict.reason,
        "Comment stored"
    );

    match queries::get_comment(conn, id)? {
        Some(comment) => Ok(comment),
        None => anyhow::bail!("Comment {id} disappeared right after insert"),
    }
}

fn resolve_parent(conn: &Connection, post_id: i64, parent_id: i64) -> Result<Option<i64>> {
    match queries::get_comment(conn, parent_id)? {
        Some(parent) if parent.post_id == post_id => {
            Ok(Some(parent.parent_id.unwrap_or(parent.id)))
        }
        _ => {
            debug!(post_id, parent_id, "Parent not found on this post, storing as top-level");
            Ok(None)
        }
    }
}
