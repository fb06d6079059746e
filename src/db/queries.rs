// Database queries — CRUD operations for comments.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust interfaces.

use std::collections::HashMap;

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::models::{Comment, CommentThread, DecisionCounts};
use crate::comments::ModeratedSubmission;
use crate::moderation::{Decision, ModerationVerdict};

const COMMENT_COLUMNS: &str = "id, post_id, username, author_name, text, created_at,
    toxicity, sentiment, is_spam, decision, reason, moderated_by, moderated_at, parent_id";

/// Map a row selected with `COMMENT_COLUMNS` into a Comment.
fn row_to_comment(row: &Row<'_>) -> rusqlite::Result<Comment> {
    let decision_str: String = row.get(9)?;
    // An unknown decision string means someone edited the file by hand;
    // keep the comment hidden rather than failing the whole listing.
    let decision = Decision::parse(&decision_str).unwrap_or(Decision::Pending);
    Ok(Comment {
        id: row.get(0)?,
        post_id: row.get(1)?,
        username: row.get(2)?,
        author_name: row.get(3)?,
        text: row.get(4)?,
        created_at: row.get(5)?,
        toxicity: row.get(6)?,
        sentiment: row.get(7)?,
        is_spam: row.get(8)?,
        decision,
        reason: row.get(10)?,
        moderated_by: row.get(11)?,
        moderated_at: row.get(12)?,
        parent_id: row.get(13)?,
    })
}

/// Store a moderated submission and return its new id.
pub fn insert_comment(conn: &Connection, submission: &ModeratedSubmission) -> Result<i64> {
    let comment = &submission.comment;
    let verdict = &submission.verdict;

    conn.execute(
        "INSERT INTO comments (post_id, username, author_name, text, toxicity, sentiment,
                               is_spam, decision, reason, moderated_by, moderated_at,
                               parent_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                 CASE WHEN ?10 IS NULL THEN NULL ELSE datetime('now') END, ?11)",
        params![
            comment.post_id,
            comment.username,
            comment.author_name,
            comment.text,
            verdict.toxicity,
            verdict.sentiment,
            verdict.is_spam,
            verdict.decision.as_str(),
            verdict.reason,
            submission.moderated_by,
            comment.parent_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Load a single comment by id.
pub fn get_comment(conn: &Connection, id: i64) -> Result<Option<Comment>> {
    let sql = format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = ?1");
    let result = conn
        .query_row(&sql, params![id], row_to_comment)
        .optional()?;
    Ok(result)
}

/// What readers see on a post: approved top-level comments, newest first,
/// each with its approved replies, oldest first. Replies under a hidden
/// comment stay hidden.
pub fn list_visible_for_post(conn: &Connection, post_id: i64) -> Result<Vec<CommentThread>> {
    let sql = format!(
        "SELECT {COMMENT_COLUMNS} FROM comments
         WHERE post_id = ?1 AND decision = ?2 AND parent_id IS NULL
         ORDER BY created_at DESC, id DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![post_id, Decision::Approved.as_str()],
        row_to_comment,
    )?;

    let mut threads = Vec::new();
    let mut by_id = HashMap::new();
    for row in rows {
        let comment = row?;
        by_id.insert(comment.id, threads.len());
        threads.push(CommentThread {
            comment,
            replies: Vec::new(),
        });
    }

    let sql = format!(
        "SELECT {COMMENT_COLUMNS} FROM comments
         WHERE post_id = ?1 AND decision = ?2 AND parent_id IS NOT NULL
         ORDER BY created_at ASC, id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![post_id, Decision::Approved.as_str()],
        row_to_comment,
    )?;

    for row in rows {
        let reply = row?;
        let slot = reply.parent_id.and_then(|parent| by_id.get(&parent));
        if let Some(&index) = slot {
            threads[index].replies.push(reply);
        }
    }
    Ok(threads)
}

/// Comments with a given decision, newest first (the review queue for PENDING).
pub fn list_by_decision(conn: &Connection, decision: Decision, limit: u32) -> Result<Vec<Comment>> {
    let sql = format!(
        "SELECT {COMMENT_COLUMNS} FROM comments
         WHERE decision = ?1
         ORDER BY created_at DESC, id DESC
         LIMIT ?2"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![decision.as_str(), limit], row_to_comment)?;

    let mut comments = Vec::new();
    for row in rows {
        comments.push(row?);
    }
    Ok(comments)
}

/// Most recently created comments regardless of decision.
pub fn list_recent(conn: &Connection, limit: u32) -> Result<Vec<Comment>> {
    let sql = format!(
        "SELECT {COMMENT_COLUMNS} FROM comments
         ORDER BY created_at DESC, id DESC
         LIMIT ?1"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![limit], row_to_comment)?;

    let mut comments = Vec::new();
    for row in rows {
        comments.push(row?);
    }
    Ok(comments)
}

/// Comments whose decision came from the scorer (no human involved).
/// These are the ones a rescore may change.
pub fn list_auto_moderated(conn: &Connection) -> Result<Vec<Comment>> {
    let sql = format!(
        "SELECT {COMMENT_COLUMNS} FROM comments
         WHERE moderated_by IS NULL
         ORDER BY id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], row_to_comment)?;

    let mut comments = Vec::new();
    for row in rows {
        comments.push(row?);
    }
    Ok(comments)
}

/// Apply a staff decision. Returns false if the comment doesn't exist.
pub fn review_comment(
    conn: &Connection,
    id: i64,
    decision: Decision,
    reason: &str,
    moderated_by: &str,
) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE comments
         SET decision = ?2, reason = ?3, moderated_by = ?4, moderated_at = datetime('now')
         WHERE id = ?1",
        params![id, decision.as_str(), reason, moderated_by],
    )?;
    Ok(changed > 0)
}

/// Overwrite the automatic verdict on a comment (used by rescoring).
/// Rows a person has moderated are left alone.
pub fn update_verdict(conn: &Connection, id: i64, verdict: &ModerationVerdict) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE comments
         SET toxicity = ?2, sentiment = ?3, is_spam = ?4, decision = ?5, reason = ?6
         WHERE id = ?1 AND moderated_by IS NULL",
        params![
            id,
            verdict.toxicity,
            verdict.sentiment,
            verdict.is_spam,
            verdict.decision.as_str(),
            verdict.reason,
        ],
    )?;
    Ok(changed > 0)
}

/// Count comments per decision.
pub fn decision_counts(conn: &Connection) -> Result<DecisionCounts> {
    let mut stmt = conn.prepare("SELECT decision, COUNT(*) FROM comments GROUP BY decision")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?;

    let mut counts = DecisionCounts::default();
    for row in rows {
        let (decision, count) = row?;
        match Decision::parse(&decision) {
            Some(Decision::Approved) => counts.approved += count,
            Some(Decision::Rejected) => counts.rejected += count,
            // Unparseable rows are shown as pending, matching row_to_comment
            Some(Decision::Pending) | None => counts.pending += count,
        }
    }
    Ok(counts)
}
