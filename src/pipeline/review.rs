// Review pipeline: a staff member approves or rejects a stored comment.
//
// Reviews work on any decision, not just PENDING, so staff can also rescue
// a false-positive rejection or pull an approved comment down.

use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

use crate::comments::ReviewAction;
use crate::db::models::Comment;
use crate::db::queries;

/// Apply `action` to comment `id` on behalf of `reviewer`.
pub fn run(conn: &Connection, id: i64, action: &ReviewAction, reviewer: &str) -> Result<Comment> {
    let reviewer = reviewer.trim();
    if reviewer.is_empty() {
        anyhow::bail!("A reviewer name is required to review comments");
    }

    let Some(before) = queries::get_comment(conn, id)? else {
        anyhow::bail!("No comment with id {id}");
    };

    let (decision, reason) = action.outcome();
    let moderated_by = format!("staff:{reviewer}");
    queries::review_comment(conn, id, decision, &reason, &moderated_by)?;

    info!(
        id,
        from = %before.decision,
        to = %decision,
        reviewer,
        "Comment reviewed"
    );

    match queries::get_comment(conn, id)? {
        Some(comment) => Ok(comment),
        None => anyhow::bail!("Comment {id} disappeared during review"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::Submitter;
    use crate::db::schema::create_tables;
    use crate::moderation::{Decision, ModerationThresholds};

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    #[test]
    fn test_approve_rejected_comment() {
        let conn = setup();
        let stored = crate::pipeline::submit::run(
            &conn,
            1,
            None,
            "Mert",
            "see my portfolio at www.example.com for details",
            &Submitter::member("mert"),
            &ModerationThresholds::default(),
        )
        .unwrap();
        assert_eq!(stored.decision, Decision::Rejected);

        let reviewed = run(&conn, stored.id, &ReviewAction::Approve, "editor").unwrap();
        assert_eq!(reviewed.decision, Decision::Approved);
        assert_eq!(reviewed.reason, "approved by staff");
        assert_eq!(reviewed.moderated_by.as_deref(), Some("staff:editor"));
        assert!(reviewed.is_visible());
    }

    #[test]
    fn test_unknown_comment_is_an_error() {
        let conn = setup();
        let err = run(&conn, 77, &ReviewAction::Approve, "editor").unwrap_err();
        assert!(err.to_string().contains("77"));
    }

    #[test]
    fn test_reviewer_required() {
        let conn = setup();
        assert!(run(&conn, 1, &ReviewAction::Approve, "  ").is_err());
    }
}
