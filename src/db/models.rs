// Data models — Rust structs that map to database rows.
//
// These are separate from the queries so other modules can use them without
// depending on rusqlite directly.

use serde::{Deserialize, Serialize};

use crate::moderation::Decision;

/// A stored comment together with the moderation outcome it was saved with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    /// Username of the logged-in author, if any
    pub username: Option<String>,
    pub author_name: String,
    pub text: String,
    pub created_at: String,
    pub toxicity: f64,
    pub sentiment: f64,
    pub is_spam: bool,
    pub decision: Decision,
    pub reason: String,
    /// NULL when the automatic scorer decided; `superuser:<name>` or
    /// `staff:<name>` otherwise
    pub moderated_by: Option<String>,
    pub moderated_at: Option<String>,
    /// Set on replies: the top-level comment they answer
    pub parent_id: Option<i64>,
}

impl Comment {
    /// Only approved comments are rendered to readers.
    pub fn is_visible(&self) -> bool {
        self.decision.is_visible()
    }

    /// Anything not approved is flagged for staff attention.
    pub fn is_flagged(&self) -> bool {
        !self.is_visible()
    }

    /// True when the decision came from the scorer rather than a person.
    pub fn is_auto_moderated(&self) -> bool {
        self.moderated_by.is_none()
    }

    /// Display name: the author field, falling back to the username.
    pub fn display_author(&self) -> &str {
        if !self.author_name.is_empty() {
            &self.author_name
        } else {
            self.username.as_deref().unwrap_or("anonymous")
        }
    }
}

/// A visible top-level comment with its visible replies, oldest reply first.
#[derive(Debug, Clone, Serialize)]
pub struct CommentThread {
    pub comment: Comment,
    pub replies: Vec<Comment>,
}

/// Number of stored comments per decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DecisionCounts {
    pub approved: i64,
    pub pending: i64,
    pub rejected: i64,
}

impl DecisionCounts {
    pub fn total(&self) -> i64 {
        self.approved + self.pending + self.rejected
    }
}
