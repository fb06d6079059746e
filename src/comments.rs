// Comment submission and review policy.
//
// This is the glue between a new comment and the scorer: who submitted it
// decides whether it is scored at all, and staff review actions map to a
// new decision plus an audit reason. Persistence lives in `pipeline`.

use anyhow::Result;

use crate::moderation::spam::is_space;
use crate::moderation::{evaluate_with, Decision, ModerationThresholds, ModerationVerdict};

/// Longest comment accepted, in characters, after trimming.
pub const MAX_COMMENT_CHARS: usize = 250;

/// Who is posting a comment.
#[derive(Debug, Clone, Default)]
pub struct Submitter {
    /// Logged-in username, if any
    pub username: Option<String>,
    /// Superusers skip automatic moderation entirely
    pub is_superuser: bool,
}

impl Submitter {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn member(username: &str) -> Self {
        Self {
            username: Some(username.to_string()),
            is_superuser: false,
        }
    }

    pub fn superuser(username: &str) -> Self {
        Self {
            username: Some(username.to_string()),
            is_superuser: true,
        }
    }
}

/// A comment as submitted, before it has an id.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i64,
    /// Top-level comment this one replies to
    pub parent_id: Option<i64>,
    pub username: Option<String>,
    pub author_name: String,
    pub text: String,
}

/// A new comment plus the verdict it will be stored with.
#[derive(Debug, Clone)]
pub struct ModeratedSubmission {
    pub comment: NewComment,
    pub verdict: ModerationVerdict,
    /// Set when a person (not the scorer) made the decision
    pub moderated_by: Option<String>,
}

/// Trim surrounding whitespace and check the length. Empty and overlong
/// comments are refused before anything is scored or stored.
pub fn normalize_text(text: &str) -> Result<&str> {
    let text = text.trim_matches(is_space);
    if text.is_empty() {
        anyhow::bail!("Comment is empty");
    }
    let chars = text.chars().count();
    if chars > MAX_COMMENT_CHARS {
        anyhow::bail!("Comment is too long ({chars} characters, max {MAX_COMMENT_CHARS})");
    }
    Ok(text)
}

/// Score a submission once, honoring the superuser bypass.
pub fn moderate_submission(
    post_id: i64,
    author_name: &str,
    text: &str,
    submitter: &Submitter,
    thresholds: &ModerationThresholds,
) -> ModeratedSubmission {
    let comment = NewComment {
        post_id,
        parent_id: None,
        username: submitter.username.clone(),
        author_name: author_name.trim().to_string(),
        text: text.to_string(),
    };

    if submitter.is_superuser {
        let who = submitter.username.as_deref().unwrap_or("unknown");
        return ModeratedSubmission {
            comment,
            verdict: ModerationVerdict::bypass("superuser"),
            moderated_by: Some(format!("superuser:{who}")),
        };
    }

    ModeratedSubmission {
        verdict: evaluate_with(text, thresholds),
        comment,
        moderated_by: None,
    }
}

/// A staff decision on a stored comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewAction {
    Approve,
    Reject { reason: Option<String> },
}

impl ReviewAction {
    /// The decision and audit reason this action stores.
    pub fn outcome(&self) -> (Decision, String) {
        match self {
            ReviewAction::Approve => (Decision::Approved, "approved by staff".to_string()),
            ReviewAction::Reject { reason: None } => {
                (Decision::Rejected, "rejected by staff".to_string())
            }
            ReviewAction::Reject {
                reason: Some(reason),
            } => {
                let reason = reason.trim();
                if reason.is_empty() {
                    (Decision::Rejected, "rejected by staff".to_string())
                } else {
                    (Decision::Rejected, format!("rejected by staff: {reason}"))
                }
            }
        }
    }
}
