use serde::{Deserialize, Serialize};

use super::policy::Decision;
use super::spam::SpamReason;

/// Everything the scorer concluded about one piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationVerdict {
    /// 0.0 (clean) to 1.0, rounded to 3 places
    pub toxicity: f64,
    /// -1.0 (negative) to 1.0 (positive), rounded to 3 places
    pub sentiment: f64,
    pub is_spam: bool,
    /// Individual spam rules that fired, in evaluation order
    #[serde(default)]
    pub spam_reasons: Vec<SpamReason>,
    pub reason: String,
    pub decision: Decision,
}

impl ModerationVerdict {
    /// Verdict for a comment that skipped scoring (e.g. posted by a superuser).
    pub fn bypass(who: &str) -> Self {
        Self {
            toxicity: 0.0,
            sentiment: 0.0,
            is_spam: false,
            spam_reasons: Vec::new(),
            reason: format!("bypass: {who}"),
            decision: Decision::Approved,
        }
    }
}
