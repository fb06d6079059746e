// Decision policy — turns scores into approve / pending / reject.
//
// Precedence is fixed: spam first, then high toxicity, then the manual
// review band. Sentiment is informational and never gates a comment.

use serde::{Deserialize, Serialize};

use super::spam::SpamCheck;

/// Toxicity at or above this is rejected outright.
pub const REJECT_TOXICITY_THRESHOLD: f64 = 0.40;

/// Toxicity at or above this (and below the reject threshold) goes to review.
pub const REVIEW_TOXICITY_THRESHOLD: f64 = 0.25;

pub const REASON_TOXIC: &str = "toxic content";
pub const REASON_REVIEW: &str = "manual review (medium toxicity)";
pub const REASON_CLEAN: &str = "clean";

/// What happens to a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    /// Rendered to readers.
    Approved,
    /// Hidden until a staff member reviews it.
    Pending,
    /// Hidden; the reason is kept for audit.
    Rejected,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Approved => "APPROVED",
            Decision::Pending => "PENDING",
            Decision::Rejected => "REJECTED",
        }
    }

    /// Parse the stored form. Accepts any case so CLI input works too.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "APPROVED" => Some(Decision::Approved),
            "PENDING" => Some(Decision::Pending),
            "REJECTED" => Some(Decision::Rejected),
            _ => None,
        }
    }

    pub fn is_visible(&self) -> bool {
        *self == Decision::Approved
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Toxicity cut-offs for the decision policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModerationThresholds {
    /// Reject at or above this toxicity (default 0.40)
    pub reject_toxicity: f64,
    /// Send to manual review at or above this toxicity (default 0.25)
    pub review_toxicity: f64,
}

impl Default for ModerationThresholds {
    fn default() -> Self {
        Self {
            reject_toxicity: REJECT_TOXICITY_THRESHOLD,
            review_toxicity: REVIEW_TOXICITY_THRESHOLD,
        }
    }
}

impl ModerationThresholds {
    /// Check `0 <= review <= reject <= 1`.
    pub fn validate(&self) -> anyhow::Result<()> {
        let in_range = |v: f64| (0.0..=1.0).contains(&v);
        if !in_range(self.review_toxicity) || !in_range(self.reject_toxicity) {
            anyhow::bail!(
                "Toxicity thresholds must be between 0 and 1 (review = {}, reject = {})",
                self.review_toxicity,
                self.reject_toxicity
            );
        }
        if self.review_toxicity > self.reject_toxicity {
            anyhow::bail!(
                "Review threshold ({}) must not exceed the reject threshold ({})",
                self.review_toxicity,
                self.reject_toxicity
            );
        }
        Ok(())
    }
}

/// Decide a comment's fate. First matching rule wins.
pub fn decide(
    toxicity: f64,
    spam: &SpamCheck,
    thresholds: &ModerationThresholds,
) -> (Decision, String) {
    if spam.is_spam() {
        return (Decision::Rejected, format!("spam: {}", spam.reason()));
    }
    if toxicity >= thresholds.reject_toxicity {
        return (Decision::Rejected, REASON_TOXIC.to_string());
    }
    if toxicity >= thresholds.review_toxicity {
        return (Decision::Pending, REASON_REVIEW.to_string());
    }
    (Decision::Approved, REASON_CLEAN.to_string())
}
