// Lexicon scoring — toxicity and sentiment from substring hits.
//
// Both scores are pure functions of the lowercased text. Nothing here
// allocates beyond the lowercase copy, so scoring is linear in input length
// times lexicon size.

use super::lexicon::{count_hits, NEGATIVE, OFFENSIVE, POSITIVE};
use super::policy::{decide, ModerationThresholds};
use super::spam::detect_spam;
use super::verdict::ModerationVerdict;

/// Steepness of the hit-count → toxicity curve. One hit is ~0.70, three ~0.97.
pub const TOXICITY_DECAY: f64 = 1.2;

/// Toxicity in [0, 1] from the number of distinct offensive tokens present.
pub fn toxicity_score(text: &str) -> f64 {
    let hits = count_hits(&text.to_lowercase(), OFFENSIVE);
    toxicity_from_hits(hits)
}

/// `1 - e^(-1.2 * hits)`, clamped.
pub fn toxicity_from_hits(hits: usize) -> f64 {
    if hits == 0 {
        return 0.0;
    }
    (1.0 - (-TOXICITY_DECAY * hits as f64).exp()).clamp(0.0, 1.0)
}

/// Polarity ratio in [-1, 1]. Exactly 0.0 when no sentiment words appear.
pub fn sentiment_score(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let pos = count_hits(&lowered, POSITIVE) as f64;
    let neg = count_hits(&lowered, NEGATIVE) as f64;
    if pos == 0.0 && neg == 0.0 {
        return 0.0;
    }
    ((pos - neg) / (pos + neg)).clamp(-1.0, 1.0)
}

/// Score `text` and decide with the default thresholds.
pub fn evaluate(text: &str) -> ModerationVerdict {
    evaluate_with(text, &ModerationThresholds::default())
}

/// Score `text` and decide with custom thresholds.
pub fn evaluate_with(text: &str, thresholds: &ModerationThresholds) -> ModerationVerdict {
    let toxicity = toxicity_score(text);
    let sentiment = sentiment_score(text);
    let spam = detect_spam(text);
    let (decision, reason) = decide(toxicity, &spam, thresholds);

    ModerationVerdict {
        toxicity: round3(toxicity),
        sentiment: round3(sentiment),
        is_spam: spam.is_spam(),
        spam_reasons: spam.reasons,
        reason,
        decision,
    }
}

/// Missing text scores the same as an empty comment.
pub fn evaluate_optional(text: Option<&str>) -> ModerationVerdict {
    evaluate(text.unwrap_or_default())
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
