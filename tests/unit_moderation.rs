// Unit tests for the moderation scorer's public API.
//
// Covers the documented examples, the score invariants (ranges, exact zeros,
// monotonic toxicity), spam precedence and determinism.

use quill::moderation::lexicon::{NEGATIVE, OFFENSIVE, POSITIVE};
use quill::moderation::{
    decide, evaluate, evaluate_optional, evaluate_with, sentiment_score, toxicity_score,
    Decision, ModerationThresholds, SpamCheck, SpamReason,
};

// ============================================================
// Documented examples
// ============================================================

#[test]
fn empty_text_is_rejected_as_too_short() {
    let v = evaluate("");
    assert!(v.is_spam);
    assert_eq!(v.spam_reasons, vec![SpamReason::TooShort]);
    assert_eq!(v.decision, Decision::Rejected);
    assert_eq!(v.reason, "spam: too short");
    assert_eq!(v.toxicity, 0.0);
    assert_eq!(v.sentiment, 0.0);
}

#[test]
fn grateful_turkish_comment_is_approved() {
    let v = evaluate("harika bir yazı, teşekkürler");
    assert!(v.sentiment > 0.0);
    assert_eq!(v.toxicity, 0.0);
    assert!(!v.is_spam);
    assert_eq!(v.decision, Decision::Approved);
    assert_eq!(v.reason, "clean");
}

#[test]
fn three_insults_are_rejected_as_toxic() {
    let v = evaluate("sen bir salaksın, aptalsın, malsın");
    let expected = 1.0 - (-3.6f64).exp();
    assert!((v.toxicity - expected).abs() < 0.001, "got {}", v.toxicity);
    assert_eq!(v.decision, Decision::Rejected);
    assert!(v.reason.starts_with("toxic"));
    assert!(!v.is_spam);
}

#[test]
fn link_is_rejected_as_spam() {
    let v = evaluate("check this out www.example.com");
    assert!(v.is_spam);
    assert!(v.spam_reasons.contains(&SpamReason::UrlOrShortener));
    assert_eq!(v.decision, Decision::Rejected);
    assert!(v.reason.starts_with("spam:"));
}

// ============================================================
// Score invariants
// ============================================================

#[test]
fn no_offensive_hits_means_zero_toxicity() {
    for text in [
        "a perfectly ordinary remark",
        "bugün hava çok güzel",
        "🙂🙂 emoji only 🙂",
        "数字と漢字のコメント",
    ] {
        assert_eq!(toxicity_score(text), 0.0, "{text:?}");
    }
}

#[test]
fn no_sentiment_words_means_exactly_zero() {
    for text in ["", "the train leaves at nine", "Пример текста"] {
        assert_eq!(sentiment_score(text), 0.0, "{text:?}");
    }
}

#[test]
fn toxicity_is_non_decreasing_as_tokens_are_added() {
    let mut text = String::from("comment:");
    let mut previous = toxicity_score(&text);
    for token in OFFENSIVE {
        text.push(' ');
        text.push_str(token);
        let score = toxicity_score(&text);
        assert!(score >= previous, "dropped after adding {token:?}");
        assert!((0.0..=1.0).contains(&score));
        previous = score;
    }
    assert!(previous > 0.99);
}

#[test]
fn sentiment_stays_in_range_with_every_word() {
    let everything: String = POSITIVE
        .iter()
        .chain(NEGATIVE.iter())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    let s = sentiment_score(&everything);
    assert!((-1.0..=1.0).contains(&s));

    let all_negative = NEGATIVE.join(" ");
    assert_eq!(sentiment_score(&all_negative), -1.0);
}

#[test]
fn very_long_input_is_handled() {
    let text = "stupid ".repeat(50_000);
    let v = evaluate(&text);
    assert!(v.toxicity <= 1.0);
    assert_eq!(v.decision, Decision::Rejected);
}

// ============================================================
// Decision policy
// ============================================================

#[test]
fn spam_wins_over_everything() {
    // Positive, non-toxic, but a bare handle
    let v = evaluate("great post @promo_account");
    assert!(v.is_spam);
    assert!(v.sentiment > 0.0);
    assert_eq!(v.toxicity, 0.0);
    assert_eq!(v.decision, Decision::Rejected);
    assert_eq!(v.reason, "spam: contact/handle");
}

#[test]
fn spam_reason_is_kept_even_when_highly_toxic() {
    let v = evaluate("sen bir salaksın, aptalsın, malsın www.example.com");
    assert!(v.toxicity > 0.9);
    assert!(v.is_spam);
    assert_eq!(v.decision, Decision::Rejected);
    assert!(v.reason.starts_with("spam:"), "got {:?}", v.reason);
    assert_eq!(v.reason, "spam: url/shortener");
}

#[test]
fn handle_ends_at_combining_mark() {
    // lowercased "İ" is "i" plus a combining dot, which is not a word character
    let v = evaluate("@İpek harika bir yazı");
    assert!(!v.is_spam, "unexpected: {:?}", v.spam_reasons);
    assert_eq!(v.decision, Decision::Approved);
    assert_eq!(v.reason, "clean");
}

#[test]
fn spam_reasons_are_joined_in_order() {
    let v = evaluate("wa.me/1");
    assert_eq!(v.reason, "spam: url/shortener, no real text");
}

#[test]
fn sentiment_never_changes_the_decision() {
    let spam = SpamCheck::default();
    let t = ModerationThresholds::default();
    let happy = evaluate("great awesome nice, a lovely read");
    let grumpy = evaluate("terrible awful useless, a boring read");
    assert!(happy.sentiment > 0.0 && grumpy.sentiment < 0.0);
    assert_eq!(happy.decision, grumpy.decision);
    assert_eq!(decide(0.0, &spam, &t).0, Decision::Approved);
}

#[test]
fn one_offensive_word_is_rejected_with_default_thresholds() {
    // 1 - e^-1.2 ≈ 0.699, above the 0.40 reject line
    let v = evaluate("that take is dumb");
    assert_eq!(v.decision, Decision::Rejected);
    assert_eq!(v.reason, "toxic content");
}

#[test]
fn medium_toxicity_goes_to_review_with_relaxed_thresholds() {
    let t = ModerationThresholds {
        reject_toxicity: 0.9,
        review_toxicity: 0.5,
    };
    let v = evaluate_with("that take is dumb", &t);
    assert_eq!(v.decision, Decision::Pending);
    assert_eq!(v.reason, "manual review (medium toxicity)");
}

// ============================================================
// Purity
// ============================================================

#[test]
fn evaluate_is_deterministic() {
    for text in [
        "",
        "harika bir yazı, teşekkürler",
        "call 05551234567 nowwwww",
        "sen bir salaksın, aptalsın, malsın",
    ] {
        assert_eq!(evaluate(text), evaluate(text));
    }
}

#[test]
fn missing_text_is_treated_as_empty() {
    assert_eq!(evaluate_optional(None), evaluate(""));
    assert_eq!(evaluate_optional(Some("nice")), evaluate("nice"));
}

#[test]
fn concurrent_callers_agree() {
    let text = "great post, but the ending was terrible";
    let expected = evaluate(text);
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(move || evaluate(text)))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn verdict_serializes_with_uppercase_decision() {
    let v = evaluate("harika bir yazı, teşekkürler");
    let json = serde_json::to_value(&v).unwrap();
    assert_eq!(json["decision"], "APPROVED");
    assert_eq!(json["is_spam"], false);
    assert_eq!(json["reason"], "clean");
}
