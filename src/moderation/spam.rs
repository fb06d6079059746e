// Spam detection — pattern rules that produce human-readable reason tags.
//
// Unlike toxicity this is not a score. Each rule either fires or it doesn't,
// and the fired rules are reported in a fixed order so the stored reason
// string is stable for the same input.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Links and the shorteners/messengers spammers use to move people off-site.
static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(https?://|www\.)|\b(t\.me|wa\.me|bit\.ly|tinyurl)\b")
        .expect("URL pattern is valid")
});

/// @handles. Word characters are letters, numbers and `_` only; combining
/// marks (the dot left behind when "İ" is lowercased) end the handle.
static HANDLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@[\p{L}\p{N}_]{3,}").expect("handle pattern is valid"));

/// Candidate phone numbers. Boundaries are checked by `has_phone_number`.
static DIGIT_RUN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{10,}").expect("digit run pattern is valid"));

static WORD_CHAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{N}_]$").expect("word char pattern is valid"));

static LETTER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{L}").expect("letter pattern is valid"));

/// A run of this many identical characters counts as excessive repetition.
pub const REPEAT_RUN_LENGTH: usize = 5;

/// Trimmed text shorter than this (in characters) is too short to be a comment.
pub const MIN_TEXT_CHARS: usize = 5;

/// Link/contact spam with fewer letters than this has no real text around it.
pub const MIN_ALPHABETIC_CHARS: usize = 6;

/// One fired spam rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpamReason {
    UrlOrShortener,
    ContactOrHandle,
    ExcessiveRepetition,
    TooShort,
    NoRealText,
}

impl SpamReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpamReason::UrlOrShortener => "url/shortener",
            SpamReason::ContactOrHandle => "contact/handle",
            SpamReason::ExcessiveRepetition => "excessive repetition",
            SpamReason::TooShort => "too short",
            SpamReason::NoRealText => "no real text",
        }
    }
}

impl std::fmt::Display for SpamReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The outcome of running every spam rule over a text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpamCheck {
    pub reasons: Vec<SpamReason>,
}

impl SpamCheck {
    pub fn is_spam(&self) -> bool {
        !self.reasons.is_empty()
    }

    /// Fired tags joined with ", " (empty when nothing fired).
    pub fn reason(&self) -> String {
        self.reasons
            .iter()
            .map(SpamReason::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Run all spam rules over `text`.
pub fn detect_spam(text: &str) -> SpamCheck {
    let lowered = text.to_lowercase();
    let has_url = URL_PATTERN.is_match(&lowered);
    let has_contact = HANDLE_PATTERN.is_match(&lowered) || has_phone_number(&lowered);

    let mut reasons = Vec::new();
    if has_url {
        reasons.push(SpamReason::UrlOrShortener);
    }
    if has_contact {
        reasons.push(SpamReason::ContactOrHandle);
    }
    if has_repeated_run(&lowered, REPEAT_RUN_LENGTH) {
        reasons.push(SpamReason::ExcessiveRepetition);
    }
    if lowered.trim_matches(is_space).chars().count() < MIN_TEXT_CHARS {
        reasons.push(SpamReason::TooShort);
    }
    let alphabetic = LETTER_PATTERN.find_iter(&lowered).count();
    if alphabetic < MIN_ALPHABETIC_CHARS && (has_url || has_contact) {
        reasons.push(SpamReason::NoRealText);
    }

    SpamCheck { reasons }
}

/// A run of 10+ digits with no word character touching either end.
fn has_phone_number(text: &str) -> bool {
    DIGIT_RUN_PATTERN.find_iter(text).any(|m| {
        let before = text[..m.start()].chars().next_back();
        let after = text[m.end()..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

fn is_word_char(c: char) -> bool {
    let mut buf = [0u8; 4];
    WORD_CHAR_PATTERN.is_match(c.encode_utf8(&mut buf))
}

/// Whitespace for trimming: Unicode white space plus the ASCII
/// file/group/record/unit separators (U+001C..U+001F).
pub(crate) fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// True if some character other than a newline repeats `run` times in a row.
///
/// The regex crate has no backreferences, so `(.)\1{4,}` is done by hand.
fn has_repeated_run(text: &str, run: usize) -> bool {
    let mut previous: Option<char> = None;
    let mut length = 0;

    for ch in text.chars() {
        if ch == '\n' {
            previous = None;
            length = 0;
            continue;
        }
        if previous == Some(ch) {
            length += 1;
        } else {
            previous = Some(ch);
            length = 1;
        }
        if length >= run {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_and_shorteners() {
        for text in [
            "see https://example.com today",
            "go to WWW.EXAMPLE.COM please",
            "join us on t.me/channel now",
            "short link bit.ly/abc for you",
        ] {
            let check = detect_spam(text);
            assert!(
                check.reasons.contains(&SpamReason::UrlOrShortener),
                "expected url/shortener for {text:?}"
            );
        }
    }

    #[test]
    fn test_shortener_needs_word_boundary() {
        // "at.me" ends in "t.me" but there is no boundary before the "t"
        let check = detect_spam("write to me at.melbourne sometime");
        assert!(!check.reasons.contains(&SpamReason::UrlOrShortener));
    }

    #[test]
    fn test_long_digit_run_is_contact() {
        let check = detect_spam("call me on 05551234567 tonight");
        assert_eq!(check.reasons, vec![SpamReason::ContactOrHandle]);
    }

    #[test]
    fn test_nine_digits_is_not_contact() {
        let check = detect_spam("order number 123456789 arrived");
        assert!(!check.is_spam());
    }

    #[test]
    fn test_handle_with_unicode_letters() {
        let check = detect_spam("instagramda @gökçe hesabına bak");
        assert!(check.reasons.contains(&SpamReason::ContactOrHandle));
    }

    #[test]
    fn test_handle_stops_at_combining_mark() {
        // "İ" lowercases to "i" + U+0307, so the handle is only one letter long
        let check = detect_spam("@İpek harika bir yazı");
        assert!(!check.is_spam(), "unexpected reasons: {:?}", check.reasons);
        assert!(detect_spam("@ipek harika bir yazı").is_spam());
    }

    #[test]
    fn test_digit_run_glued_to_letters_is_not_contact() {
        assert!(!detect_spam("serial abc05551234567 here").is_spam());
        assert!(!detect_spam("serial 05551234567abc here").is_spam());
        assert!(detect_spam("numara: 05551234567.").is_spam());
    }

    #[test]
    fn test_letters_do_not_count_combining_marks() {
        // five letters and a combining dot
        let check = detect_spam("www.İa");
        assert!(check.reasons.contains(&SpamReason::NoRealText));
    }

    #[test]
    fn test_separator_controls_are_trimmed() {
        let check = detect_spam("\u{1c}\u{1d}abc\u{1e}\u{1f}");
        assert_eq!(check.reasons, vec![SpamReason::TooShort]);
    }

    #[test]
    fn test_short_handle_is_ignored() {
        let check = detect_spam("thanks @al for the tip");
        assert!(!check.is_spam());
    }

    #[test]
    fn test_repetition() {
        assert!(has_repeated_run("nooooo way", 5));
        assert!(!has_repeated_run("noooo way", 5));
        assert!(has_repeated_run("wow!!!!!", 5));
    }

    #[test]
    fn test_repetition_does_not_span_newlines() {
        assert!(!has_repeated_run("\n\n\n\n\n\n", 5));
        assert!(!has_repeated_run("aa\naaa", 5));
    }

    #[test]
    fn test_too_short_counts_characters_not_bytes() {
        // 4 characters, 8 bytes
        assert_eq!(detect_spam("  çğüş ").reasons, vec![SpamReason::TooShort]);
        assert!(!detect_spam("güzel").is_spam());
    }

    #[test]
    fn test_bare_link_has_no_real_text() {
        let check = detect_spam("www.ab");
        assert_eq!(
            check.reasons,
            vec![SpamReason::UrlOrShortener, SpamReason::NoRealText]
        );
        assert_eq!(check.reason(), "url/shortener, no real text");
    }

    #[test]
    fn test_reason_order_is_fixed() {
        let check = detect_spam("@bob");
        assert_eq!(
            check.reasons,
            vec![
                SpamReason::ContactOrHandle,
                SpamReason::TooShort,
                SpamReason::NoRealText
            ]
        );
    }

    #[test]
    fn test_empty_text_is_too_short() {
        let check = detect_spam("");
        assert!(check.is_spam());
        assert_eq!(check.reason(), "too short");
    }

    #[test]
    fn test_clean_text_has_empty_reason() {
        let check = detect_spam("a thoughtful reply about the article");
        assert!(!check.is_spam());
        assert_eq!(check.reason(), "");
    }
}
