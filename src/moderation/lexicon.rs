// Lexicons — fixed token lists for toxicity and sentiment scoring.
//
// Tokens are lowercase and matched as substrings of the lowercased comment,
// so "stupidity" hits "stupid" and "siktir" hits both "siktir" and "sik".
// The blog's audience writes mostly Turkish with some English mixed in,
// which is why both languages appear side by side.

/// Insults and profanity. Each token present counts as one toxicity hit.
pub const OFFENSIVE: &[&str] = &[
    "salak",
    "aptal",
    "gerizekalı",
    "mal",
    "orospu",
    "lanet",
    "siktir",
    "bok",
    "piç",
    "idiot",
    "stupid",
    "trash",
    "dumb",
    "f*k",
    "f**k",
    "shit",
    "bastard",
    "moron",
    "oe",
    "amk",
    "sik",
    "ananısikiyim",
    "göt",
];

/// Words that push sentiment towards +1.
pub const POSITIVE: &[&str] = &[
    "harika",
    "mükemmel",
    "güzel",
    "teşekkür",
    "beğendim",
    "süper",
    "iyi",
    "şahane",
    "perfect",
    "great",
    "awesome",
    "nice",
    "bravo",
];

/// Words that push sentiment towards -1.
pub const NEGATIVE: &[&str] = &[
    "kötü",
    "berbat",
    "rezil",
    "iğrenç",
    "nefret",
    "beğenmedim",
    "saçma",
    "yersiz",
    "hatalı",
    "useless",
    "bad",
    "terrible",
    "awful",
    "worst",
];

/// Count how many distinct lexicon tokens occur anywhere in `lowered`.
///
/// The caller is responsible for lowercasing. A token that appears three
/// times still counts once.
pub fn count_hits(lowered: &str, lexicon: &[&str]) -> usize {
    lexicon.iter().filter(|token| lowered.contains(*token)).count()
}
