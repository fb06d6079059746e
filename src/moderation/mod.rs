// Moderation scorer — lexicon toxicity, sentiment, spam rules and the
// approve/pending/reject policy.
//
// Everything in here is pure: no I/O, no logging, no shared mutable state.
// The compiled patterns are lazily-initialized statics, so concurrent callers
// need no locking and the same text always yields the same verdict.

pub mod lexicon;
pub mod policy;
pub mod scorer;
pub mod spam;
pub mod verdict;

pub use policy::{decide, Decision, ModerationThresholds};
pub use scorer::{evaluate, evaluate_optional, evaluate_with, sentiment_score, toxicity_score};
pub use spam::{detect_spam, SpamCheck, SpamReason};
pub use verdict::ModerationVerdict;
