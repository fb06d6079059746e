use std::env;

use anyhow::{Context, Result};

use crate::moderation::ModerationThresholds;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
pub struct Config {
    pub db_path: String,
    /// Where `quill report` writes its markdown file
    pub report_path: String,
    /// Toxicity cut-offs (QUILL_REJECT_TOXICITY / QUILL_REVIEW_TOXICITY)
    pub thresholds: ModerationThresholds,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default; a threshold that is set but isn't a number,
    /// or a pair of thresholds in the wrong order, is an error.
    pub fn load() -> Result<Self> {
        let defaults = ModerationThresholds::default();
        let thresholds = ModerationThresholds {
            reject_toxicity: env_f64("QUILL_REJECT_TOXICITY")?.unwrap_or(defaults.reject_toxicity),
            review_toxicity: env_f64("QUILL_REVIEW_TOXICITY")?.unwrap_or(defaults.review_toxicity),
        };
        thresholds
            .validate()
            .context("Invalid QUILL_REJECT_TOXICITY / QUILL_REVIEW_TOXICITY")?;

        Ok(Self {
            db_path: env::var("QUILL_DB_PATH").unwrap_or_else(|_| "./quill.db".to_string()),
            report_path: env::var("QUILL_REPORT_PATH")
                .unwrap_or_else(|_| "output/quill-report.md".to_string()),
            thresholds,
        })
    }
}

/// Read an optional float from the environment. Unset or blank → None.
fn env_f64(key: &str) -> Result<Option<f64>> {
    match env::var(key) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => {
            let value = raw
                .trim()
                .parse::<f64>()
                .with_context(|| format!("{key} must be a number, got {raw:?}"))?;
            Ok(Some(value))
        }
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable name so parallel tests don't race.

    #[test]
    fn test_env_f64_unset() {
        assert_eq!(env_f64("QUILL_TEST_UNSET_VALUE").unwrap(), None);
    }

    #[test]
    fn test_env_f64_parses() {
        env::set_var("QUILL_TEST_PARSED_VALUE", " 0.55 ");
        assert_eq!(env_f64("QUILL_TEST_PARSED_VALUE").unwrap(), Some(0.55));
    }

    #[test]
    fn test_env_f64_rejects_garbage() {
        env::set_var("QUILL_TEST_GARBAGE_VALUE", "high");
        let err = env_f64("QUILL_TEST_GARBAGE_VALUE").unwrap_err();
        assert!(err.to_string().contains("QUILL_TEST_GARBAGE_VALUE"));
    }
}
