use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::recruiting::AssessmentFailurePolicy;

/// Application configuration loaded from environment variables.
/// Fails at startup if the API key is missing or a value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Directory backing the key-value store (one file per record).
    pub data_dir: PathBuf,
    pub llm_timeout: Duration,
    pub assessment_failure_policy: AssessmentFailurePolicy,
    pub seed_demo_jobs: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            port: optional_env("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
            data_dir: PathBuf::from(optional_env("DATA_DIR", "./data")),
            llm_timeout: Duration::from_secs(
                optional_env("LLM_TIMEOUT_SECS", "60")
                    .parse::<u64>()
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            assessment_failure_policy: optional_env("ASSESSMENT_FAILURE_POLICY", "block")
                .parse::<AssessmentFailurePolicy>()
                .map_err(anyhow::Error::msg)
                .context("ASSESSMENT_FAILURE_POLICY must be 'block' or 'mark_sent'")?,
            seed_demo_jobs: parse_flag(&optional_env("SEED_DEMO_JOBS", "true"))
                .context("SEED_DEMO_JOBS must be true or false")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("unrecognized flag value '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_accepts_common_spellings() {
        assert!(parse_flag("true").unwrap());
        assert!(parse_flag(" ON ").unwrap());
        assert!(!parse_flag("0").unwrap());
        assert!(!parse_flag("No").unwrap());
    }

    #[test]
    fn test_parse_flag_rejects_garbage() {
        assert!(parse_flag("maybe").is_err());
    }
}
