use crate::controller::generator::FailurePolicy;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5001";

const ENV_API_URL: &str = "CONCEPT_STUDIO_API_URL";
const ENV_TIMEOUT_SECS: &str = "CONCEPT_STUDIO_TIMEOUT_SECS";
const ENV_MARKDOWN: &str = "CONCEPT_STUDIO_MARKDOWN";
const ENV_ON_FAILURE: &str = "CONCEPT_STUDIO_ON_FAILURE";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    /// No timeout unless configured; a hung request keeps its control disabled.
    pub timeout: Option<Duration>,
    pub prefer_markdown: bool,
    pub on_failure: FailurePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: None,
            prefer_markdown: true,
            on_failure: FailurePolicy::KeepPrevious,
        }
    }
}

impl Settings {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut settings = Settings::default();

        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            settings.api_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                key: ENV_TIMEOUT_SECS,
                value: raw.clone(),
                reason: "expected whole seconds",
            })?;
            settings.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if let Some(raw) = lookup(ENV_MARKDOWN) {
            settings.prefer_markdown = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: ENV_MARKDOWN,
                        value: raw,
                        reason: "expected true or false",
                    })
                }
            };
        }

        if let Some(raw) = lookup(ENV_ON_FAILURE) {
            settings.on_failure = match raw.trim().to_ascii_lowercase().as_str() {
                "keep" => FailurePolicy::KeepPrevious,
                "clear" => FailurePolicy::Clear,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: ENV_ON_FAILURE,
                        value: raw,
                        reason: "expected keep or clear",
                    })
                }
            };
        }

        Ok(settings)
    }
}
