use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigError;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration for the chat-completion backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// `openai_llm` or `openai_compatible_llm`
    #[serde(default = "default_provider")]
    pub provider: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// `null` leaves the output length unbounded.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: Option<u32>,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_provider() -> String {
    "openai_llm".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_temperature() -> f32 {
    0.0
}

fn default_max_tokens() -> Option<u32> {
    Some(512)
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl LlmConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "llm_config.model",
                reason: "must not be empty".to_string(),
            });
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::InvalidSetting {
                name: "llm_config.temperature",
                reason: format!("{} is outside 0.0..=2.0", self.temperature),
            });
        }
        if self.max_tokens == Some(0) {
            return Err(ConfigError::InvalidSetting {
                name: "llm_config.max_tokens",
                reason: "must be positive or null".to_string(),
            });
        }
        if self.request_timeout_secs == 0 || self.connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "llm_config.timeout",
                reason: "timeouts must be at least one second".to_string(),
            });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            base_url: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}
