use std::sync::Arc;
use tracing::info;

use super::openai_compatible_llm::OpenAICompatibleLLM;
use super::stateless_llm_interface::StatelessLLMInterface;
use crate::config_manager::{ApiKey, LlmConfig, OPENAI_BASE_URL};
use crate::error::ConfigError;

/// Factory for creating stateless LLM instances
pub struct StatelessLLMFactory;

impl StatelessLLMFactory {
    /// Create an LLM based on the configuration.
    ///
    /// # Arguments
    /// * `config` - Backend settings; `provider` picks the implementation
    /// * `api_key` - Credential handed to the client, never read from the environment
    pub fn create_llm(
        config: &LlmConfig,
        api_key: ApiKey,
    ) -> Result<Arc<dyn StatelessLLMInterface>, ConfigError> {
        info!("Initializing LLM: {}", config.provider);

        let base_url = match config.provider.as_str() {
            "openai_llm" => config
                .base_url
                .clone()
                .unwrap_or_else(|| OPENAI_BASE_URL.to_string()),
            "openai_compatible_llm" => config
                .base_url
                .clone()
                .filter(|url| !url.trim().is_empty())
                .ok_or(ConfigError::InvalidSetting {
                    name: "llm_config.base_url",
                    reason: "required for openai_compatible_llm".to_string(),
                })?,
            other => return Err(ConfigError::UnsupportedProvider(other.to_string())),
        };

        Ok(Arc::new(OpenAICompatibleLLM::new(
            config.model.clone(),
            base_url,
            api_key,
            config.request_timeout(),
            config.connect_timeout(),
        )?))
    }
}
