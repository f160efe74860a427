use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

use crate::config_manager::stateless_llm::LlmConfig;
use crate::config_manager::system::SystemConfig;
use crate::config_manager::utils::{is_unresolved_placeholder, read_config_file};
use crate::error::ConfigError;

/// Bearer credential for the text-generation backend. Never printed.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    #[cfg(test)]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    fn is_usable(&self) -> bool {
        let key = self.0.trim();
        !key.is_empty() && !is_unresolved_placeholder(key)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Main configuration for the application
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(rename = "OPENAI_API_KEY", default)]
    pub openai_api_key: ApiKey,

    #[serde(default)]
    pub system_config: SystemConfig,

    #[serde(default)]
    pub llm_config: LlmConfig,
}

impl Config {
    /// Load and validate configuration from a JSON or YAML file
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let value = read_config_file(path)?;
        Self::from_value(value, path)
    }

    pub fn from_value(value: serde_json::Value, origin: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_value(value).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        config.validate(origin)?;
        Ok(config)
    }

    fn validate(&self, origin: &str) -> Result<(), ConfigError> {
        if !self.openai_api_key.is_usable() {
            return Err(ConfigError::MissingApiKey(origin.to_string()));
        }
        self.llm_config.validate()?;
        self.system_config.validate()?;
        Ok(())
    }

    /// Try each candidate in order. Only a missing file moves on to the next
    /// candidate; a file that exists but is invalid stops the search.
    pub fn discover(candidates: &[String]) -> Result<(Self, String), ConfigError> {
        for path in candidates {
            match Self::load(path) {
                Ok(config) => return Ok((config, path.clone())),
                Err(ConfigError::NotFound(_)) => {
                    debug!("No config at {}", path);
                }
                Err(e) => return Err(e),
            }
        }
        Err(ConfigError::NotFound(format!("tried {:?}", candidates)))
    }

    /// `$CONFIG_PATH`, then `config.json` in the working directory, then next to the executable
    pub fn default_candidates() -> Vec<String> {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));

        vec![
            std::env::var("CONFIG_PATH").ok(),
            Some("config.json".to_string()),
            exe_dir.join("config.json").to_str().map(|s| s.to_string()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let file = write_config(r#"{ "OPENAI_API_KEY": "sk-abc" }"#);
        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.openai_api_key.expose(), "sk-abc");
        assert_eq!(config.llm_config.model, "gpt-4o");
        assert_eq!(config.llm_config.temperature, 0.0);
        assert_eq!(config.system_config.port, 8501);
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let file = write_config(r#"{ "llm_config": { "model": "gpt-4o" } }"#);
        let err = Config::load(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey(_)));
    }

    #[test]
    fn test_blank_key_is_configuration_error() {
        let err = Config::from_value(json!({ "OPENAI_API_KEY": "   " }), "inline").unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey(_)));
    }

    #[test]
    fn test_unresolved_placeholder_key_is_configuration_error() {
        let err = Config::from_value(
            json!({ "OPENAI_API_KEY": "${TRANSLATION_ASSISTANT_SURELY_UNSET_VAR}" }),
            "inline",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey(_)));
    }

    #[test]
    fn test_non_string_key_is_parse_error() {
        let err = Config::from_value(json!({ "OPENAI_API_KEY": 42 }), "inline").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_debug_output_hides_key() {
        let config = Config::from_value(json!({ "OPENAI_API_KEY": "sk-secret" }), "inline").unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("ApiKey(***)"));
    }

    #[test]
    fn test_discover_skips_missing_files() {
        let file = write_config(r#"{ "OPENAI_API_KEY": "sk-found" }"#);
        let found = file.path().to_str().unwrap().to_string();
        let candidates = vec!["/nope/config.json".to_string(), found.clone()];
        let (config, path) = Config::discover(&candidates).unwrap();
        assert_eq!(path, found);
        assert_eq!(config.openai_api_key.expose(), "sk-found");
    }

    #[test]
    fn test_discover_stops_at_invalid_file() {
        let bad = write_config(r#"{ "OPENAI_API_KEY": "" }"#);
        let good = write_config(r#"{ "OPENAI_API_KEY": "sk-later" }"#);
        let candidates = vec![
            bad.path().to_str().unwrap().to_string(),
            good.path().to_str().unwrap().to_string(),
        ];
        let err = Config::discover(&candidates).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey(_)));
    }

    #[test]
    fn test_discover_reports_all_candidates_when_nothing_exists() {
        let candidates = vec!["/nope/a.json".to_string(), "/nope/b.json".to_string()];
        let err = Config::discover(&candidates).unwrap_err();
        match err {
            ConfigError::NotFound(msg) => assert!(msg.contains("/nope/b.json")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
