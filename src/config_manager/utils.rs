use regex::Regex;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

use crate::error::ConfigError;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{(\w+)\}").expect("placeholder pattern is valid"))
}

/// Read a JSON or YAML configuration file with environment variable substitution
pub fn read_config_file(config_path: &str) -> Result<Value, ConfigError> {
    let path = Path::new(config_path);
    if !path.is_file() {
        return Err(ConfigError::NotFound(config_path.to_string()));
    }

    let content = load_text_file(path).map_err(|source| ConfigError::Io {
        path: config_path.to_string(),
        source,
    })?;

    let path_lower = config_path.to_lowercase();
    let parsed = if path_lower.ends_with(".yaml") || path_lower.ends_with(".yml") {
        serde_yaml::from_str::<Value>(&content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str::<Value>(&content).map_err(|e| e.to_string())
    };

    let mut value = parsed.map_err(|message| ConfigError::Parse {
        path: config_path.to_string(),
        message,
    })?;
    substitute_env_vars_in_value(&mut value);
    Ok(value)
}

/// Substitution happens on parsed string values, so quotes or backslashes in a
/// variable cannot break the document.
fn substitute_env_vars_in_value(value: &mut Value) {
    match value {
        Value::String(text) => {
            if placeholder_pattern().is_match(text) {
                *text = substitute_env_vars(text);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(substitute_env_vars_in_value),
        Value::Object(map) => map.values_mut().for_each(substitute_env_vars_in_value),
        _ => {}
    }
}

/// Replace `${VAR_NAME}` with the variable's value. Unset variables stay as written.
pub fn substitute_env_vars(content: &str) -> String {
    placeholder_pattern()
        .replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

pub fn is_unresolved_placeholder(value: &str) -> bool {
    placeholder_pattern().is_match(value)
}

/// Load a text file as UTF-8, dropping a leading byte order mark
pub fn load_text_file(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    let (text, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(&bytes);
    if had_errors {
        debug!("Replaced invalid UTF-8 sequences in {}", path.display());
    }
    Ok(text.into_owned())
}
