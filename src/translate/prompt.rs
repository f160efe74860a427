use serde::{Deserialize, Serialize};

use super::language::LanguagePair;

/// Role of a prompt turn. `Human` goes on the wire as `user`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    #[serde(rename = "user")]
    Human,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTurn {
    pub role: Role,
    pub content: String,
}

impl PromptTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: Role::Human,
            content: content.into(),
        }
    }
}

pub fn system_instruction(pair: &LanguagePair) -> String {
    format!(
        "You are a helpful assistant that translates {} to {}.",
        pair.input_language, pair.output_language
    )
}

/// Builds the instruction turn followed by the untouched source text.
pub fn build_prompt(pair: &LanguagePair, source_text: &str) -> Vec<PromptTurn> {
    vec![
        PromptTurn::system(system_instruction(pair)),
        PromptTurn::human(source_text),
    ]
}
