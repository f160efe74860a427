//! Request and response bodies of the JSON translation API

use serde::{Deserialize, Serialize};

use super::language::Language;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub input_language: String,
    pub output_language: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translated_text: String,
    pub input_language: Language,
    pub output_language: Language,
}
