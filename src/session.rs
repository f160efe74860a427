use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::TranslationError;
use crate::translate::{Language, LanguagePair};

/// Message shown above the form after the last action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "level", content = "message", rename_all = "lowercase")]
pub enum Notice {
    Warning(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Warning(message) | Notice::Error(message) => message,
        }
    }
}

/// What one browser sees: selections, the text box and the last result.
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    pub input_language: Language,
    pub output_language: Language,
    pub user_input: String,
    pub translated_text: Option<String>,
    pub notice: Option<Notice>,
    pub updated_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            input_language: Language::English,
            output_language: Language::English,
            user_input: String::new(),
            translated_text: None,
            notice: None,
            updated_at: Utc::now(),
        }
    }

    pub fn select_languages(&mut self, pair: LanguagePair) {
        self.input_language = pair.input_language;
        self.output_language = pair.output_language;
    }

    /// Apply the result of a Translate action. A failure leaves the previous
    /// translation on screen.
    pub fn record_outcome(&mut self, submitted_text: &str, outcome: &Result<String, TranslationError>) {
        self.user_input = submitted_text.to_string();
        match outcome {
            Ok(translated) => {
                self.translated_text = Some(translated.clone());
                self.notice = None;
            }
            Err(TranslationError::Validation(e)) => {
                self.notice = Some(Notice::Warning(e.to_string()));
            }
            Err(TranslationError::Backend(e)) => {
                self.notice = Some(Notice::Error(format!("Translation failed: {}", e)));
            }
        }
        self.updated_at = Utc::now();
    }

    /// Clear action: empties the text box and removes the displayed result.
    /// Language selections are kept.
    pub fn reset(&mut self) {
        self.user_input.clear();
        self.translated_text = None;
        self.notice = None;
        self.updated_at = Utc::now();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BackendError, ValidationError};

    #[test]
    fn test_success_replaces_result_and_clears_notice() {
        let mut state = SessionState::new();
        state.notice = Some(Notice::Warning("old".to_string()));

        state.record_outcome("Good morning", &Ok("Bonjour".to_string()));

        assert_eq!(state.translated_text.as_deref(), Some("Bonjour"));
        assert_eq!(state.user_input, "Good morning");
        assert_eq!(state.notice, None);
    }

    #[test]
    fn test_validation_warning_keeps_previous_result() {
        let mut state = SessionState::new();
        state.record_outcome("Hello", &Ok("Hola".to_string()));

        state.record_outcome("   ", &Err(ValidationError::EmptyText.into()));

        assert_eq!(state.translated_text.as_deref(), Some("Hola"));
        assert_eq!(
            state.notice,
            Some(Notice::Warning("Please enter some text to translate.".to_string()))
        );
    }

    #[test]
    fn test_backend_error_keeps_previous_result() {
        let mut state = SessionState::new();
        state.record_outcome("Hello", &Ok("Hola".to_string()));

        state.record_outcome(
            "Goodbye",
            &Err(BackendError::Authentication("invalid key".to_string()).into()),
        );

        assert_eq!(state.translated_text.as_deref(), Some("Hola"));
        assert_eq!(state.user_input, "Goodbye");
        assert!(matches!(state.notice, Some(Notice::Error(ref m)) if m.contains("invalid key")));
    }

    #[test]
    fn test_reset_clears_text_and_result_but_not_languages() {
        let mut state = SessionState::new();
        state.select_languages(LanguagePair::new(Language::English, Language::French));
        state.record_outcome("Good morning", &Ok("Bonjour".to_string()));

        state.reset();

        assert_eq!(state.user_input, "");
        assert_eq!(state.translated_text, None);
        assert_eq!(state.notice, None);
        assert_eq!(state.input_language, Language::English);
        assert_eq!(state.output_language, Language::French);
    }

    #[test]
    fn test_notice_serializes_with_level() {
        let json = serde_json::to_value(Notice::Error("boom".to_string())).unwrap();
        assert_eq!(json["level"], "error");
        assert_eq!(json["message"], "boom");
    }
}
