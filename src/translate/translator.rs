use std::sync::Arc;
use tracing::{debug, warn};

use super::language::LanguagePair;
use super::prompt::build_prompt;
use crate::config_manager::LlmConfig;
use crate::error::{TranslationError, ValidationError};
use crate::llm::{ChatRequest, StatelessLLMInterface};

/// A validated unit of work: the text is known to contain something besides whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    language_pair: LanguagePair,
    source_text: String,
}

impl TranslationRequest {
    pub fn new(
        language_pair: LanguagePair,
        source_text: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let source_text = source_text.into();
        if source_text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }
        Ok(Self {
            language_pair,
            source_text,
        })
    }

    pub fn language_pair(&self) -> LanguagePair {
        self.language_pair
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }
}

/// Sampling settings sent with every request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            max_tokens: Some(512),
        }
    }
}

impl From<&LlmConfig> for GenerationSettings {
    fn from(config: &LlmConfig) -> Self {
        Self {
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

/// Turns a language pair and text into one chat request and returns the
/// model's answer unmodified. Holds no per-call state.
#[derive(Clone)]
pub struct Translator {
    llm: Arc<dyn StatelessLLMInterface>,
    settings: GenerationSettings,
}

impl Translator {
    pub fn new(llm: Arc<dyn StatelessLLMInterface>, settings: GenerationSettings) -> Self {
        Self { llm, settings }
    }

    pub fn settings(&self) -> GenerationSettings {
        self.settings
    }

    pub fn chat_request(&self, request: &TranslationRequest) -> ChatRequest {
        ChatRequest {
            messages: build_prompt(&request.language_pair, &request.source_text),
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        }
    }

    pub async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslationError> {
        let pair = request.language_pair();
        debug!(
            "Translating {} chars from {} to {}",
            request.source_text().chars().count(),
            pair.input_language,
            pair.output_language
        );

        self.llm
            .chat_completion(self.chat_request(request))
            .await
            .map_err(|e| {
                warn!("Translation backend failed: {}", e);
                TranslationError::Backend(e)
            })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::BackendError;
    use crate::translate::language::Language;
    use crate::translate::prompt::{PromptTurn, Role};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every request and answers from a fixed script.
    pub(crate) struct StubLLM {
        pub reply: Result<String, BackendError>,
        pub requests: Mutex<Vec<ChatRequest>>,
    }

    impl StubLLM {
        pub(crate) fn replying(reply: Result<String, BackendError>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                requests: Mutex::new(Vec::new()),
            })
        }

        pub(crate) fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl StatelessLLMInterface for StubLLM {
        async fn chat_completion(&self, request: ChatRequest) -> Result<String, BackendError> {
            self.requests.lock().unwrap().push(request);
            self.reply.clone()
        }
    }

    fn translator(stub: &Arc<StubLLM>, settings: GenerationSettings) -> Translator {
        Translator::new(stub.clone(), settings)
    }

    impl Translator {
        async fn translate_text(
            &self,
            input_language: &str,
            output_language: &str,
            source_text: &str,
        ) -> Result<String, TranslationError> {
            let pair = LanguagePair::parse(input_language, output_language)?;
            let request = TranslationRequest::new(pair, source_text)?;
            self.translate(&request).await
        }
    }

    #[tokio::test]
    async fn test_good_morning_to_french() {
        let stub = StubLLM::replying(Ok("Bonjour".to_string()));
        let translator = translator(&stub, GenerationSettings::default());

        let result = translator
            .translate_text("English", "French", "Good morning")
            .await
            .unwrap();
        assert_eq!(result, "Bonjour");

        let requests = stub.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].messages,
            vec![
                PromptTurn::system("You are a helpful assistant that translates English to French."),
                PromptTurn::human("Good morning"),
            ]
        );
    }

    #[tokio::test]
    async fn test_settings_are_forwarded_unchanged() {
        let stub = StubLLM::replying(Ok("ok".to_string()));
        let settings = GenerationSettings {
            temperature: 0.0,
            max_tokens: None,
        };
        let translator = translator(&stub, settings);

        translator.translate_text("Bengali", "Gujarati", "text").await.unwrap();
        translator.translate_text("Bengali", "Gujarati", "text").await.unwrap();

        let requests = stub.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        for request in requests.iter() {
            assert_eq!(request.temperature, 0.0);
            assert_eq!(request.max_tokens, None);
        }
        assert_eq!(requests[0], requests[1]);
    }

    #[tokio::test]
    async fn test_whitespace_never_reaches_backend() {
        let stub = StubLLM::replying(Ok("unused".to_string()));
        let translator = translator(&stub, GenerationSettings::default());

        for text in ["", "   ", "\n\t  \r\n"] {
            let err = translator.translate_text("English", "French", text).await.unwrap_err();
            assert_eq!(err, TranslationError::Validation(ValidationError::EmptyText));
        }
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_language_never_reaches_backend() {
        let stub = StubLLM::replying(Ok("unused".to_string()));
        let translator = translator(&stub, GenerationSettings::default());

        let err = translator.translate_text("Elvish", "French", "hi").await.unwrap_err();
        assert!(matches!(
            err,
            TranslationError::Validation(ValidationError::UnsupportedLanguage(_))
        ));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_authentication_failure_is_backend_error() {
        let stub = StubLLM::replying(Err(BackendError::Authentication("bad key".to_string())));
        let translator = translator(&stub, GenerationSettings::default());

        let err = translator.translate_text("English", "French", "Hello").await.unwrap_err();
        assert_eq!(
            err,
            TranslationError::Backend(BackendError::Authentication("bad key".to_string()))
        );
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_output_is_not_post_processed() {
        let stub = StubLLM::replying(Ok("  Hola\n\n".to_string()));
        let translator = translator(&stub, GenerationSettings::default());
        let result = translator.translate_text("English", "Spanish", "Hi").await.unwrap();
        assert_eq!(result, "  Hola\n\n");
    }

    #[test]
    fn test_source_text_is_stored_untrimmed() {
        let pair = LanguagePair::new(Language::Arabic, Language::Persian);
        let request = TranslationRequest::new(pair, "  padded  ").unwrap();
        assert_eq!(request.source_text(), "  padded  ");
    }

    #[test]
    fn test_chat_request_shape() {
        let stub = StubLLM::replying(Ok(String::new()));
        let translator = translator(&stub, GenerationSettings::default());
        let pair = LanguagePair::new(Language::Chinese, Language::Japanese);
        let request = TranslationRequest::new(pair, "你好").unwrap();

        let chat = translator.chat_request(&request);
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[0].role, Role::System);
        assert_eq!(chat.messages[1].role, Role::Human);
        assert_eq!(chat.temperature, 0.0);
        assert_eq!(chat.max_tokens, Some(512));
    }
}
