use thiserror::Error;

/// Problems found while loading configuration. All of these abort startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("OPENAI_API_KEY not found in {0}")]
    MissingApiKey(String),

    #[error("Unsupported LLM provider: {0}")]
    UnsupportedProvider(String),

    #[error("Invalid setting `{name}`: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}

/// Input rejected before any request leaves the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter some text to translate.")]
    EmptyText,

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

/// Failures of the text-generation call itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("Could not reach the translation service: {0}")]
    Network(String),

    #[error("The translation service did not respond in time")]
    Timeout,

    #[error("The translation service rejected the API key: {0}")]
    Authentication(String),

    #[error("The translation service is rate limiting requests: {0}")]
    RateLimited(String),

    #[error("The translation service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("The translation service returned an unreadable response: {0}")]
    MalformedResponse(String),

    #[error("The translation was cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Lookup and bookkeeping failures of the per-browser UI state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(uuid::Uuid),

    #[error("A translation is already in progress for this session")]
    Busy,
}
