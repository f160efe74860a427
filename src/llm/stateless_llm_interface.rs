use async_trait::async_trait;

use crate::error::BackendError;
use crate::translate::prompt::PromptTurn;

/// One complete, non-streaming generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<PromptTurn>,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

/// Interface for a stateless language model
/// Stateless means the LLM keeps no memory between calls; every request
/// carries all the turns it needs.
#[async_trait]
pub trait StatelessLLMInterface: Send + Sync {
    /// Generate a chat completion and return the full text of the first choice
    async fn chat_completion(&self, request: ChatRequest) -> Result<String, BackendError>;
}
