mod anthropic;
mod factory;
mod open_ai;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use open_ai::OpenAIProvider;

use crate::agent::{ChatMessage, ChatTurn};
use crate::error::ChefError;
use crate::tools::ToolSpec;
use async_trait::async_trait;

/// Unified trait for all LLM providers
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Run one model round-trip over the transcript, with the given tools
    /// on offer. Returns either the final text or the tool calls the model
    /// wants executed first.
    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolSpec],
    ) -> Result<ChatTurn, ChefError>;
}
