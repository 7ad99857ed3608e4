//! The agent loop and the message records it exchanges with providers.
//!
//! The request/response boundary is modeled as plain records with fixed
//! named fields; providers alone translate them to and from wire JSON.

mod prompt;

pub use prompt::SYSTEM_PROMPT;

use crate::error::ChefError;
use crate::image::EncodedImage;
use crate::providers::ChatProvider;
use crate::tools::{Tool, ToolSpec};
use log::{debug, info, warn};
use serde_json::{json, Value};

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// One piece of message content
#[derive(Debug, Clone)]
pub enum ContentPart {
    Text(String),
    /// Base64-encoded image data with its MIME type
    Image { media_type: String, data: String },
}

/// A tool invocation requested by the model
#[derive(Debug, Clone)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: Value,
}

/// One entry in the conversation transcript
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub parts: Vec<ContentPart>,
    /// Tool invocations carried by an assistant turn
    pub tool_calls: Vec<ToolCall>,
    /// For Role::Tool, the id of the call this message answers
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    pub fn system(text: &str) -> Self {
        ChatMessage {
            role: Role::System,
            parts: vec![ContentPart::Text(text.to_string())],
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn user(text: &str) -> Self {
        ChatMessage {
            role: Role::User,
            parts: vec![ContentPart::Text(text.to_string())],
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn user_with_image(text: &str, image: &EncodedImage) -> Self {
        ChatMessage {
            role: Role::User,
            parts: vec![
                ContentPart::Text(text.to_string()),
                ContentPart::Image {
                    media_type: image.media_type.clone(),
                    data: image.data.clone(),
                },
            ],
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    /// The assistant turn that requested tool calls, replayed so the
    /// provider can serialize the transcript back out
    pub fn assistant_tool_calls(calls: Vec<ToolCall>) -> Self {
        ChatMessage {
            role: Role::Assistant,
            parts: Vec::new(),
            tool_calls: calls,
            tool_call_id: None,
        }
    }

    pub fn tool_result(call_id: &str, result: Value) -> Self {
        ChatMessage {
            role: Role::Tool,
            parts: vec![ContentPart::Text(result.to_string())],
            tool_calls: Vec::new(),
            tool_call_id: Some(call_id.to_string()),
        }
    }
}

/// What one provider round-trip produced
#[derive(Debug, Clone)]
pub enum ChatTurn {
    /// The model settled on a final text reply
    Text(String),
    /// The model wants tool results before answering
    ToolCalls(Vec<ToolCall>),
}

/// Drives a provider conversation until the model settles on a text reply,
/// executing tool calls along the way
pub struct ChefAgent {
    provider: Box<dyn ChatProvider>,
    tools: Vec<Box<dyn Tool>>,
    max_tool_turns: u32,
}

impl ChefAgent {
    pub fn new(provider: Box<dyn ChatProvider>, max_tool_turns: u32) -> Self {
        ChefAgent {
            provider,
            tools: Vec::new(),
            max_tool_turns,
        }
    }

    pub fn with_tool(mut self, tool: Box<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    /// Run the conversation to completion and return the model's final text
    pub async fn run(
        &self,
        question: &str,
        image: Option<&EncodedImage>,
    ) -> Result<String, ChefError> {
        let mut messages = vec![ChatMessage::system(SYSTEM_PROMPT)];
        messages.push(match image {
            Some(img) => ChatMessage::user_with_image(question, img),
            None => ChatMessage::user(question),
        });

        let specs: Vec<ToolSpec> = self.tools.iter().map(|t| t.spec()).collect();

        for turn in 0..self.max_tool_turns {
            match self.provider.chat(&messages, &specs).await? {
                ChatTurn::Text(text) => {
                    debug!(
                        "Model settled after {} round-trip(s), {} chars",
                        turn + 1,
                        text.len()
                    );
                    return Ok(text);
                }
                ChatTurn::ToolCalls(calls) => {
                    info!("Model requested {} tool call(s)", calls.len());
                    messages.push(ChatMessage::assistant_tool_calls(calls.clone()));
                    for call in calls {
                        let result = self.dispatch(&call).await?;
                        messages.push(ChatMessage::tool_result(&call.id, result));
                    }
                }
            }
        }

        Err(ChefError::ToolLoopExceeded(self.max_tool_turns))
    }

    /// Execute one requested call. An unknown tool name is fatal; a tool
    /// that runs and fails is reported back to the model as its result so
    /// the conversation can continue without it.
    async fn dispatch(&self, call: &ToolCall) -> Result<Value, ChefError> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.name() == call.name)
            .ok_or_else(|| ChefError::UnknownTool(call.name.clone()))?;

        debug!("Dispatching tool '{}' with {}", call.name, call.arguments);

        match tool.call(call.arguments.clone()).await {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!("Tool '{}' failed: {}", call.name, e);
                Ok(json!({ "error": e.to_string() }))
            }
        }
    }
}
