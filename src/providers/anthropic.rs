use crate::agent::{ChatMessage, ChatTurn, ContentPart, Role, ToolCall};
use crate::config::ProviderConfig;
use crate::error::ChefError;
use crate::providers::ChatProvider;
use crate::tools::ToolSpec;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider from configuration
    pub fn new(config: &ProviderConfig, timeout: Duration) -> Result<Self, ChefError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .ok_or(ChefError::MissingApiKey("ANTHROPIC_API_KEY"))?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "https://api.anthropic.com".to_string());

        Ok(AnthropicProvider {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        AnthropicProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }

    /// Split the transcript into the top-level system string and the wire
    /// message array. Consecutive tool results merge into one user message,
    /// as the Messages API requires alternating roles.
    fn to_wire(messages: &[ChatMessage]) -> (String, Vec<Value>) {
        let mut system = String::new();
        let mut wire = Vec::new();

        let mut iter = messages.iter().peekable();
        while let Some(message) = iter.next() {
            match message.role {
                Role::System => {
                    system = joined_text(message);
                }
                Role::User => {
                    let content: Vec<Value> = message
                        .parts
                        .iter()
                        .map(|part| match part {
                            ContentPart::Text(text) => json!({"type": "text", "text": text}),
                            ContentPart::Image { media_type, data } => json!({
                                "type": "image",
                                "source": {
                                    "type": "base64",
                                    "media_type": media_type,
                                    "data": data
                                }
                            }),
                        })
                        .collect();
                    wire.push(json!({"role": "user", "content": content}));
                }
                Role::Assistant => {
                    if message.tool_calls.is_empty() {
                        wire.push(json!({
                            "role": "assistant",
                            "content": [{"type": "text", "text": joined_text(message)}]
                        }));
                    } else {
                        let blocks: Vec<Value> = message
                            .tool_calls
                            .iter()
                            .map(|call| {
                                json!({
                                    "type": "tool_use",
                                    "id": call.id,
                                    "name": call.name,
                                    "input": call.arguments
                                })
                            })
                            .collect();
                        wire.push(json!({"role": "assistant", "content": blocks}));
                    }
                }
                Role::Tool => {
                    let mut blocks = vec![tool_result_block(message)];
                    while let Some(next) = iter.next_if(|next| next.role == Role::Tool) {
                        blocks.push(tool_result_block(next));
                    }
                    wire.push(json!({"role": "user", "content": blocks}));
                }
            }
        }

        (system, wire)
    }
}

fn tool_result_block(message: &ChatMessage) -> Value {
    json!({
        "type": "tool_result",
        "tool_use_id": message.tool_call_id.as_deref().unwrap_or_default(),
        "content": joined_text(message)
    })
}

fn joined_text(message: &ChatMessage) -> String {
    message
        .parts
        .iter()
        .filter_map(|p| match p {
            ContentPart::Text(text) => Some(text.as_str()),
            ContentPart::Image { .. } => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl ChatProvider for AnthropicProvider {
    fn provider_name(&self) -> &str {
        "anthropic"
    }

    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolSpec],
    ) -> Result<ChatTurn, ChefError> {
        let (system, wire_messages) = Self::to_wire(messages);

        let mut body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
            "messages": wire_messages
        });
        if !system.is_empty() {
            body["system"] = json!(system);
        }
        if !tools.is_empty() {
            let wire_tools: Vec<Value> = tools
                .iter()
                .map(|t| {
                    json!({
                        "name": t.name,
                        "description": t.description,
                        "input_schema": t.parameters
                    })
                })
                .collect();
            body["tools"] = json!(wire_tools);
        }

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(ChefError::Provider(format!(
                "Anthropic request failed ({}): {}",
                status, error_text
            )));
        }

        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);

        let content = response_body["content"].as_array().cloned().unwrap_or_default();

        if response_body["stop_reason"] == "tool_use" {
            let tool_calls: Vec<ToolCall> = content
                .iter()
                .filter(|block| block["type"] == "tool_use")
                .map(|block| ToolCall {
                    id: block["id"].as_str().unwrap_or_default().to_string(),
                    name: block["name"].as_str().unwrap_or_default().to_string(),
                    arguments: block["input"].clone(),
                })
                .collect();
            if tool_calls.is_empty() {
                return Err(ChefError::Provider(
                    "stop_reason was tool_use but no tool_use block found".to_string(),
                ));
            }
            return Ok(ChatTurn::ToolCalls(tool_calls));
        }

        let text = content
            .iter()
            .find_map(|block| block["text"].as_str())
            .ok_or_else(|| {
                ChefError::Provider("Failed to extract content from Anthropic response".to_string())
            })?
            .to_string();

        Ok(ChatTurn::Text(text))
    }
}
