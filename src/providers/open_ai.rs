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

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider from configuration
    pub fn new(config: &ProviderConfig, timeout: Duration) -> Result<Self, ChefError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or(ChefError::MissingApiKey("OPENAI_API_KEY"))?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "https://api.openai.com".to_string());

        Ok(OpenAIProvider {
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
        OpenAIProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }

    fn to_wire(message: &ChatMessage) -> Value {
        match message.role {
            Role::System => json!({"role": "system", "content": joined_text(message)}),
            Role::User => {
                if message
                    .parts
                    .iter()
                    .any(|p| matches!(p, ContentPart::Image { .. }))
                {
                    let content: Vec<Value> = message
                        .parts
                        .iter()
                        .map(|part| match part {
                            ContentPart::Text(text) => json!({"type": "text", "text": text}),
                            ContentPart::Image { media_type, data } => json!({
                                "type": "image_url",
                                "image_url": {
                                    "url": format!("data:{};base64,{}", media_type, data)
                                }
                            }),
                        })
                        .collect();
                    json!({"role": "user", "content": content})
                } else {
                    json!({"role": "user", "content": joined_text(message)})
                }
            }
            Role::Assistant => {
                if message.tool_calls.is_empty() {
                    json!({"role": "assistant", "content": joined_text(message)})
                } else {
                    let calls: Vec<Value> = message
                        .tool_calls
                        .iter()
                        .map(|call| {
                            json!({
                                "id": call.id,
                                "type": "function",
                                "function": {
                                    "name": call.name,
                                    // OpenAI carries arguments as an encoded string
                                    "arguments": call.arguments.to_string()
                                }
                            })
                        })
                        .collect();
                    json!({"role": "assistant", "content": Value::Null, "tool_calls": calls})
                }
            }
            Role::Tool => json!({
                "role": "tool",
                "tool_call_id": message.tool_call_id.as_deref().unwrap_or_default(),
                "content": joined_text(message)
            }),
        }
    }
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
impl ChatProvider for OpenAIProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolSpec],
    ) -> Result<ChatTurn, ChefError> {
        let wire_messages: Vec<Value> = messages.iter().map(Self::to_wire).collect();

        let mut body = json!({
            "model": self.model,
            "messages": wire_messages,
            "temperature": self.temperature,
            "max_tokens": self.max_tokens
        });
        if !tools.is_empty() {
            let wire_tools: Vec<Value> = tools
                .iter()
                .map(|t| {
                    json!({
                        "type": "function",
                        "function": {
                            "name": t.name,
                            "description": t.description,
                            "parameters": t.parameters
                        }
                    })
                })
                .collect();
            body["tools"] = json!(wire_tools);
        }

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(ChefError::Provider(format!(
                "OpenAI request failed ({}): {}",
                status, error_text
            )));
        }

        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);

        let message = &response_body["choices"][0]["message"];

        if let Some(calls) = message["tool_calls"].as_array() {
            if !calls.is_empty() {
                let mut tool_calls = Vec::new();
                for call in calls {
                    let name = call["function"]["name"]
                        .as_str()
                        .ok_or_else(|| {
                            ChefError::Provider("Tool call without a function name".to_string())
                        })?
                        .to_string();
                    let arguments: Value =
                        serde_json::from_str(call["function"]["arguments"].as_str().unwrap_or("{}"))?;
                    tool_calls.push(ToolCall {
                        id: call["id"].as_str().unwrap_or_default().to_string(),
                        name,
                        arguments,
                    });
                }
                return Ok(ChatTurn::ToolCalls(tool_calls));
            }
        }

        let content = message["content"]
            .as_str()
            .ok_or_else(|| {
                ChefError::Provider("Failed to extract content from OpenAI response".to_string())
            })?
            .to_string();

        Ok(ChatTurn::Text(content))
    }
}
