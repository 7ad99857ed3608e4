use crate::config::SearchConfig;
use crate::error::ChefError;
use crate::tools::Tool;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// Web search backed by the Tavily search API
pub struct WebSearchTool {
    client: Client,
    api_key: String,
    base_url: String,
    max_results: u32,
}

impl WebSearchTool {
    /// Create a new search tool from configuration
    pub fn new(config: &SearchConfig, timeout: Duration) -> Result<Self, ChefError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("TAVILY_API_KEY").ok())
            .ok_or(ChefError::MissingApiKey("TAVILY_API_KEY"))?;

        Ok(WebSearchTool {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url: config.base_url.clone(),
            max_results: config.max_results,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        WebSearchTool {
            client: Client::new(),
            api_key,
            base_url,
            max_results: 5,
        }
    }

    async fn search(&self, query: &str) -> Result<Value, ChefError> {
        debug!("Searching the web for: {}", query);

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "query": query,
                "max_results": self.max_results
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(ChefError::Search(format!(
                "Tavily request failed ({}): {}",
                status, error_text
            )));
        }

        let body: Value = response.json().await?;
        debug!("Tavily response: {:?}", body);

        // Reshape into the compact form handed back to the model
        let results: Vec<Value> = body["results"]
            .as_array()
            .unwrap_or(&Vec::new())
            .iter()
            .map(|r| {
                json!({
                    "title": r["title"].as_str().unwrap_or(""),
                    "url": r["url"].as_str().unwrap_or(""),
                    "content": r["content"].as_str().unwrap_or("")
                })
            })
            .collect();

        let mut reshaped = json!({ "results": results });
        if let Some(answer) = body["answer"].as_str() {
            reshaped["answer"] = json!(answer);
        }

        Ok(reshaped)
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web for information."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                }
            },
            "required": ["query"]
        })
    }

    async fn call(&self, arguments: Value) -> Result<Value, ChefError> {
        let query = arguments["query"]
            .as_str()
            .ok_or_else(|| ChefError::Search("missing 'query' argument".to_string()))?;

        self.search(query).await
    }
}
