mod web_search;

pub use web_search::WebSearchTool;

use crate::error::ChefError;
use async_trait::async_trait;
use serde_json::Value;

/// A tool definition in the shape providers send to the model:
/// name, human description, and a JSON Schema for the arguments.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// A callable the model may invoke mid-generation
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name as exposed to the model (e.g., "web_search")
    fn name(&self) -> &str;

    /// One-line description the model sees when deciding whether to call
    fn description(&self) -> &str;

    /// JSON Schema describing the arguments object
    fn parameters(&self) -> Value;

    /// Execute the tool with the model-supplied arguments
    async fn call(&self, arguments: Value) -> Result<Value, ChefError>;

    /// Assemble the provider-agnostic definition for this tool
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters(),
        }
    }
}
