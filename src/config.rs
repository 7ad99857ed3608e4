use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ChefConfig {
    /// Provider to use when not specified
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default = "default_providers")]
    pub providers: HashMap<String, ProviderConfig>,
    /// Agent loop settings
    #[serde(default)]
    pub agent: AgentConfig,
    /// Web search tool settings
    #[serde(default)]
    pub search: SearchConfig,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Configuration for a specific LLM provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    pub enabled: bool,
    /// Model identifier (e.g., "gpt-4o-mini", "claude-sonnet-4.5")
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

/// Configuration for the agent's tool-calling loop
#[derive(Debug, Deserialize, Clone)]
pub struct AgentConfig {
    /// Maximum provider round-trips before giving up on a settling reply
    #[serde(default = "default_max_tool_turns")]
    pub max_tool_turns: u32,
    /// The user question sent alongside the image
    #[serde(default = "default_question")]
    pub question: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_tool_turns: default_max_tool_turns(),
            question: default_question(),
        }
    }
}

/// Configuration for the Tavily web search tool
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Whether the web_search tool is offered to the model
    #[serde(default = "default_search_enabled")]
    pub enabled: bool,
    /// API key (can also be set via TAVILY_API_KEY)
    pub api_key: Option<String>,
    /// Search API endpoint
    #[serde(default = "default_search_base_url")]
    pub base_url: String,
    /// Result count cap per query
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: default_search_enabled(),
            api_key: None,
            base_url: default_search_base_url(),
            max_results: default_max_results(),
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "openai".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_max_tool_turns() -> u32 {
    8
}

fn default_question() -> String {
    "Recommend a recipe based on the ingredients in this image.".to_string()
}

fn default_search_enabled() -> bool {
    true
}

fn default_search_base_url() -> String {
    "https://api.tavily.com".to_string()
}

fn default_max_results() -> u32 {
    5
}

fn default_timeout() -> u64 {
    30
}

/// The provider map used when neither file nor environment configures one.
/// Keeps the CLI usable with nothing but OPENAI_API_KEY set.
fn default_providers() -> HashMap<String, ProviderConfig> {
    let mut providers = HashMap::new();
    providers.insert(
        "openai".to_string(),
        ProviderConfig {
            enabled: true,
            model: "gpt-4o-mini".to_string(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        },
    );
    providers
}

impl ChefConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with CHEF__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: CHEF__PROVIDERS__OPENAI__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            // Use double underscore for nested: CHEF__PROVIDERS__OPENAI__API_KEY
            .add_source(
                Environment::with_prefix("CHEF")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_provider(), "openai");
        assert_eq!(default_temperature(), 0.7);
        assert_eq!(default_max_tokens(), 2000);
        assert_eq!(default_max_tool_turns(), 8);
        assert_eq!(default_max_results(), 5);
        assert_eq!(default_timeout(), 30);
    }

    #[test]
    fn test_agent_config_default() {
        let agent = AgentConfig::default();
        assert_eq!(agent.max_tool_turns, 8);
        assert!(agent.question.contains("image"));
    }

    #[test]
    fn test_search_config_default() {
        let search = SearchConfig::default();
        assert!(search.enabled);
        assert!(search.api_key.is_none());
        assert_eq!(search.base_url, "https://api.tavily.com");
        assert_eq!(search.max_results, 5);
    }

    #[test]
    fn test_default_providers_has_openai() {
        let providers = default_providers();
        let openai = providers.get("openai").expect("openai entry");
        assert!(openai.enabled);
        assert_eq!(openai.model, "gpt-4o-mini");
        assert!(openai.api_key.is_none());
        assert!(openai.base_url.is_none());
    }

    #[test]
    fn test_config_structure() {
        let config = ChefConfig {
            default_provider: "openai".to_string(),
            providers: default_providers(),
            agent: AgentConfig::default(),
            search: SearchConfig::default(),
            timeout: default_timeout(),
        };

        assert_eq!(config.default_provider, "openai");
        assert!(config.providers.contains_key("openai"));
    }
}
