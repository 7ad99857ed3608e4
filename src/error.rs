use thiserror::Error;

/// Errors that can occur while producing a recommendation
#[derive(Error, Debug)]
pub enum ChefError {
    /// HTTP request to a provider or tool failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to decode a JSON payload
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),

    /// Failed to read the image file
    #[error("Failed to read image: {0}")]
    Image(#[from] std::io::Error),

    /// Image file extension is not one the providers accept
    #[error("Unsupported image format: {0} (use .png, .jpg, .jpeg, .gif or .webp)")]
    UnsupportedImage(String),

    /// No API key in config or environment
    #[error("{0} not found in config or environment")]
    MissingApiKey(&'static str),

    /// Provider returned an error or a response with an unexpected shape
    #[error("Provider error: {0}")]
    Provider(String),

    /// Web search request failed
    #[error("Search error: {0}")]
    Search(String),

    /// Model requested a tool the agent does not carry
    #[error("Model requested unknown tool: {0}")]
    UnknownTool(String),

    /// Model kept calling tools past the configured turn budget
    #[error("Tool loop did not settle within {0} turns")]
    ToolLoopExceeded(u32),

    /// Provider exists but is disabled in configuration
    #[error("Provider '{0}' is not enabled in configuration")]
    ProviderDisabled(String),

    /// Provider name not recognized
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
}
