pub mod agent;
pub mod config;
pub mod error;
pub mod image;
pub mod model;
pub mod parser;
pub mod providers;
pub mod render;
pub mod tools;

pub use crate::agent::ChefAgent;
pub use crate::config::ChefConfig;
pub use crate::error::ChefError;
pub use crate::image::ImageSource;
pub use crate::model::RecipeRecord;
pub use crate::parser::parse_response;
pub use crate::render::render;

use crate::providers::ProviderFactory;
use crate::tools::WebSearchTool;
use log::{debug, warn};
use std::time::Duration;

/// A finished agent run: the raw model text and the record parsed from it.
/// The raw text is kept because the parser drops lines it does not match.
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub text: String,
    pub record: RecipeRecord,
}

/// Recommend a recipe from an ingredient photo on disk, using configuration
/// from config.toml / CHEF__* environment variables.
pub async fn recommend_from_image(path: &str) -> Result<Recommendation, ChefError> {
    let config = ChefConfig::load()?;
    recommend_with_config(&config, &ImageSource::Path(path.to_string())).await
}

/// Fully parameterized recommendation run
pub async fn recommend_with_config(
    config: &ChefConfig,
    source: &ImageSource,
) -> Result<Recommendation, ChefError> {
    let provider = ProviderFactory::get_default_provider(config)?;
    let mut agent = ChefAgent::new(provider, config.agent.max_tool_turns);

    if config.search.enabled {
        match WebSearchTool::new(&config.search, Duration::from_secs(config.timeout)) {
            Ok(tool) => agent = agent.with_tool(Box::new(tool)),
            // Run without search rather than refusing to run at all
            Err(ChefError::MissingApiKey(var)) => {
                warn!("{} not set, continuing without web search", var)
            }
            Err(e) => return Err(e),
        }
    }

    let encoded = image::encode(source).await?;
    let text = agent.run(&config.agent.question, Some(&encoded)).await?;
    debug!("Model reply:\n{}", text);

    let record = parse_response(&text);
    if record.is_empty() {
        warn!("Reply did not match the expected format; fields will be empty");
    }

    Ok(Recommendation { text, record })
}
