use std::env;

use chef_agent::{recommend_from_image, render};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Get the image path from command-line arguments
    let args: Vec<String> = env::args().collect();
    let as_json = args.iter().any(|a| a == "--json");
    let image_path = args
        .iter()
        .skip(1)
        .find(|a| !a.starts_with("--"))
        .ok_or("Usage: chef-agent <image> [--json]")?;

    let recommendation = recommend_from_image(image_path).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&recommendation.record)?);
    } else if recommendation.record.is_empty() {
        // Nothing matched the expected format, show the reply as-is
        println!("{}", recommendation.text);
    } else {
        print!("{}", render(&recommendation.record));
    }

    Ok(())
}
