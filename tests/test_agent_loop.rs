use chef_agent::config::{AgentConfig, ChefConfig, ProviderConfig, SearchConfig};
use chef_agent::{recommend_with_config, ChefError, ImageSource};
use mockito::{Matcher, Server, ServerGuard};
use std::collections::HashMap;

fn test_config(provider_url: &str, search: SearchConfig) -> ChefConfig {
    let mut providers = HashMap::new();
    providers.insert(
        "openai".to_string(),
        ProviderConfig {
            enabled: true,
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            api_key: Some("fake_api_key".to_string()),
            base_url: Some(provider_url.to_string()),
        },
    );

    ChefConfig {
        default_provider: "openai".to_string(),
        providers,
        agent: AgentConfig::default(),
        search,
        timeout: 30,
    }
}

fn search_config(url: Option<String>) -> SearchConfig {
    SearchConfig {
        enabled: url.is_some(),
        api_key: Some("fake_tavily_key".to_string()),
        base_url: url.unwrap_or_else(|| "https://api.tavily.com".to_string()),
        max_results: 5,
    }
}

async fn mock_text_reply(server: &mut ServerGuard) -> mockito::Mock {
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "choices": [{
                    "message": {
                        "content": "Name: Veggie Stir Fry\nServing Size: 300g\nCalories: 450\nProtein: 20g\nCarbohydrates: 50g\nFat: 15g\nIngredients:\n- broccoli\n- carrot\nInstructions:\n1. Chop vegetables\n2. Stir fry for 5 minutes"
                    }
                }]
            }"#,
        )
        .create_async()
        .await
}

/// Reply without tool use: one round-trip, parsed record comes back filled
#[tokio::test]
async fn test_direct_reply() {
    let mut server = Server::new_async().await;
    let mock = mock_text_reply(&mut server).await;

    let config = test_config(&server.url(), search_config(None));
    let source = ImageSource::Base64("aGVsbG8=".to_string());

    let recommendation = recommend_with_config(&config, &source).await.unwrap();

    assert_eq!(recommendation.record.name, "Veggie Stir Fry");
    assert_eq!(recommendation.record.ingredients, vec!["broccoli", "carrot"]);
    assert!(recommendation.text.contains("Stir fry for 5 minutes"));
    mock.assert_async().await;
}

/// Full loop: the model asks for a web search, gets the mocked Tavily
/// results back, then settles on a formatted reply
#[tokio::test]
async fn test_tool_call_round_trip() {
    let mut provider_server = Server::new_async().await;
    let mut search_server = Server::new_async().await;

    // First round: the model requests a search. Registered first so the
    // more specific follow-up mock below takes precedence when it matches.
    let tool_call_mock = provider_server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "choices": [{
                    "message": {
                        "content": null,
                        "tool_calls": [{
                            "id": "call_1",
                            "type": "function",
                            "function": {
                                "name": "web_search",
                                "arguments": "{\"query\": \"veggie stir fry nutrition\"}"
                            }
                        }]
                    }
                }]
            }"#,
        )
        .expect(1)
        .create_async()
        .await;

    // Second round: the transcript now carries a tool result
    let final_mock = provider_server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::Regex("tool_call_id".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "choices": [{
                    "message": {
                        "content": "Name: Veggie Stir Fry\nCalories: 450\nIngredients:\n- broccoli\nInstructions:\n1. Chop vegetables"
                    }
                }]
            }"#,
        )
        .expect(1)
        .create_async()
        .await;

    let search_mock = search_server
        .mock("POST", "/search")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "answer": "Roughly 450 kcal per serving.",
                "results": [
                    {"title": "Stir fry nutrition", "url": "https://example.com", "content": "450 kcal"}
                ]
            }"#,
        )
        .expect(1)
        .create_async()
        .await;

    let config = test_config(
        &provider_server.url(),
        search_config(Some(search_server.url())),
    );
    let source = ImageSource::Base64("aGVsbG8=".to_string());

    let recommendation = recommend_with_config(&config, &source).await.unwrap();

    assert_eq!(recommendation.record.name, "Veggie Stir Fry");
    assert_eq!(recommendation.record.calories, "450");
    assert_eq!(recommendation.record.ingredients, vec!["broccoli"]);

    tool_call_mock.assert_async().await;
    final_mock.assert_async().await;
    search_mock.assert_async().await;
}

/// Provider API errors surface as typed errors, not panics
#[tokio::test]
async fn test_provider_error_propagates() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(500)
        .with_body(r#"{"error": "overloaded"}"#)
        .create_async()
        .await;

    let config = test_config(&server.url(), search_config(None));
    let source = ImageSource::Base64("aGVsbG8=".to_string());

    let result = recommend_with_config(&config, &source).await;
    assert!(matches!(result, Err(ChefError::Provider(_))));
    mock.assert_async().await;
}

/// A reply in the wrong shape still produces a recommendation; the record
/// is empty and the raw text is preserved for the caller
#[tokio::test]
async fn test_unparseable_reply_degrades() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"choices": [{"message": {"content": "I could not identify any ingredients."}}]}"#,
        )
        .create_async()
        .await;

    let config = test_config(&server.url(), search_config(None));
    let source = ImageSource::Base64("aGVsbG8=".to_string());

    let recommendation = recommend_with_config(&config, &source).await.unwrap();
    assert!(recommendation.record.is_empty());
    assert_eq!(recommendation.text, "I could not identify any ingredients.");
}
