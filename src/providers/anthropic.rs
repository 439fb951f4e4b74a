use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{LLMProvider, Message, Role};
use crate::core::error::RelayError;
use crate::providers::base_client::{AuthStyle, BaseApiClient};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
}

#[derive(Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

#[derive(Clone)]
pub struct AnthropicProvider {
    client: BaseApiClient,
    api_key: Option<String>,
}

impl AnthropicProvider {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_endpoint("https://api.anthropic.com/v1".to_string(), api_key)
    }

    pub fn with_endpoint(endpoint: String, api_key: Option<String>) -> Self {
        Self {
            client: BaseApiClient::new(
                endpoint,
                AuthStyle::Header("x-api-key"),
                vec![("anthropic-version", ANTHROPIC_VERSION)],
            ),
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl LLMProvider for AnthropicProvider {
    async fn invoke(&self, messages: &[Message], model: &str) -> Result<String, RelayError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(RelayError::Config(
                "ANTHROPIC_API_KEY is not set; the anthropic provider is disabled".to_string(),
            ));
        };

        let payload = build_payload(messages, model);
        let response = self.client.post("messages", api_key, &payload).await?;
        let response_body = response.text().await?;
        extract_reply(&response_body)
    }
}

/// The Messages API takes the system instruction as a top-level field, not a
/// message. The last system turn wins; the field is omitted when none exists.
fn build_payload(messages: &[Message], model: &str) -> AnthropicRequest {
    let system = messages
        .iter()
        .filter(|m| m.role == Role::System)
        .next_back()
        .map(|m| m.content.clone());

    let turns: Vec<AnthropicMessage> = messages
        .iter()
        .filter(|m| m.role != Role::System)
        .map(|m| AnthropicMessage {
            role: match m.role {
                Role::User => "user".to_string(),
                Role::Assistant => "assistant".to_string(),
                Role::System => unreachable!(),
            },
            content: m.content.clone(),
        })
        .collect();

    AnthropicRequest {
        model: model.to_string(),
        max_tokens: MAX_TOKENS,
        messages: turns,
        system,
    }
}

fn extract_reply(body: &str) -> Result<String, RelayError> {
    let value: Value = serde_json::from_str(body).map_err(|_| {
        RelayError::Format("Anthropic returned an unexpected response format".to_string())
    })?;

    if let Some(error) = value.get("error") {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown error");
        return Err(RelayError::Api(format!("Anthropic: {}", message)));
    }

    let parsed: AnthropicResponse = serde_json::from_value(value).map_err(|_| {
        RelayError::Format("Anthropic returned an unexpected response format".to_string())
    })?;

    match parsed.content.first() {
        Some(block) => Ok(block.text.clone()),
        None => Err(RelayError::Format(
            "Anthropic returned an unexpected response format".to_string(),
        )),
    }
}
