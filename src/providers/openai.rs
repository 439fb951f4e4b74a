use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{LLMProvider, Message, Role};
use crate::core::error::RelayError;
use crate::providers::base_client::{AuthStyle, BaseApiClient};

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatCompletionMessage>,
}

#[derive(Serialize)]
struct ChatCompletionMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: String,
}

#[derive(Clone)]
pub struct OpenAIProvider {
    client: BaseApiClient,
    api_key: Option<String>,
}

impl OpenAIProvider {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_endpoint("https://api.openai.com/v1".to_string(), api_key)
    }

    pub fn with_endpoint(endpoint: String, api_key: Option<String>) -> Self {
        Self {
            client: BaseApiClient::new(endpoint, AuthStyle::Bearer, Vec::new()),
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl LLMProvider for OpenAIProvider {
    async fn invoke(&self, messages: &[Message], model: &str) -> Result<String, RelayError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(RelayError::Config(
                "OPENAI_API_KEY is not set; the openai provider is disabled".to_string(),
            ));
        };

        let req_messages: Vec<ChatCompletionMessage> = messages
            .iter()
            .map(|m| ChatCompletionMessage {
                role: match m.role {
                    Role::System => "system".to_string(),
                    Role::User => "user".to_string(),
                    Role::Assistant => "assistant".to_string(),
                },
                content: m.content.clone(),
            })
            .collect();

        let payload = ChatCompletionRequest {
            model: model.to_string(),
            messages: req_messages,
        };

        let response = self
            .client
            .post("chat/completions", api_key, &payload)
            .await?;
        let response_body = response.text().await?;
        extract_reply(&response_body)
    }
}

/// Pull the assistant's reply out of a chat-completions response body, or a
/// provider-prefixed error when the body carries an error object.
fn extract_reply(body: &str) -> Result<String, RelayError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|_| RelayError::Format("OpenAI returned an unexpected response format".to_string()))?;

    if let Some(error) = value.get("error") {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown error");
        return Err(RelayError::Api(format!("OpenAI: {}", message)));
    }

    let parsed: ChatCompletionResponse = serde_json::from_value(value)
        .map_err(|_| RelayError::Format("OpenAI returned an unexpected response format".to_string()))?;

    match parsed.choices.first() {
        Some(choice) => Ok(choice.message.content.clone()),
        None => Err(RelayError::Format(
            "OpenAI returned an unexpected response format".to_string(),
        )),
    }
}
