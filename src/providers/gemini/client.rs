use serde_json::Value;

use crate::core::error::RelayError;
use crate::providers::base_client::{AuthStyle, BaseApiClient};
use crate::providers::gemini::types::*;
use crate::providers::{Message, Role};

#[derive(Clone)]
pub struct GeminiClient {
    client: BaseApiClient,
}

impl GeminiClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: BaseApiClient::new(endpoint, AuthStyle::QueryParam("key"), Vec::new()),
        }
    }

    pub async fn generate_content(
        &self,
        messages: &[Message],
        model: &str,
        api_key: &str,
    ) -> Result<String, RelayError> {
        let payload = build_payload(messages);
        let response = self
            .client
            .post(
                &format!("v1beta/models/{}:generateContent", model),
                api_key,
                &payload,
            )
            .await?;

        let response_body = response.text().await?;
        extract_reply(&response_body)
    }
}

/// Map the canonical sequence to Gemini contents. Roles remap user->user and
/// assistant->model; this request shape has no slot for a system turn, so its
/// text is folded into the first user turn (or inserted as a new leading user
/// turn). Lossy, but it keeps the persona working against this endpoint.
pub(super) fn build_payload(messages: &[Message]) -> GeminiRequest {
    let system = messages
        .iter()
        .filter(|m| m.role == Role::System)
        .next_back()
        .map(|m| m.content.clone());

    let mut contents: Vec<GeminiContent> = messages
        .iter()
        .filter(|m| m.role != Role::System)
        .map(|m| GeminiContent {
            role: match m.role {
                Role::User => "user".to_string(),
                Role::Assistant => "model".to_string(),
                Role::System => unreachable!(),
            },
            parts: vec![GeminiPart {
                text: m.content.clone(),
            }],
        })
        .collect();

    if let Some(system) = system {
        let prefix = format!("(Instructions for this conversation: {})", system);
        match contents.iter_mut().find(|c| c.role == "user") {
            Some(turn) => {
                for part in turn.parts.iter_mut().take(1) {
                    part.text = format!("{}\n\n{}", prefix, part.text);
                }
            }
            None => contents.insert(
                0,
                GeminiContent {
                    role: "user".to_string(),
                    parts: vec![GeminiPart { text: prefix }],
                },
            ),
        }
    }

    GeminiRequest { contents }
}

pub(super) fn extract_reply(body: &str) -> Result<String, RelayError> {
    let value: Value = serde_json::from_str(body).map_err(|_| {
        RelayError::Format("Gemini returned an unexpected response format".to_string())
    })?;

    if let Some(error) = value.get("error") {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown error");
        return Err(RelayError::Api(format!("Gemini: {}", message)));
    }

    let parsed: GeminiResponse = serde_json::from_value(value).map_err(|_| {
        RelayError::Format("Gemini returned an unexpected response format".to_string())
    })?;

    parsed
        .candidates
        .first()
        .and_then(|candidate| candidate.content.parts.first())
        .map(|part| part.text.clone())
        .ok_or_else(|| {
            RelayError::Format("Gemini returned an unexpected response format".to_string())
        })
}
