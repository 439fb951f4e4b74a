use async_trait::async_trait;

use crate::core::error::RelayError;
use crate::providers::{LLMProvider, Message};

mod client;
mod types;

pub use client::GeminiClient;

#[derive(Clone)]
pub struct GeminiProvider {
    client: GeminiClient,
    api_key: Option<String>,
}

impl GeminiProvider {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_endpoint(
            "https://generativelanguage.googleapis.com".to_string(),
            api_key,
        )
    }

    pub fn with_endpoint(endpoint: String, api_key: Option<String>) -> Self {
        Self {
            client: GeminiClient::new(endpoint),
            api_key,
        }
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    async fn invoke(&self, messages: &[Message], model: &str) -> Result<String, RelayError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(RelayError::Config(
                "GEMINI_API_KEY is not set; the gemini provider is disabled".to_string(),
            ));
        };

        self.client.generate_content(messages, model, api_key).await
    }
}

#[cfg(test)]
mod tests {
    use super::client::{build_payload, extract_reply};
    use super::*;
    use crate::providers::Role;

    fn msg(role: Role, content: &str) -> Message {
        Message {
            role,
            content: content.to_string(),
        }
    }

    #[test]
    fn assistant_turns_are_remapped_to_model_role() {
        let messages = [msg(Role::User, "hi"), msg(Role::Assistant, "hello")];
        let payload = build_payload(&messages);
        assert_eq!(payload.contents.len(), 2);
        assert_eq!(payload.contents[0].role, "user");
        assert_eq!(payload.contents[1].role, "model");
        assert_eq!(payload.contents[1].parts[0].text, "hello");
    }

    #[test]
    fn system_text_is_folded_into_first_user_turn() {
        let messages = [
            msg(Role::System, "be terse"),
            msg(Role::Assistant, "hello"),
            msg(Role::User, "hi"),
        ];
        let payload = build_payload(&messages);
        assert_eq!(payload.contents.len(), 2);
        assert_eq!(payload.contents[0].role, "model");
        let folded = &payload.contents[1].parts[0].text;
        assert!(folded.contains("be terse"));
        assert!(folded.ends_with("hi"));
    }

    #[test]
    fn system_without_user_turn_becomes_leading_user_turn() {
        let messages = [msg(Role::System, "be terse")];
        let payload = build_payload(&messages);
        assert_eq!(payload.contents.len(), 1);
        assert_eq!(payload.contents[0].role, "user");
        assert!(payload.contents[0].parts[0].text.contains("be terse"));
    }

    #[test]
    fn reply_is_first_part_of_first_candidate() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"hi from gemini"}],"role":"model"}}]}"#;
        assert_eq!(extract_reply(body).unwrap(), "hi from gemini");
    }

    #[test]
    fn error_object_becomes_prefixed_api_error() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        match extract_reply(body) {
            Err(RelayError::Api(m)) => assert_eq!(m, "Gemini: API key not valid"),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn empty_candidates_is_a_format_error() {
        assert!(matches!(
            extract_reply(r#"{"candidates":[]}"#),
            Err(RelayError::Format(_))
        ));
    }
}
