use crate::core::error::RelayError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod anthropic;
pub mod base_client;
pub mod gemini;
pub mod openai;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// Persona prepended to every conversation. The client runs on a vintage
/// machine and renders plain text only.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant speaking to the user of a chat \
application running on a vintage computer. Reply in plain text only; the client cannot render \
markdown, links or images. Keep answers reasonably short.";

#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn invoke(&self, messages: &[Message], model: &str) -> Result<String, RelayError>;
}

/// Build the canonical message sequence from an inbound request body.
///
/// A body that decodes as a JSON list of `{role, content}` records is used
/// verbatim as the history; anything else (plain text, JSON scalars or
/// objects) becomes a single user turn. The persona system message is always
/// element 0. Malformed entries are left for the adapters to cope with.
pub fn parse_chat_log(body: &str) -> Vec<Message> {
    let history = match serde_json::from_str::<Vec<Message>>(body) {
        Ok(list) => list,
        Err(_) => vec![Message {
            role: Role::User,
            content: body.to_string(),
        }],
    };

    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(Message {
        role: Role::System,
        content: SYSTEM_PROMPT.to_string(),
    });
    messages.extend(history);
    messages
}
