use tracing::{debug, info, warn};

use crate::commands::{CommandDispatcher, create_command_registry};
use crate::config::{Config, Provider};
use crate::core::error::RelayError;
use crate::providers::anthropic::AnthropicProvider;
use crate::providers::gemini::GeminiProvider;
use crate::providers::openai::OpenAIProvider;
use crate::providers::{LLMProvider, parse_chat_log};
use crate::session::Session;

/// The request pipeline: owns the session, the command dispatcher and one
/// adapter per provider. Stateless per request apart from the session.
pub struct Relay {
    session: Session,
    dispatcher: CommandDispatcher,
    openai: OpenAIProvider,
    anthropic: AnthropicProvider,
    gemini: GeminiProvider,
}

impl Relay {
    pub fn new(config: &Config) -> Self {
        Self {
            session: Session::new(Provider::default()),
            dispatcher: create_command_registry(),
            openai: OpenAIProvider::new(config.openai_api_key.clone()),
            anthropic: AnthropicProvider::new(config.anthropic_api_key.clone()),
            gemini: GeminiProvider::new(config.gemini_api_key.clone()),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn adapter(&self, provider: Provider) -> &dyn LLMProvider {
        match provider {
            Provider::OpenAI => &self.openai,
            Provider::Anthropic => &self.anthropic,
            Provider::Gemini => &self.gemini,
        }
    }

    /// Turn one inbound chat body into the plain-text reply the client sees.
    ///
    /// Command turns answer from the session without contacting a provider.
    /// Configuration, provider-reported and format errors are rendered into
    /// the reply text; transport faults and other unexpected failures
    /// propagate to the HTTP boundary.
    pub async fn handle(&self, body: &str) -> Result<String, RelayError> {
        let messages = parse_chat_log(body);

        // The last element is the newest client turn; commands short-circuit.
        if let Some(last) = messages.last() {
            if let Some(result) = self.dispatcher.dispatch(&last.content, &self.session) {
                let reply = result?;
                info!(reply = %reply, "handled session command");
                return Ok(reply);
            }
        }

        let state = self.session.snapshot();
        debug!(
            provider = %state.provider,
            model = %state.model,
            turns = messages.len(),
            "dispatching to provider"
        );

        match self.adapter(state.provider).invoke(&messages, &state.model).await {
            Ok(reply) => Ok(reply),
            Err(err) if err.is_renderable() => {
                warn!(provider = %state.provider, error = %err, "provider call failed");
                Ok(err.to_string())
            }
            Err(err) => Err(err),
        }
    }
}
