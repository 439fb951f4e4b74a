use crate::config::Provider;
use crate::core::error::RelayError;
use crate::session::Session;

/// A slash command embedded in the newest chat turn. Commands mutate the
/// session and answer directly; no provider is contacted.
pub trait CommandHandler: Send + Sync {
    fn execute(&self, session: &Session, arg: &str) -> Result<String, RelayError>;
    fn help(&self) -> &'static str;
}

pub struct UseCommand;
pub struct ModelCommand;

impl CommandHandler for UseCommand {
    fn execute(&self, session: &Session, arg: &str) -> Result<String, RelayError> {
        match Provider::match_alias(arg) {
            Some(provider) => {
                let state = session.switch_provider(provider);
                Ok(format!(
                    "Now talking to {} (model {}).",
                    state.provider, state.model
                ))
            }
            // Not a failure the pipeline should escalate; the text is the reply.
            None => Ok(format!(
                "Unknown provider \"{}\". Valid providers: openai, anthropic (claude), gemini (google).",
                arg
            )),
        }
    }

    fn help(&self) -> &'static str {
        "/use <provider> - Switch between openai, anthropic (claude) and gemini (google)"
    }
}

impl CommandHandler for ModelCommand {
    fn execute(&self, session: &Session, arg: &str) -> Result<String, RelayError> {
        // No validation; a bad name surfaces as a provider error on the next call.
        let state = session.set_model(arg);
        Ok(format!("Model set to {}.", state.model))
    }

    fn help(&self) -> &'static str {
        "/model <name> - Use a specific model with the current provider"
    }
}
