use std::env;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    OpenAI,
    Anthropic,
    Gemini,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::OpenAI, Provider::Anthropic, Provider::Gemini];

    /// Resolve a `/use` argument to a provider. The argument matches when it
    /// contains one of the provider's names or aliases, case-insensitively,
    /// so "claude-please" and "Google Gemini" both resolve.
    pub fn match_alias(s: &str) -> Option<Self> {
        let s = s.to_lowercase();
        if s.contains("openai") {
            Some(Provider::OpenAI)
        } else if s.contains("claude") || s.contains("anthropic") {
            Some(Provider::Anthropic)
        } else if s.contains("gemini") || s.contains("google") {
            Some(Provider::Gemini)
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAI => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Gemini => "gemini",
        }
    }

    /// Model selected when the client switches to this provider without
    /// naming one.
    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::OpenAI => "gpt-4.1-mini",
            Provider::Anthropic => "claude-3-5-haiku-latest",
            Provider::Gemini => "gemini-2.0-flash",
        }
    }

    pub fn key_var(&self) -> &'static str {
        match self {
            Provider::OpenAI => "OPENAI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
        }
    }
}

impl Default for Provider {
    fn default() -> Self {
        Provider::OpenAI
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Process configuration, read once at startup. A missing credential
/// disables that provider but never prevents startup.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            openai_api_key: read_key("OPENAI_API_KEY"),
            anthropic_api_key: read_key("ANTHROPIC_API_KEY"),
            gemini_api_key: read_key("GEMINI_API_KEY"),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }

    pub fn api_key(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::OpenAI => self.openai_api_key.as_deref(),
            Provider::Anthropic => self.anthropic_api_key.as_deref(),
            Provider::Gemini => self.gemini_api_key.as_deref(),
        }
    }
}

fn read_key(var: &str) -> Option<String> {
    env::var(var).ok().filter(|k| !k.trim().is_empty())
}
