use std::sync::Mutex;

use crate::config::Provider;

/// The provider/model pair currently selected by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub provider: Provider,
    pub model: String,
}

/// Process-wide session record. Every read and write goes through the lock,
/// so a reader can never observe a provider paired with a model that belongs
/// to a different selection.
pub struct Session {
    state: Mutex<SessionState>,
}

impl Session {
    pub fn new(provider: Provider) -> Self {
        Self {
            state: Mutex::new(SessionState {
                provider,
                model: provider.default_model().to_string(),
            }),
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }

    /// Switch providers and reset the model to the new provider's default in
    /// one locked update.
    pub fn switch_provider(&self, provider: Provider) -> SessionState {
        let mut state = self.lock();
        state.provider = provider;
        state.model = provider.default_model().to_string();
        state.clone()
    }

    pub fn set_model(&self, model: &str) -> SessionState {
        let mut state = self.lock();
        state.model = model.to_string();
        state.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        // A poisoned lock only means another request panicked mid-update;
        // the state itself is always a complete pair.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Provider::default())
    }
}
