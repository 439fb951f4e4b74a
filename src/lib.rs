//! tiger-relay
//!
//! A local HTTP relay that lets a chat client on a vintage machine talk to
//! modern LLM providers. One POST endpoint accepts either a JSON chat history
//! or raw text, and replies in plain text. Slash commands in the newest turn
//! (`/use`, `/model`) switch the active provider and model at runtime.

pub mod commands;
pub mod config;
pub mod core;
pub mod providers;
pub mod relay;
pub mod server;
pub mod session;
