//! # Application State
//!
//! Core business state for Confab. This module contains domain state only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── provider: Arc<dyn CompletionProvider>  // chat completion client
//! ├── transcript: Transcript         // append-only message store
//! ├── model_name: String             // current model
//! ├── system_prompt: String          // fixed instruction sent on every request
//! ├── max_reply_tokens: u32          // output token cap per request
//! ├── status_message: String         // title bar text
//! ├── is_loading: bool               // a request is outstanding
//! └── error: Option<String>          // last error, overwritten not accumulated
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use crate::core::config::{self, ResolvedConfig};
use crate::core::transcript::Transcript;
use crate::inference::CompletionProvider;
use std::sync::Arc;

pub struct App {
    pub provider: Arc<dyn CompletionProvider>,
    pub transcript: Transcript,
    pub model_name: String,
    pub system_prompt: String,
    pub max_reply_tokens: u32,
    pub status_message: String,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl App {
    pub fn new(provider: Arc<dyn CompletionProvider>, model_name: String) -> Self {
        Self {
            provider,
            transcript: Transcript::with_greeting(config::DEFAULT_GREETING),
            model_name,
            system_prompt: config::DEFAULT_SYSTEM_PROMPT.to_string(),
            max_reply_tokens: config::DEFAULT_MAX_REPLY_TOKENS,
            status_message: String::from("Ready"),
            is_loading: false,
            error: None,
        }
    }

    pub fn from_config(provider: Arc<dyn CompletionProvider>, config: &ResolvedConfig) -> Self {
        Self {
            provider,
            transcript: Transcript::with_greeting(&config.greeting),
            model_name: config.model_name.clone(),
            system_prompt: config.system_prompt.clone(),
            max_reply_tokens: config.max_reply_tokens,
            status_message: String::from("Ready"),
            is_loading: false,
            error: None,
        }
    }
}
