//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::state::App;
use crate::inference::{CompletionProvider, CompletionRequest, ProviderError};

/// A provider that returns a canned result without touching the network.
pub struct StaticProvider {
    reply: Result<String, String>,
}

impl StaticProvider {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
        }
    }

    pub fn failing(description: &str) -> Self {
        Self {
            reply: Err(description.to_string()),
        }
    }
}

#[async_trait]
impl CompletionProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn complete(&self, _request: CompletionRequest<'_>) -> Result<String, ProviderError> {
        self.reply.clone().map_err(ProviderError::Network)
    }
}

/// Creates a test App with a canned provider.
pub fn test_app() -> App {
    App::new(Arc::new(StaticProvider::replying("ok")), "test-model".to_string())
}
