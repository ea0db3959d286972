//! OpenAI-compatible chat completions client.
//!
//! Speaks the classic `/chat/completions` shape: a `messages` array in,
//! `choices[0].message.content` out. Works against api.openai.com or any
//! compatible gateway via `base_url`.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::inference::{CompletionProvider, CompletionRequest, ProviderError};

// ============================================================================
// Chat Completions Wire Types
// ============================================================================

/// Role in a request message (OpenAI terminology).
/// Only two roles ever go out: replies are never sent back as context.
#[derive(Serialize, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum Role {
    System,
    User,
}

/// A single message in the request array.
#[derive(Serialize, Debug, Clone)]
struct ChatMessage {
    role: Role,
    content: String,
}

/// The request body for the chat completions endpoint.
#[derive(Serialize, Debug)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize, Debug)]
struct ReplyMessage {
    content: String,
}

// ============================================================================
// Translation Layer
// ============================================================================

/// Builds the request payload: the fixed system instruction, the single
/// latest user line, and the output token cap. No transcript is included.
fn build_request(request: &CompletionRequest<'_>) -> ChatRequest {
    ChatRequest {
        model: request.model.to_string(),
        messages: vec![
            ChatMessage {
                role: Role::System,
                content: request.system_prompt.to_string(),
            },
            ChatMessage {
                role: Role::User,
                content: request.user_text.to_string(),
            },
        ],
        max_tokens: request.max_reply_tokens,
    }
}

/// Classifies a success-status body into a reply or a tagged error.
///
/// Total by construction: empty body, undecodable JSON, wrong shape, and
/// a missing first choice each map to their own variant, so nothing can
/// fall through silently.
fn extract_reply(body: &[u8]) -> Result<String, ProviderError> {
    if body.is_empty() {
        return Err(ProviderError::EmptyBody);
    }

    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| ProviderError::Decode(e.to_string()))?;

    let parsed: ChatResponse =
        serde_json::from_value(value).map_err(|e| ProviderError::Shape(e.to_string()))?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Shape("response contained no choices".to_string()))?;

    Ok(choice.message.content)
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Chat completions provider for OpenAI-compatible APIs.
pub struct OpenAiProvider {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// Creates a new provider.
    ///
    /// # Arguments
    /// * `api_key` - Bearer credential, included on every outbound request
    /// * `base_url` - Optional custom base URL (defaults to OpenAI's API)
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderError> {
        let chat_request = build_request(&request);

        info!(
            "Chat completions request: model={}, max_tokens={}",
            chat_request.model, chat_request.max_tokens
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        debug!("Chat completions response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Chat completions API error: {} - {}", status, err_body);
            return Err(ProviderError::Api {
                status,
                message: err_body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let reply = extract_reply(&body)?;
        info!("Chat completions reply: {} bytes", reply.len());
        Ok(reply)
    }
}
