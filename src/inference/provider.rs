use std::fmt;

use async_trait::async_trait;

/// Errors that can occur during provider operations.
///
/// The set is deliberately total over response handling: every body the
/// API can send maps to a reply or to exactly one of these variants, so a
/// failure can never fall through unsurfaced.
#[derive(Debug)]
pub enum ProviderError {
    /// Provider misconfigured (missing API key, bad URL).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned a non-success status.
    Api { status: u16, message: String },
    /// A success status arrived with no body at all.
    EmptyBody,
    /// The body was not valid JSON.
    Decode(String),
    /// Valid JSON that does not contain a completion.
    Shape(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Config(msg) => write!(f, "config error: {msg}"),
            ProviderError::Network(msg) => write!(f, "error reaching the API: {msg}"),
            ProviderError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ProviderError::EmptyBody => write!(f, "no data received"),
            ProviderError::Decode(msg) => write!(f, "JSON parsing error: {msg}"),
            ProviderError::Shape(msg) => write!(f, "unexpected response shape: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Everything a provider needs to fulfill one completion.
///
/// There is no transcript here: each request is context-free from the
/// API's perspective and carries only the latest user line.
pub struct CompletionRequest<'a> {
    pub system_prompt: &'a str,
    pub user_text: &'a str,
    pub model: &'a str,
    pub max_reply_tokens: u32,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Performs one request/response cycle and returns the assistant reply.
    ///
    /// Exactly one result per call. No retry, no cancellation, no timeout
    /// beyond the platform default.
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderError>;
}
