//! Anthropic Messages API client.
//!
//! Single-turn completion with a fixed system instruction, deterministic
//! sampling (temperature 0) and a bounded output length. The tagger only
//! ever needs the first content block's text.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::user_agent;

/// Default Anthropic API base URL.
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
/// API version header value required by the Messages endpoint.
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// Model used for tag suggestion.
const MODEL: &str = "claude-3-5-sonnet-latest";
/// Output cap: a handful of short tag lines never needs more.
const MAX_TOKENS: u32 = 150;
const CONNECT_TIMEOUT_SECS: u64 = 10;
const READ_TIMEOUT_SECS: u64 = 60;

/// Errors that can occur calling the language model.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Network-level error (DNS resolution, connection refused, TLS, timeout).
    #[error("network error calling language model: {source}")]
    Network {
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// HTTP error response from the API.
    #[error("HTTP {status} from language model API")]
    HttpStatus {
        /// The HTTP status code.
        status: u16,
    },

    /// The response body did not decode as the expected JSON shape.
    #[error("unexpected language model response: {source}")]
    Decode {
        /// The underlying decode error.
        #[source]
        source: reqwest::Error,
    },

    /// The response carried no content blocks.
    #[error("language model response contained no content")]
    EmptyResponse,

    /// HTTP client construction failed.
    #[error("language model HTTP client construction failed: {source}")]
    ClientBuild {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },
}

// ==================== Messages API Wire Types ====================

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: [MessageParam<'a>; 1],
}

#[derive(Debug, Serialize)]
struct MessageParam<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

// ==================== AnthropicClient ====================

/// Client for single-turn Anthropic Messages completions.
pub struct AnthropicClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl AnthropicClient {
    /// Creates a client against the production API.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ClientBuild`] if HTTP client construction fails.
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ClientBuild`] if HTTP client construction fails.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .user_agent(user_agent::default_api_user_agent())
            .gzip(true)
            .build()
            .map_err(|source| LlmError::ClientBuild { source })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Runs one deterministic completion and returns the first content
    /// block's text.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError`] on network, HTTP, or decode failure, or when
    /// the response has no content blocks.
    pub async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/v1/messages", self.base_url);
        let request = MessagesRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            temperature: 0.0,
            system,
            messages: [MessageParam {
                role: "user",
                content: prompt,
            }],
        };

        debug!(model = MODEL, prompt_chars = prompt.len(), "Calling language model");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|source| LlmError::Network { source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .json::<MessagesResponse>()
            .await
            .map_err(|source| LlmError::Decode { source })?;

        body.content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or(LlmError::EmptyResponse)
    }
}

impl std::fmt::Debug for AnthropicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
