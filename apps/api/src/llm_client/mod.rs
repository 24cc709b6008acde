/// Generation Client — the single point of entry for language-model calls.
///
/// Callers depend on the `TextGenerator` trait, never on `LlmClient` directly,
/// so prompt building and persistence can be tested with a stub generator.
///
/// `LlmClient` makes exactly one attempt per call. Retries are layered on
/// with the `Retrying` decorator in `retry.rs`.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod retry;

pub use retry::Retrying;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all post generation.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 1024;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed response: {0}")]
    Parse(String),

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl GenerationError {
    /// Transport failures, timeouts, rate limits and 5xx replies are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            GenerationError::Http(_) | GenerationError::Timeout => true,
            GenerationError::Api { status, .. } => *status == 429 || *status >= 500,
            GenerationError::Parse(_) | GenerationError::EmptyContent => false,
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GenerationError::Timeout
        } else if e.is_decode() {
            GenerationError::Parse(e.to_string())
        } else {
            GenerationError::Http(e)
        }
    }
}

/// Prompt in, text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }

    /// The reply text, or `EmptyContent` when there is none worth returning.
    pub fn into_text(self) -> Result<String, GenerationError> {
        match self.text() {
            Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
            _ => Err(GenerationError::EmptyContent),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Anthropic Messages API client.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, GenerationError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
        })
    }

    /// Makes a single call to the Messages API, returning the full response object.
    pub async fn call(&self, prompt: &str) -> Result<LlmResponse, GenerationError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), body));
        }

        let llm_response: LlmResponse = response.json().await?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        Ok(llm_response)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.call(prompt).await?.into_text()
    }
}

fn api_error(status: u16, body: String) -> GenerationError {
    let message = serde_json::from_str::<AnthropicError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    GenerationError::Api { status, message }
}

#[cfg(test)]
pub mod test_support {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Replays scripted replies in order and records every prompt it was given.
    #[derive(Default)]
    pub struct StubGenerator {
        replies: Mutex<VecDeque<Result<String, GenerationError>>>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl StubGenerator {
        pub fn replying(replies: Vec<Result<String, GenerationError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn always(text: &str) -> Self {
            Self::replying((0..16).map(|_| Ok(text.to_string())).collect())
        }

        pub fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(GenerationError::EmptyContent))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> LlmResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_text_block_is_extracted() {
        let r = response(
            r#"{"content":[{"type":"text","text":"Hello LinkedIn"}],"usage":{"input_tokens":3,"output_tokens":2}}"#,
        );
        assert_eq!(r.into_text().unwrap(), "Hello LinkedIn");
    }

    #[test]
    fn test_blank_text_is_empty_content() {
        let r = response(
            r#"{"content":[{"type":"text","text":"  \n"}],"usage":{"input_tokens":3,"output_tokens":0}}"#,
        );
        assert!(matches!(r.into_text(), Err(GenerationError::EmptyContent)));
    }

    #[test]
    fn test_missing_text_block_is_empty_content() {
        let r = response(r#"{"content":[],"usage":{"input_tokens":3,"output_tokens":0}}"#);
        assert!(matches!(r.into_text(), Err(GenerationError::EmptyContent)));
    }

    #[test]
    fn test_api_error_message_is_unwrapped() {
        let err = api_error(
            400,
            r#"{"type":"error","error":{"type":"invalid_request_error","message":"bad prompt"}}"#
                .to_string(),
        );
        match err {
            GenerationError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "bad prompt");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_keeps_raw_body_when_unparseable() {
        let err = api_error(502, "upstream down".to_string());
        assert!(matches!(err, GenerationError::Api { ref message, .. } if message == "upstream down"));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(GenerationError::Timeout.is_retryable());
        assert!(GenerationError::Api { status: 429, message: String::new() }.is_retryable());
        assert!(GenerationError::Api { status: 503, message: String::new() }.is_retryable());
        assert!(!GenerationError::Api { status: 401, message: String::new() }.is_retryable());
        assert!(!GenerationError::EmptyContent.is_retryable());
    }
}
