//! Trove LLM Provider Layer
//!
//! Pluggable LLM provider implementations behind one async trait.
//!
//! # Architecture
//!
//! Providers take the credential per call and never store it, so one
//! provider instance can serve requests for many users.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `ChatProvider`: OpenAI-compatible chat completions API
//!
//! # Examples
//!
//! ```
//! use trove_llm::{ApiKey, LlmProvider, MockProvider};
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let provider = MockProvider::new("Hello from LLM!");
//! let key = ApiKey::parse("sk-test-key").unwrap();
//! let result = rt.block_on(provider.generate("test prompt", &key)).unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod chat;
pub mod credential;

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

pub use chat::ChatProvider;
pub use credential::ApiKey;

/// Errors that can occur during LLM operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The provider rejected the credential
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// The request took too long
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Credential missing or malformed before any call was made
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl LlmError {
    /// Whether the error means the credential is unusable
    pub fn is_credential_error(&self) -> bool {
        matches!(self, LlmError::Unauthorized(_) | LlmError::InvalidCredential(_))
    }
}

/// A text-generation backend
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for `prompt`, authenticating with `key`
    async fn generate(&self, prompt: &str, key: &ApiKey) -> Result<String, LlmError>;
}

#[async_trait]
impl<P: LlmProvider + ?Sized> LlmProvider for Arc<P> {
    async fn generate(&self, prompt: &str, key: &ApiKey) -> Result<String, LlmError> {
        (**self).generate(prompt, key).await
    }
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network calls.
/// Lookup order: queued results first, then exact-prompt responses, then the
/// default response.
///
/// # Examples
///
/// ```
/// use trove_llm::{ApiKey, LlmProvider, MockProvider};
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let key = ApiKey::parse("sk-test-key").unwrap();
///
/// // Multiple responses
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// provider.add_response("prompt2", "response2");
/// assert_eq!(rt.block_on(provider.generate("prompt1", &key)).unwrap(), "response1");
/// assert_eq!(rt.block_on(provider.generate("prompt2", &key)).unwrap(), "response2");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    queued: Arc<Mutex<VecDeque<Result<String, LlmError>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    delay: Option<Duration>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            queued: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), response.into());
    }

    /// Queue a result returned by the next call, whatever the prompt
    pub fn push_result(&self, result: Result<String, LlmError>) {
        self.queued.lock().unwrap().push_back(result);
    }

    /// Queue an error returned by the next call
    pub fn push_error(&self, error: LlmError) {
        self.push_result(Err(error));
    }

    /// Sleep before answering (for timeout tests)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// The most recent prompt received
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }

    /// Reset the call history
    pub fn reset_call_count(&self) {
        self.prompts.lock().unwrap().clear();
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn generate(&self, prompt: &str, _key: &ApiKey) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(result) = self.queued.lock().unwrap().pop_front() {
            return result;
        }

        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(prompt) {
            return Ok(response.clone());
        }

        Ok(self.default_response.clone())
    }
}
