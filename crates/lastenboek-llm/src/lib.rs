//! Lastenboek Extraction Model Layer
//!
//! Implementations of the `ExtractionModel` trait from `lastenboek-domain`.
//!
//! # Providers
//!
//! - `MockModel`: Deterministic mock for testing
//! - `OpenAiModel`: Chat-completions API (Azure OpenAI deployments or
//!   OpenAI-compatible endpoints)
//!
//! # Examples
//!
//! ```
//! use lastenboek_llm::MockModel;
//! use lastenboek_domain::traits::ExtractionModel;
//! use lastenboek_domain::ModelRequest;
//!
//! let model = MockModel::new(r#"{"architect":null}"#);
//! let request = ModelRequest {
//!     system_prompt: "system".to_string(),
//!     user_prompt: "user".to_string(),
//!     temperature: 0.1,
//!     max_output_tokens: 600,
//!     response_mode: Default::default(),
//! };
//! let response = model.complete(&request).unwrap();
//! assert_eq!(response.content, r#"{"architect":null}"#);
//! ```

#![warn(missing_docs)]

pub mod openai;

use lastenboek_domain::traits::ExtractionModel;
use lastenboek_domain::{ModelRequest, ModelResponse};
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use openai::{ApiFlavor, OpenAiModel, OpenAiSettings};

/// Errors that can occur during model operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the model API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Credentials rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Model or deployment not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Client misconfiguration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

const MOCK_ERROR: &str = "ERROR";

/// Mock extraction model for deterministic testing
///
/// Returns pre-configured content without making any network calls. Responses
/// can be keyed on a fragment of the user prompt, which is how tests give
/// different documents different answers. Every request is recorded.
///
/// # Examples
///
/// ```
/// use lastenboek_llm::MockModel;
/// use lastenboek_domain::traits::ExtractionModel;
/// use lastenboek_domain::ModelRequest;
///
/// let mut model = MockModel::default();
/// model.add_response("Jane Doe", r#"{"architect":"Jane Doe"}"#);
///
/// let request = ModelRequest {
///     system_prompt: String::new(),
///     user_prompt: "Document text:\nArchitect: Jane Doe".to_string(),
///     temperature: 0.1,
///     max_output_tokens: 600,
///     response_mode: Default::default(),
/// };
/// assert_eq!(model.complete(&request).unwrap().content, r#"{"architect":"Jane Doe"}"#);
/// assert_eq!(model.call_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockModel {
    name: String,
    default_response: String,
    responses: Arc<Mutex<Vec<(String, String)>>>,
    requests: Arc<Mutex<Vec<ModelRequest>>>,
}

impl MockModel {
    /// Create a new MockModel with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            name: "mock".to_string(),
            default_response: response.into(),
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the reported model name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Answer with `response` whenever the user prompt contains `fragment`
    ///
    /// Fragments are checked in insertion order; the first match wins.
    pub fn add_response(&mut self, fragment: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push((fragment.into(), response.into()));
    }

    /// Fail whenever the user prompt contains `fragment`
    pub fn add_error(&mut self, fragment: impl Into<String>) {
        self.add_response(fragment, MOCK_ERROR);
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// All requests received so far, oldest first
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Forget recorded requests
    pub fn reset(&self) {
        self.requests.lock().unwrap().clear();
    }
}

impl Default for MockModel {
    fn default() -> Self {
        Self::new("{}")
    }
}

impl ExtractionModel for MockModel {
    type Error = LlmError;

    fn complete(&self, request: &ModelRequest) -> Result<ModelResponse, Self::Error> {
        self.requests.lock().unwrap().push(request.clone());

        let responses = self.responses.lock().unwrap();
        let matched = responses
            .iter()
            .find(|(fragment, _)| request.user_prompt.contains(fragment.as_str()))
            .map(|(_, response)| response.as_str());

        match matched {
            Some(MOCK_ERROR) => Err(LlmError::Other("Mock error".to_string())),
            Some(response) => Ok(ModelResponse::new(response)),
            None => Ok(ModelResponse::new(self.default_response.clone())),
        }
    }

    fn model_name(&self) -> &str {
        &self.name
    }
}
