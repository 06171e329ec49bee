//! Chat-completions Provider Implementation
//!
//! Talks to the OpenAI chat-completions API, either through an Azure OpenAI
//! deployment or an OpenAI-compatible endpoint.
//!
//! # Features
//!
//! - Blocking HTTP communication (the pipeline is strictly sequential)
//! - Azure deployment URLs (`api-key` header) or bearer-token endpoints
//! - JSON-object response mode
//! - Request timeout
//!
//! A failed call is reported once; there is no retry.
//!
//! # Examples
//!
//! ```no_run
//! use lastenboek_llm::{OpenAiModel, OpenAiSettings};
//!
//! let settings = OpenAiSettings::azure("https://my-resource.openai.azure.com", "gpt-5-chat", "key");
//! let model = OpenAiModel::new(settings).unwrap();
//! ```

use crate::LlmError;
use lastenboek_domain::traits::ExtractionModel;
use lastenboek_domain::{ModelRequest, ModelResponse, ResponseMode};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Azure OpenAI API version
pub const DEFAULT_API_VERSION: &str = "2024-12-01-preview";

/// Default deployment / model name
pub const DEFAULT_DEPLOYMENT: &str = "gpt-5-chat";

/// Default timeout for model requests (120 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Which URL and auth scheme the endpoint expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiFlavor {
    /// `{endpoint}/openai/deployments/{deployment}/chat/completions?api-version=..`, `api-key` header
    Azure,
    /// `{endpoint}/chat/completions`, bearer token, `model` in the body
    OpenAi,
}

/// Connection settings for [`OpenAiModel`]
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    /// URL scheme
    pub flavor: ApiFlavor,
    /// Base endpoint, without trailing path
    pub endpoint: String,
    /// Azure deployment name, or model name for OpenAI-style endpoints
    pub deployment: String,
    /// Azure API version (ignored for OpenAI-style endpoints)
    pub api_version: String,
    /// API key
    pub api_key: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OpenAiSettings {
    /// Settings for an Azure OpenAI deployment with default API version and timeout
    pub fn azure(
        endpoint: impl Into<String>,
        deployment: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            flavor: ApiFlavor::Azure,
            endpoint: endpoint.into(),
            deployment: deployment.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            api_key: api_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Settings for an OpenAI-compatible endpoint
    pub fn openai(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            flavor: ApiFlavor::OpenAi,
            endpoint: endpoint.into(),
            deployment: model.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            api_key: api_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Full chat-completions URL for these settings
    pub fn completions_url(&self) -> String {
        let base = self.endpoint.trim_end_matches('/');
        match self.flavor {
            ApiFlavor::Azure => format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                base, self.deployment, self.api_version
            ),
            ApiFlavor::OpenAi => format!("{}/chat/completions", base),
        }
    }
}

/// Chat-completions client implementing [`ExtractionModel`]
pub struct OpenAiModel {
    settings: OpenAiSettings,
    client: reqwest::blocking::Client,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Request body for the chat-completions API
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

/// Response from the chat-completions API
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

impl OpenAiModel {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Config`] if the endpoint or key is empty, or the
    /// HTTP client cannot be built.
    pub fn new(settings: OpenAiSettings) -> Result<Self, LlmError> {
        if settings.endpoint.trim().is_empty() {
            return Err(LlmError::Config("endpoint is empty".to_string()));
        }
        if settings.api_key.is_empty() {
            return Err(LlmError::Config("api key is empty".to_string()));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { settings, client })
    }

    /// The settings this client was built with
    pub fn settings(&self) -> &OpenAiSettings {
        &self.settings
    }

    fn request_body<'a>(&'a self, request: &'a ModelRequest) -> ChatCompletionRequest<'a> {
        let model = match self.settings.flavor {
            ApiFlavor::Azure => None,
            ApiFlavor::OpenAi => Some(self.settings.deployment.as_str()),
        };
        let response_format = match request.response_mode {
            ResponseMode::JsonObject => Some(ResponseFormat { kind: "json_object" }),
            ResponseMode::Text => None,
        };

        ChatCompletionRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_prompt,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_output_tokens,
            response_format,
        }
    }
}

/// Map a non-success status to an error
fn status_error(status: StatusCode, body: String, deployment: &str) -> LlmError {
    match status {
        StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(deployment.to_string()),
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            LlmError::Unauthorized(format!("HTTP {}", status))
        }
        _ => LlmError::Communication(format!("HTTP {}: {}", status, body)),
    }
}

/// Pull the first choice's message content out of a response body
fn parse_completion(body: &str) -> Result<String, LlmError> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidResponse("Response has no choices".to_string()))?;

    Ok(choice.message.content.unwrap_or_default().trim().to_string())
}

impl ExtractionModel for OpenAiModel {
    type Error = LlmError;

    fn complete(&self, request: &ModelRequest) -> Result<ModelResponse, Self::Error> {
        let url = self.settings.completions_url();
        let body = self.request_body(request);

        let builder = self.client.post(&url).json(&body);
        let builder = match self.settings.flavor {
            ApiFlavor::Azure => builder.header("api-key", &self.settings.api_key),
            ApiFlavor::OpenAi => builder.bearer_auth(&self.settings.api_key),
        };

        let response = builder
            .send()
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| LlmError::Communication(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(status_error(status, text, &self.settings.deployment));
        }

        let content = parse_completion(&text)?;
        debug!("Model returned {} chars", content.len());

        Ok(ModelResponse { content })
    }

    fn model_name(&self) -> &str {
        &self.settings.deployment
    }
}
