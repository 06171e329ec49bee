//! Structured field extraction through the extraction model

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_model_response;
use crate::prompt::{PromptBuilder, SYSTEM_PROMPT};
use lastenboek_domain::traits::ExtractionModel;
use lastenboek_domain::{ExtractedFields, ModelRequest, ResponseMode};
use tracing::debug;

/// Turns document text into [`ExtractedFields`] with one model call
pub struct FieldExtractor<M>
where
    M: ExtractionModel,
{
    model: M,
    config: ExtractorConfig,
}

impl<M> FieldExtractor<M>
where
    M: ExtractionModel,
    M::Error: std::fmt::Display,
{
    /// Create a new FieldExtractor
    pub fn new(model: M, config: ExtractorConfig) -> Self {
        Self { model, config }
    }

    /// The underlying model
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Consume the extractor, returning the model
    pub fn into_model(self) -> M {
        self.model
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Build the model request for a document
    pub fn build_request(&self, document_text: &str) -> ModelRequest {
        ModelRequest {
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_prompt: PromptBuilder::new(document_text).build(),
            temperature: self.config.temperature,
            max_output_tokens: self.config.max_output_tokens,
            response_mode: ResponseMode::JsonObject,
        }
    }

    /// Extract fields from page-delimited document text
    ///
    /// # Errors
    ///
    /// - [`ExtractorError::Model`] if the model call fails (not retried)
    /// - [`ExtractorError::SchemaViolation`] if the response does not match the schema
    pub fn extract(&self, document_text: &str) -> Result<ExtractedFields, ExtractorError> {
        let request = self.build_request(document_text);
        debug!("Prompt length: {} chars", request.user_prompt.len());

        let response = self
            .model
            .complete(&request)
            .map_err(|e| ExtractorError::Model(e.to_string()))?;

        debug!("Model response length: {} chars", response.content.len());

        parse_model_response(&response.content)
    }
}
