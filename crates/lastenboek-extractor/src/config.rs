//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Configuration for field extraction and the pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Sampling temperature (0.0 - 2.0); low values favor consistent output
    pub temperature: f32,

    /// Ceiling on tokens the model may generate per document
    pub max_output_tokens: u32,

    /// Run every step but skip the upsert
    pub dry_run: bool,

    /// Stop after this many PDF candidates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_documents: Option<usize>,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }
        if self.max_output_tokens == 0 {
            return Err("max_output_tokens must be greater than 0".to_string());
        }
        if self.max_documents == Some(0) {
            return Err("max_documents must be greater than 0 when set".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    /// Temperature 0.1 and a 600-token ceiling, writing every record
    fn default() -> Self {
        Self {
            temperature: 0.1,
            max_output_tokens: 600,
            dry_run: false,
            max_documents: None,
        }
    }
}
