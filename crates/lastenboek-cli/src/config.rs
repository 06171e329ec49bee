//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use lastenboek_extractor::ExtractorConfig;
use lastenboek_llm::openai::{DEFAULT_API_VERSION, DEFAULT_DEPLOYMENT, DEFAULT_TIMEOUT_SECS};
use lastenboek_llm::{ApiFlavor, OpenAiSettings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding `model.endpoint`
pub const ENV_ENDPOINT: &str = "OPENAI_ENDPOINT";
/// Environment variable overriding `model.api_key`
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
/// Environment variable overriding `blob.root`
pub const ENV_BLOB_ROOT: &str = "LASTENBOEK_BLOB_ROOT";
/// Environment variable overriding `store.path`
pub const ENV_STORE_PATH: &str = "LASTENBOEK_STORE_PATH";

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where the PDFs come from
    #[serde(default)]
    pub blob: BlobSection,

    /// Where records are written
    #[serde(default)]
    pub store: StoreSection,

    /// Extraction model endpoint
    #[serde(default)]
    pub model: ModelSection,

    /// Pipeline settings
    #[serde(default)]
    pub extraction: ExtractorConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Blob store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobSection {
    /// Directory holding the documents
    #[serde(default = "default_blob_root")]
    pub root: PathBuf,
}

/// Document store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    /// SQLite database file
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

/// Chat-completions endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSection {
    /// URL scheme of the endpoint
    #[serde(default = "default_flavor")]
    pub flavor: ApiFlavor,

    /// Base endpoint URL
    #[serde(default)]
    pub endpoint: String,

    /// Deployment or model name
    #[serde(default = "default_deployment")]
    pub deployment: String,

    /// Azure API version
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// API key; prefer the environment over writing it to disk
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".lastenboek").join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if it does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string and validate it.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.extraction.validate().map_err(CliError::Config)?;
        Ok(config)
    }

    /// Apply overrides from the process environment (including `.env`).
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| dotenv::var(key).ok());
    }

    /// Apply overrides from a key lookup; empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(endpoint) = value(ENV_ENDPOINT) {
            self.model.endpoint = endpoint;
        }
        if let Some(key) = value(ENV_API_KEY) {
            self.model.api_key = key;
        }
        if let Some(root) = value(ENV_BLOB_ROOT) {
            self.blob.root = PathBuf::from(root);
        }
        if let Some(path) = value(ENV_STORE_PATH) {
            self.store.path = PathBuf::from(path);
        }
    }

    /// Build model client settings, failing if the endpoint or key is missing.
    pub fn model_settings(&self) -> Result<OpenAiSettings> {
        if self.model.endpoint.trim().is_empty() {
            return Err(CliError::Config(format!(
                "model endpoint is not set (model.endpoint or {})",
                ENV_ENDPOINT
            )));
        }
        if self.model.api_key.trim().is_empty() {
            return Err(CliError::Config(format!(
                "model API key is not set (model.api_key or {})",
                ENV_API_KEY
            )));
        }

        Ok(OpenAiSettings {
            flavor: self.model.flavor,
            endpoint: self.model.endpoint.clone(),
            deployment: self.model.deployment.clone(),
            api_version: self.model.api_version.clone(),
            api_key: self.model.api_key.clone(),
            timeout_secs: self.model.timeout_secs,
        })
    }
}

impl Default for BlobSection {
    fn default() -> Self {
        Self {
            root: default_blob_root(),
        }
    }
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

impl Default for ModelSection {
    fn default() -> Self {
        Self {
            flavor: default_flavor(),
            endpoint: String::new(),
            deployment: default_deployment(),
            api_version: default_api_version(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_blob_root() -> PathBuf {
    PathBuf::from("lastenboeken")
}

fn default_store_path() -> PathBuf {
    PathBuf::from("lastenboek.db")
}

fn default_flavor() -> ApiFlavor {
    ApiFlavor::Azure
}

fn default_deployment() -> String {
    DEFAULT_DEPLOYMENT.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
