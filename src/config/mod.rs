//! Configuration management for rag-client
//!
//! [`ClientConfig`] is what the library needs to talk to the API. [`Config`]
//! is the CLI's TOML file, which also remembers the vector database, index
//! and encoder to use. The file names the environment variable that holds the
//! vector database API key; the key itself is never written to disk.

mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use url::Url;

/// Settings for [`crate::client::RagClient`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// RAG API base URL; endpoint paths are appended to it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound for a single call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Parse the base URL, making sure it ends with `/` so endpoint paths
    /// join under any path prefix instead of replacing its last segment.
    pub fn parsed_base_url(&self) -> Result<Url> {
        let mut url = Url::parse(self.base_url.trim())
            .map_err(|e| Error::Config(format!("Invalid base URL '{}': {}", self.base_url, e)))?;
        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(Error::Config(format!(
                    "Base URL must use http or https, got '{}'",
                    scheme
                )))
            }
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    pub fn validate(&self) -> Result<()> {
        self.parsed_base_url()?;
        if self.timeout_secs == 0 {
            return Err(Error::Config(
                "client.timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Vector database section of the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorDatabaseConfig {
    /// Kind: pinecone, qdrant, weaviate or astra
    #[serde(rename = "type", default = "default_vector_database_type")]
    pub kind: String,

    /// Database host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Environment variable name for the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for VectorDatabaseConfig {
    fn default() -> Self {
        Self {
            kind: default_vector_database_type(),
            host: None,
            api_key_env: default_api_key_env(),
        }
    }
}

impl VectorDatabaseConfig {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        if self.api_key_env.is_empty() {
            return None;
        }
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|v| !v.trim().is_empty())
    }
}

/// CLI configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Index within the vector database
    #[serde(default = "default_index_name")]
    pub index_name: String,

    /// Encoder identifier
    #[serde(default = "default_encoder")]
    pub encoder: String,

    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub vector_database: VectorDatabaseConfig,

    /// Paths configuration (internal, not user-editable)
    #[serde(skip)]
    pub paths: PathsConfig,
}

/// Internal paths configuration
#[derive(Debug, Clone, Default)]
pub struct PathsConfig {
    /// Base directory for rag-client data
    pub base_dir: PathBuf,

    /// Path to config file
    pub config_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            vector_database: VectorDatabaseConfig::default(),
            index_name: default_index_name(),
            encoder: default_encoder(),
            paths: PathsConfig::default(),
        }
    }
}

impl Config {
    /// Get the default base directory (~/.rag-client)
    pub fn default_base_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rag-client")
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        Self::default_base_dir().join("config.toml")
    }

    fn set_paths(&mut self, config_path: &Path) {
        self.paths = PathsConfig {
            config_file: config_path.to_path_buf(),
            base_dir: config_path
                .parent()
                .unwrap_or(Path::new("."))
                .to_path_buf(),
        };
    }

    /// Default configuration that will be saved to `config_path`
    pub fn new_at(config_path: &Path) -> Self {
        let mut config = Config::default();
        config.set_paths(config_path);
        config
    }

    /// Load configuration from a specific file path
    pub fn load(config_path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", config_path);

        if !config_path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        }

        let content = std::fs::read_to_string(config_path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.set_paths(config_path);

        config.validate()?;
        Ok(config)
    }

    /// Load from `config_path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            Self::load(config_path)
        } else {
            debug!("No config file at {:?}, using defaults", config_path);
            Ok(Self::new_at(config_path))
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.paths.config_file.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&self.paths.config_file, content)?;
        info!("Saved config to {:?}", self.paths.config_file);
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.client.validate()?;

        self.vector_database
            .kind
            .parse::<crate::backend::BackendKind>()
            .map_err(|e| Error::Config(format!("vector_database.type: {}", e)))?;

        if self.vector_database.api_key_env.trim().is_empty() {
            return Err(Error::Config(
                "vector_database.api_key_env must name an environment variable".to_string(),
            ));
        }

        Ok(())
    }
}
