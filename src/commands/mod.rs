//! CLI commands implementation

pub mod delete;
pub mod ingest;
pub mod init;
pub mod query;

pub use delete::*;
pub use ingest::*;
pub use init::*;
pub use query::*;

use crate::backend::{Secret, VectorDatabase};
use crate::config::{ClientConfig, Config};
use crate::error::Result;
use crate::models::Encoder;
use tracing::debug;

/// Values given on the command line or through the environment. They win
/// over the config file.
#[derive(Debug, Clone, Default)]
pub struct TargetOverrides {
    pub base_url: Option<String>,
    pub backend: Option<String>,
    pub db_host: Option<String>,
    pub db_api_key: Option<Secret>,
    pub index_name: Option<String>,
    pub encoder: Option<String>,
}

/// Where a command sends its request
#[derive(Debug, Clone)]
pub struct Target {
    pub client: ClientConfig,
    pub backend: VectorDatabase,
    pub index_name: String,
    pub encoder: Encoder,
}

/// Merge overrides with the config file into a validated target
pub fn resolve_target(config: &Config, overrides: TargetOverrides) -> Result<Target> {
    let mut client = config.client.clone();
    if let Some(base_url) = overrides.base_url {
        client.base_url = base_url;
    }
    client.validate()?;

    let kind = overrides
        .backend
        .unwrap_or_else(|| config.vector_database.kind.clone());

    // Absent values stay out of the map so the error names the missing key
    let mut settings = Vec::new();
    if let Some(api_key) = overrides
        .db_api_key
        .map(|key| key.expose().to_string())
        .or_else(|| config.vector_database.api_key())
    {
        settings.push(("api_key", api_key));
    }
    if let Some(host) = overrides
        .db_host
        .or_else(|| config.vector_database.host.clone())
    {
        settings.push(("host", host));
    }
    let backend = VectorDatabase::from_parts(&kind, settings)?;

    let target = Target {
        client,
        backend,
        index_name: overrides
            .index_name
            .unwrap_or_else(|| config.index_name.clone()),
        encoder: Encoder::new(overrides.encoder.unwrap_or_else(|| config.encoder.clone())),
    };
    debug!(
        "Target: {} ({} index '{}', encoder '{}')",
        target.client.base_url,
        target.backend.kind(),
        target.index_name,
        target.encoder
    );
    Ok(target)
}
