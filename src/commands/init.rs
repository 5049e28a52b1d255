//! Init command implementation

use crate::config::Config;
use crate::error::{Error, Result};
use std::path::Path;
use tracing::info;

/// Write a default config file at `config_path`
pub fn cmd_init(config_path: &Path, force: bool) -> Result<Config> {
    if config_path.exists() && !force {
        return Err(Error::Config(format!(
            "Config file already exists at {}; use --force to overwrite",
            config_path.display()
        )));
    }

    let config = Config::new_at(config_path);
    config.save()?;
    info!("Initialized config at {:?}", config_path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");

        cmd_init(&path, false).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("api_key_env = \"VECTOR_DB_API_KEY\""));
        assert!(!content.contains("api_key ="));

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.client.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_init_refuses_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "index_name = \"mine\"\n").unwrap();

        assert!(matches!(cmd_init(&path, false), Err(Error::Config(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "index_name = \"mine\"\n");

        cmd_init(&path, true).unwrap();
        assert_eq!(Config::load(&path).unwrap().index_name, "documents");
    }
}
