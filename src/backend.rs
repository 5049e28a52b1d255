//! Vector database selection
//!
//! The server is told which vector database to write to and read from on
//! every request. The selection is a closed set of kinds, each carrying the
//! connection settings that kind needs. A [`VectorDatabase`] can only be
//! built with a complete configuration, so a malformed selection is caught
//! when it is constructed rather than when a request is sent.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Supported vector database kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Pinecone,
    Qdrant,
    Weaviate,
    Astra,
}

impl BackendKind {
    pub const ALL: [BackendKind; 4] = [
        BackendKind::Pinecone,
        BackendKind::Qdrant,
        BackendKind::Weaviate,
        BackendKind::Astra,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Pinecone => "pinecone",
            BackendKind::Qdrant => "qdrant",
            BackendKind::Weaviate => "weaviate",
            BackendKind::Astra => "astra",
        }
    }

    /// Configuration keys the server expects for this kind
    pub fn required_keys(&self) -> &'static [&'static str] {
        match self {
            BackendKind::Pinecone
            | BackendKind::Qdrant
            | BackendKind::Weaviate
            | BackendKind::Astra => &["api_key", "host"],
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "pinecone" => Ok(Self::Pinecone),
            "qdrant" => Ok(Self::Qdrant),
            "weaviate" => Ok(Self::Weaviate),
            "astra" => Ok(Self::Astra),
            other => Err(Error::validation(format!(
                "Unsupported vector database '{}'; expected one of: pinecone, qdrant, weaviate, astra",
                other
            ))),
        }
    }
}

/// A credential that never shows up in logs or debug output.
///
/// The real value is only written when the secret is serialized into a
/// request body.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Connection settings for a hosted vector database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostedConfig {
    pub api_key: Secret,
    pub host: String,
}

impl HostedConfig {
    pub fn new(api_key: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key),
            host: host.into(),
        }
    }

    fn validate(&self, kind: BackendKind) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(Error::validation(format!(
                "{} configuration has an empty 'api_key'",
                kind
            )));
        }
        if self.host.trim().is_empty() {
            return Err(Error::validation(format!(
                "{} configuration has an empty 'host'",
                kind
            )));
        }
        Ok(())
    }
}

/// Vector database selection sent with every request.
///
/// Serializes as `{"type": "<kind>", "config": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config", rename_all = "lowercase")]
pub enum VectorDatabase {
    Pinecone(HostedConfig),
    Qdrant(HostedConfig),
    Weaviate(HostedConfig),
    Astra(HostedConfig),
}

impl VectorDatabase {
    /// Build a selection from a typed kind and settings
    pub fn new(kind: BackendKind, config: HostedConfig) -> Result<Self> {
        config.validate(kind)?;
        Ok(match kind {
            BackendKind::Pinecone => Self::Pinecone(config),
            BackendKind::Qdrant => Self::Qdrant(config),
            BackendKind::Weaviate => Self::Weaviate(config),
            BackendKind::Astra => Self::Astra(config),
        })
    }

    /// Build a selection from an untyped kind name and key/value mapping.
    ///
    /// The mapping's keys must be exactly the kind's required set.
    pub fn from_parts<K, V>(kind: &str, config: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let kind: BackendKind = kind.parse()?;
        let mut values: BTreeMap<String, String> = config
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let required = kind.required_keys();
        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|key| !values.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(Error::validation(format!(
                "{} configuration is missing required key(s): {}",
                kind,
                missing.join(", ")
            )));
        }

        let unknown: Vec<&str> = values
            .keys()
            .map(String::as_str)
            .filter(|key| !required.contains(key))
            .collect();
        if !unknown.is_empty() {
            return Err(Error::validation(format!(
                "{} configuration has unsupported key(s): {}",
                kind,
                unknown.join(", ")
            )));
        }

        let api_key = values.remove("api_key").unwrap_or_default();
        let host = values.remove("host").unwrap_or_default();
        Self::new(kind, HostedConfig::new(api_key, host))
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Pinecone(_) => BackendKind::Pinecone,
            Self::Qdrant(_) => BackendKind::Qdrant,
            Self::Weaviate(_) => BackendKind::Weaviate,
            Self::Astra(_) => BackendKind::Astra,
        }
    }

    pub fn config(&self) -> &HostedConfig {
        match self {
            Self::Pinecone(c) | Self::Qdrant(c) | Self::Weaviate(c) | Self::Astra(c) => c,
        }
    }

    /// Re-check the settings. Values that came through `Deserialize` skip
    /// the constructor, so requests call this before sending.
    pub fn validate(&self) -> Result<()> {
        self.config().validate(self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_config() -> Vec<(&'static str, &'static str)> {
        vec![("api_key", "pc-secret"), ("host", "https://db.example.com")]
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("pinecone".parse::<BackendKind>().unwrap(), BackendKind::Pinecone);
        assert_eq!(" Weaviate ".parse::<BackendKind>().unwrap(), BackendKind::Weaviate);
        assert!(matches!(
            "milvus".parse::<BackendKind>(),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_from_parts_every_kind() {
        for kind in BackendKind::ALL {
            let db = VectorDatabase::from_parts(kind.as_str(), full_config()).unwrap();
            assert_eq!(db.kind(), kind);
            assert_eq!(db.config().host, "https://db.example.com");
        }
    }

    #[test]
    fn test_missing_key_rejected_for_every_kind() {
        for kind in BackendKind::ALL {
            for required in kind.required_keys() {
                let partial: Vec<_> = full_config()
                    .into_iter()
                    .filter(|(k, _)| k != required)
                    .collect();
                let err = VectorDatabase::from_parts(kind.as_str(), partial).unwrap_err();
                match err {
                    Error::Validation(msg) => assert!(msg.contains(required), "{}", msg),
                    other => panic!("expected validation error, got {:?}", other),
                }
            }
        }
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut config = full_config();
        config.push(("region", "us-west-2"));
        let err = VectorDatabase::from_parts("qdrant", config).unwrap_err();
        assert!(matches!(err, Error::Validation(msg) if msg.contains("region")));
    }

    #[test]
    fn test_empty_values_rejected() {
        let err = VectorDatabase::from_parts("astra", [("api_key", " "), ("host", "h")]);
        assert!(matches!(err, Err(Error::Validation(_))));

        let err = VectorDatabase::new(BackendKind::Pinecone, HostedConfig::new("k", ""));
        assert!(matches!(err, Err(Error::Validation(_))));
    }

    #[test]
    fn test_wire_shape() {
        let db = VectorDatabase::new(
            BackendKind::Pinecone,
            HostedConfig::new("pc-secret", "https://db.example.com"),
        )
        .unwrap();
        let value = serde_json::to_value(&db).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "pinecone",
                "config": {"api_key": "pc-secret", "host": "https://db.example.com"}
            })
        );
    }

    #[test]
    fn test_secret_redacted_in_debug() {
        let db = VectorDatabase::from_parts("weaviate", full_config()).unwrap();
        let rendered = format!("{:?}", db);
        assert!(!rendered.contains("pc-secret"));
        assert!(rendered.contains("***"));
        assert_eq!(db.config().api_key.to_string(), "***");
        assert_eq!(db.config().api_key.expose(), "pc-secret");
    }
}
