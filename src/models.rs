//! Request and response payloads for the RAG API.

use crate::backend::VectorDatabase;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use url::Url;

/// Embedding model identifier, passed to the server uninterpreted
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Encoder(String);

impl Encoder {
    pub const OPENAI: &'static str = "openai";
    pub const COHERE: &'static str = "cohere";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(&self) -> Result<()> {
        if self.0.trim().is_empty() {
            return Err(Error::validation("encoder must not be empty"));
        }
        Ok(())
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(Self::OPENAI)
    }
}

impl fmt::Display for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Encoder {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Encoder {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A document to ingest: a type tag such as `PDF` and where to fetch it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReference {
    #[serde(rename = "type")]
    pub file_type: String,
    pub url: String,
}

impl FileReference {
    pub fn new(file_type: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            file_type: file_type.into(),
            url: url.into(),
        }
    }

    pub fn pdf(url: impl Into<String>) -> Self {
        Self::new("PDF", url)
    }

    fn validate(&self) -> Result<()> {
        if self.file_type.trim().is_empty() {
            return Err(Error::validation(format!(
                "file '{}' has an empty type tag",
                self.url
            )));
        }
        check_http_url("file url", &self.url)
    }
}

/// Reject anything that is not an absolute http(s) URL
pub(crate) fn check_http_url(what: &str, raw: &str) -> Result<()> {
    let url = Url::parse(raw)
        .map_err(|e| Error::validation(format!("{} '{}' is not a valid URL: {}", what, raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(Error::validation(format!(
            "{} '{}' has unsupported scheme '{}'",
            what, raw, scheme
        ))),
    }
}

fn check_index_name(index_name: &str) -> Result<()> {
    if index_name.trim().is_empty() {
        return Err(Error::validation("index name must not be empty"));
    }
    Ok(())
}

/// Body of `POST /api/v1/ingest`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestRequest {
    pub files: Vec<FileReference>,
    pub vector_database: VectorDatabase,
    pub index_name: String,
    pub encoder: Encoder,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

impl IngestRequest {
    pub fn validate(&self) -> Result<()> {
        if self.files.is_empty() {
            return Err(Error::validation("at least one file is required"));
        }
        for file in &self.files {
            file.validate()?;
        }
        self.vector_database.validate()?;
        check_index_name(&self.index_name)?;
        self.encoder.validate()?;
        if let Some(webhook) = &self.webhook_url {
            check_http_url("webhook url", webhook)?;
        }
        Ok(())
    }
}

/// Body of `POST /api/v1/query`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub input: String,
    pub vector_database: VectorDatabase,
    pub index_name: String,
    pub encoder: Encoder,
}

impl QueryRequest {
    pub fn validate(&self) -> Result<()> {
        if self.input.trim().is_empty() {
            return Err(Error::validation("query input must not be empty"));
        }
        self.vector_database.validate()?;
        check_index_name(&self.index_name)?;
        self.encoder.validate()
    }
}

/// Body of `DELETE /api/v1/delete`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub file_url: String,
    pub vector_database: VectorDatabase,
    pub index_name: String,
    pub encoder: Encoder,
}

impl DeleteRequest {
    pub fn validate(&self) -> Result<()> {
        check_http_url("file url", &self.file_url)?;
        self.vector_database.validate()?;
        check_index_name(&self.index_name)?;
        self.encoder.validate()
    }
}

fn default_success() -> bool {
    true
}

/// Acknowledgement returned by the ingest endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestAck {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default, alias = "id", skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    /// Every other field the server sent
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One retrieved chunk. The server decides the fields; the accessors cover
/// the ones it usually sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RetrievedChunk(pub Map<String, Value>);

impl RetrievedChunk {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn content(&self) -> Option<&str> {
        self.0.get("content").and_then(Value::as_str)
    }

    pub fn doc_url(&self) -> Option<&str> {
        self.0.get("doc_url").and_then(Value::as_str)
    }

    /// Page numbers arrive as numbers or as strings depending on the backend
    pub fn page_number(&self) -> Option<String> {
        match self.0.get("page_number")? {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }
}

/// Response of the query endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default = "default_success")]
    pub success: bool,
    /// Retrieved chunks in the order the server ranked them
    pub data: Vec<RetrievedChunk>,
}

impl QueryResult {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Confirmation returned by the delete endpoint. Empty when the server
/// confirms with no body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteAck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_of_deleted_chunks: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
