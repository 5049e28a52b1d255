//! RAG API client
//!
//! Each operation validates its input, builds one JSON request, sends it
//! through the [`Transport`], and decodes the response. Nothing is cached or
//! retried, so a client can be shared freely between tasks.
//!
//! `delete` sends an HTTP DELETE with a JSON body because that is what the
//! server expects. Some proxies drop bodies on DELETE; if deletes arrive at
//! the server empty, look there first.

use crate::backend::VectorDatabase;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::{
    DeleteAck, DeleteRequest, Encoder, FileReference, IngestAck, IngestRequest, QueryRequest,
    QueryResult,
};
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, Transport};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

const INGEST_PATH: &str = "api/v1/ingest";
const QUERY_PATH: &str = "api/v1/query";
const DELETE_PATH: &str = "api/v1/delete";

pub struct RagClient<T = HttpTransport> {
    base_url: Url,
    transport: T,
}

impl RagClient<HttpTransport> {
    /// Client on the default `reqwest` transport
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> RagClient<T> {
    pub fn with_transport(config: &ClientConfig, transport: T) -> Result<Self> {
        let base_url = config.parsed_base_url()?;
        Ok(Self {
            base_url,
            transport,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Submit documents for chunking, embedding and storage.
    ///
    /// With a webhook the server acknowledges right away and calls back when
    /// done; without one it answers after ingestion finishes.
    pub async fn ingest(
        &self,
        files: Vec<FileReference>,
        backend: &VectorDatabase,
        index_name: &str,
        encoder: &Encoder,
        webhook_url: Option<&str>,
    ) -> Result<IngestAck> {
        let request = IngestRequest {
            files,
            vector_database: backend.clone(),
            index_name: index_name.to_string(),
            encoder: encoder.clone(),
            webhook_url: webhook_url.map(str::to_string),
        };
        self.send_ingest(&request).await
    }

    pub async fn send_ingest(&self, request: &IngestRequest) -> Result<IngestAck> {
        request.validate()?;
        info!(
            "Ingesting {} file(s) into {} index '{}'",
            request.files.len(),
            request.vector_database.kind(),
            request.index_name
        );

        let ack: IngestAck = self.call(HttpMethod::Post, INGEST_PATH, request).await?;
        if !ack.success {
            warn!("Server did not accept ingestion into '{}'", request.index_name);
        }
        Ok(ack)
    }

    /// Retrieve chunks relevant to `input`, in the server's ranking order
    pub async fn query(
        &self,
        input: &str,
        backend: &VectorDatabase,
        index_name: &str,
        encoder: &Encoder,
    ) -> Result<QueryResult> {
        let request = QueryRequest {
            input: input.to_string(),
            vector_database: backend.clone(),
            index_name: index_name.to_string(),
            encoder: encoder.clone(),
        };
        self.send_query(&request).await
    }

    pub async fn send_query(&self, request: &QueryRequest) -> Result<QueryResult> {
        request.validate()?;
        info!(
            "Querying {} index '{}'",
            request.vector_database.kind(),
            request.index_name
        );

        let result: QueryResult = self.call(HttpMethod::Post, QUERY_PATH, request).await?;
        info!("Retrieved {} chunk(s)", result.len());
        Ok(result)
    }

    /// Remove every chunk that came from `file_url`
    pub async fn delete(
        &self,
        file_url: &str,
        backend: &VectorDatabase,
        index_name: &str,
        encoder: &Encoder,
    ) -> Result<DeleteAck> {
        let request = DeleteRequest {
            file_url: file_url.to_string(),
            vector_database: backend.clone(),
            index_name: index_name.to_string(),
            encoder: encoder.clone(),
        };
        self.send_delete(&request).await
    }

    pub async fn send_delete(&self, request: &DeleteRequest) -> Result<DeleteAck> {
        request.validate()?;
        info!(
            "Deleting {} from {} index '{}'",
            request.file_url,
            request.vector_database.kind(),
            request.index_name
        );

        let response = self.exchange(HttpMethod::Delete, DELETE_PATH, request).await?;
        let ack: DeleteAck = decode_or_default(DELETE_PATH, &response.body)?;
        if let Some(n) = ack.num_of_deleted_chunks {
            info!("Deleted {} chunk(s)", n);
        }
        Ok(ack)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::Config(format!("Invalid endpoint '{}': {}", path, e)))
    }

    async fn call<B, R>(&self, method: HttpMethod, path: &str, body: &B) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let response = self.exchange(method, path, body).await?;
        decode(path, &response.body)
    }

    /// Send one request and turn a non-2xx status into an `Api` error
    async fn exchange<B: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Result<HttpResponse> {
        let url = self.endpoint(path)?;
        let body = serde_json::to_value(body)
            .map_err(|e| Error::validation(format!("Failed to encode request: {}", e)))?;

        let response = self.transport.send(HttpRequest { method, url, body }).await?;
        if !response.is_success() {
            let message = error_message(&response);
            debug!("{} {} failed with HTTP {}", method, path, response.status);
            return Err(Error::Api {
                status: response.status,
                message,
            });
        }
        Ok(response)
    }
}

fn decode<R: DeserializeOwned>(path: &str, body: &[u8]) -> Result<R> {
    serde_json::from_slice(body)
        .map_err(|e| Error::Decode(format!("Unexpected response from {}: {}", path, e)))
}

/// Like [`decode`], but an empty or `null` body yields `R::default()`.
/// Some vector database backends confirm a delete with no payload at all.
fn decode_or_default<R: DeserializeOwned + Default>(path: &str, body: &[u8]) -> Result<R> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(R::default());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Null) => Ok(R::default()),
        _ => decode(path, body),
    }
}

/// Pull a human-readable message out of an error response
fn error_message(response: &HttpResponse) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(&response.body) {
        for key in ["error", "message", "detail"] {
            match map.get(key) {
                Some(Value::String(s)) => return s.clone(),
                Some(Value::Null) | None => {}
                Some(other) => return other.to_string(),
            }
        }
    }

    let text = response.text();
    let text = text.trim();
    if !text.is_empty() {
        return text.to_string();
    }

    reqwest::StatusCode::from_u16(response.status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("unknown error")
        .to_string()
}
