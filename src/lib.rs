//! rag-client - a typed client for a hosted RAG (Retrieval-Augmented Generation) API
//!
//! This crate provides:
//! - [`RagClient`] with `ingest`, `query` and `delete` against `/api/v1/*`
//! - A closed [`VectorDatabase`] selection validated before anything is sent
//! - A [`Transport`] seam so the HTTP layer can be swapped out in tests
//! - The `rag-client` CLI commands built on top of the library

pub mod backend;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod progress;
pub mod transport;

pub use backend::{BackendKind, HostedConfig, Secret, VectorDatabase};
pub use client::RagClient;
pub use config::{ClientConfig, Config};
pub use error::{Error, Result};
pub use models::{
    DeleteAck, DeleteRequest, Encoder, FileReference, IngestAck, IngestRequest, QueryRequest,
    QueryResult, RetrievedChunk,
};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, Transport};
