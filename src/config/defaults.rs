//! Default values for configuration

/// Default RAG API base URL for local development
pub fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

/// Default per-request timeout in seconds. Synchronous ingestion of a large
/// PDF can take a while on the server side.
pub fn default_timeout_secs() -> u64 {
    60
}

/// Default User-Agent header
pub fn default_user_agent() -> String {
    format!("rag-client/{}", env!("CARGO_PKG_VERSION"))
}

/// Default vector database kind
pub fn default_vector_database_type() -> String {
    "pinecone".to_string()
}

/// Default environment variable holding the vector database API key
pub fn default_api_key_env() -> String {
    "VECTOR_DB_API_KEY".to_string()
}

/// Default index name
pub fn default_index_name() -> String {
    "documents".to_string()
}

/// Default encoder identifier
pub fn default_encoder() -> String {
    "openai".to_string()
}
