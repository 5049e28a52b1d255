//! Delete command implementation

use super::Target;
use crate::client::RagClient;
use crate::error::Result;
use crate::models::DeleteAck;
use crate::transport::Transport;

/// Remove a document's chunks from the index
pub async fn cmd_delete<T: Transport>(
    client: &RagClient<T>,
    target: &Target,
    file_url: &str,
) -> Result<DeleteAck> {
    client
        .delete(file_url, &target.backend, &target.index_name, &target.encoder)
        .await
}

/// Print the delete confirmation
pub fn print_delete_ack(ack: &DeleteAck, target: &Target, file_url: &str) {
    match ack.num_of_deleted_chunks {
        Some(n) => println!(
            "✓ Deleted {} chunk(s) of {} from '{}'",
            n, file_url, target.index_name
        ),
        None => println!("✓ Deleted {} from '{}'", file_url, target.index_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::VectorDatabase;
    use crate::config::ClientConfig;
    use crate::error::Error;
    use crate::models::Encoder;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn target_for(server: &MockServer) -> Target {
        Target {
            client: ClientConfig::new(server.uri()),
            backend: VectorDatabase::from_parts(
                "astra",
                [("api_key", "astra-token"), ("host", "https://astra.example.com")],
            )
            .unwrap(),
            index_name: "docs".to_string(),
            encoder: Encoder::default(),
        }
    }

    #[tokio::test]
    async fn test_cmd_delete_sends_body_with_delete() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/v1/delete"))
            .and(body_json(json!({
                "file_url": "https://example.com/doc.pdf",
                "vector_database": {
                    "type": "astra",
                    "config": {"api_key": "astra-token", "host": "https://astra.example.com"}
                },
                "index_name": "docs",
                "encoder": "openai"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"num_of_deleted_chunks": 5})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let target = target_for(&mock_server);
        let client = RagClient::new(&target.client).unwrap();
        let ack = cmd_delete(&client, &target, "https://example.com/doc.pdf")
            .await
            .unwrap();

        assert_eq!(ack.num_of_deleted_chunks, Some(5));
    }

    #[tokio::test]
    async fn test_cmd_delete_accepts_no_content() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/v1/delete"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let target = target_for(&mock_server);
        let client = RagClient::new(&target.client).unwrap();
        let ack = cmd_delete(&client, &target, "https://example.com/doc.pdf")
            .await
            .unwrap();

        assert_eq!(ack.num_of_deleted_chunks, None);
        assert!(ack.extra.is_empty());
    }

    #[tokio::test]
    async fn test_cmd_delete_accepts_null_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/v1/delete"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("null".as_bytes().to_vec(), "application/json"),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let target = target_for(&mock_server);
        let client = RagClient::new(&target.client).unwrap();
        let ack = cmd_delete(&client, &target, "https://example.com/doc.pdf")
            .await
            .unwrap();

        assert_eq!(ack, DeleteAck::default());
    }

    #[tokio::test]
    async fn test_cmd_delete_rejects_bad_url_without_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let target = target_for(&mock_server);
        let client = RagClient::new(&target.client).unwrap();
        let err = cmd_delete(&client, &target, "doc.pdf").await.unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
    }
}
