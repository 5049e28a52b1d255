//! Ingest command implementation

use super::Target;
use crate::client::RagClient;
use crate::error::{Error, Result};
use crate::models::{FileReference, IngestAck};
use crate::progress::spinner;
use crate::transport::Transport;
use tracing::{debug, info};
use url::Url;

/// Ingest options
#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    /// Type tag for every file; inferred from each URL when absent
    pub file_type: Option<String>,
    /// Callback URL for asynchronous ingestion
    pub webhook_url: Option<String>,
    /// Show a spinner while waiting
    pub show_progress: bool,
}

/// Guess the type tag the server expects from a URL's file extension
pub fn infer_file_type(raw_url: &str) -> Option<String> {
    let url = Url::parse(raw_url).ok()?;
    let file_name = url.path_segments()?.last()?.to_string();
    let extension = file_name.rsplit_once('.')?.1.to_lowercase();
    if extension.is_empty() {
        return None;
    }

    let mime = mime_guess::from_ext(&extension).first();
    let tag = match mime.as_ref().map(|m| m.essence_str()) {
        Some("application/pdf") => "PDF",
        Some("text/markdown") | Some("text/x-markdown") => "MARKDOWN",
        Some("text/plain") => "TXT",
        Some("text/html") => "HTML",
        Some("text/csv") => "CSV",
        Some("application/json") => "JSON",
        Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document") => "DOCX",
        Some("application/vnd.openxmlformats-officedocument.presentationml.presentation") => {
            "PPTX"
        }
        Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet") => "XLSX",
        _ => return Some(extension.to_uppercase()),
    };
    debug!("Inferred type {} for {}", tag, raw_url);
    Some(tag.to_string())
}

/// Build file references for the given URLs
pub fn file_references(urls: &[String], file_type: Option<&str>) -> Result<Vec<FileReference>> {
    urls.iter()
        .map(|url| {
            let tag = match file_type {
                Some(t) => t.to_string(),
                None => infer_file_type(url).ok_or_else(|| {
                    Error::Validation(format!(
                        "Cannot infer a file type for '{}'; pass --type",
                        url
                    ))
                })?,
            };
            Ok(FileReference::new(tag, url.clone()))
        })
        .collect()
}

/// Submit documents for ingestion
pub async fn cmd_ingest<T: Transport>(
    client: &RagClient<T>,
    target: &Target,
    urls: &[String],
    options: IngestOptions,
) -> Result<IngestAck> {
    let files = file_references(urls, options.file_type.as_deref())?;
    info!("Ingesting {} document(s)", files.len());

    let pb = spinner(
        format!("Ingesting into '{}'", target.index_name),
        options.show_progress,
    );
    let result = client
        .ingest(
            files,
            &target.backend,
            &target.index_name,
            &target.encoder,
            options.webhook_url.as_deref(),
        )
        .await;
    pb.finish_and_clear();

    result
}

/// Print the ingestion acknowledgement
pub fn print_ingest_ack(ack: &IngestAck, target: &Target, webhook: bool) {
    if ack.success {
        println!("✓ Ingestion accepted for index '{}'", target.index_name);
    } else {
        println!("✗ Ingestion was not accepted for index '{}'", target.index_name);
    }
    if let Some(job_id) = &ack.job_id {
        println!("  Job: {}", job_id);
    }
    if webhook {
        println!("  Completion will be reported to the webhook");
    }
    for (key, value) in &ack.extra {
        println!("  {}: {}", key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_file_type() {
        assert_eq!(
            infer_file_type("https://example.com/papers/attention.pdf").as_deref(),
            Some("PDF")
        );
        assert_eq!(
            infer_file_type("https://example.com/README.md?raw=1").as_deref(),
            Some("MARKDOWN")
        );
        assert_eq!(
            infer_file_type("https://example.com/notes.TXT").as_deref(),
            Some("TXT")
        );
        assert_eq!(
            infer_file_type("https://example.com/report.docx").as_deref(),
            Some("DOCX")
        );
        assert_eq!(infer_file_type("https://example.com/download"), None);
        assert_eq!(infer_file_type("not a url"), None);
    }

    #[test]
    fn test_file_references() {
        let urls = vec![
            "https://example.com/a.pdf".to_string(),
            "https://example.com/b".to_string(),
        ];

        let err = file_references(&urls, None).unwrap_err();
        assert!(matches!(err, Error::Validation(msg) if msg.contains("example.com/b")));

        let files = file_references(&urls, Some("PDF")).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.file_type == "PDF"));
        assert_eq!(files[1].url, "https://example.com/b");
    }
}
