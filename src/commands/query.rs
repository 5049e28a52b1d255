//! Query command implementation

use super::Target;
use crate::client::RagClient;
use crate::error::Result;
use crate::models::QueryResult;
use crate::transport::Transport;
use serde::Serialize;

/// Query output for CLI display
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutput {
    pub query: String,
    pub index_name: String,
    #[serde(flatten)]
    pub result: QueryResult,
}

/// Execute a query. `limit` trims what is shown, not what the server returns.
pub async fn cmd_query<T: Transport>(
    client: &RagClient<T>,
    target: &Target,
    query: &str,
    limit: Option<usize>,
) -> Result<QueryOutput> {
    let mut result = client
        .query(query, &target.backend, &target.index_name, &target.encoder)
        .await?;

    if let Some(limit) = limit {
        result.data.truncate(limit);
    }

    Ok(QueryOutput {
        query: query.to_string(),
        index_name: target.index_name.clone(),
        result,
    })
}

fn preview(text: &str, max_chars: usize) -> String {
    let text = text.trim().replace('\n', " ");
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut.trim_end())
    } else {
        text
    }
}

/// Print query results to console
pub fn print_query_results(output: &QueryOutput) {
    println!("\n🔍 Query: {}\n", output.query);
    println!(
        "Found {} results in '{}':\n",
        output.result.len(),
        output.index_name
    );

    for (i, chunk) in output.result.data.iter().enumerate() {
        let source = chunk.doc_url().unwrap_or("(unknown source)");
        match chunk.page_number() {
            Some(page) => println!("{}. {} (page {})", i + 1, source, page),
            None => println!("{}. {}", i + 1, source),
        }

        match chunk.content() {
            Some(content) => println!("   {}\n", preview(content, 200)),
            None => println!("   {}\n", serde_json::Value::Object(chunk.0.clone())),
        }
    }
}
