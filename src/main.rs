//! rag-client CLI entry point

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use rag_client::{
    commands::{
        cmd_delete, cmd_ingest, cmd_init, cmd_query, print_delete_ack, print_ingest_ack,
        print_query_results, resolve_target, IngestOptions, TargetOverrides,
    },
    config::Config,
    error::Result,
    progress::LogWriterFactory,
    RagClient, Secret,
};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "rag-client")]
#[command(version, about = "Client for a hosted RAG ingestion and retrieval API", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(flatten)]
    target: TargetArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Connection settings that override the config file
#[derive(Args)]
struct TargetArgs {
    /// RAG API base URL
    #[arg(long, global = true, env = "RAG_API_URL")]
    base_url: Option<String>,

    /// Vector database kind (pinecone, qdrant, weaviate, astra)
    #[arg(long, global = true, env = "VECTOR_DB_TYPE")]
    backend: Option<String>,

    /// Vector database host
    #[arg(long, global = true, env = "VECTOR_DB_HOST")]
    db_host: Option<String>,

    /// Vector database API key
    #[arg(long, global = true, env = "VECTOR_DB_API_KEY", hide_env_values = true)]
    db_api_key: Option<String>,

    /// Index name
    #[arg(long, global = true, env = "VECTOR_DB_INDEX")]
    index: Option<String>,

    /// Encoder identifier (e.g. openai, cohere)
    #[arg(long, global = true, env = "RAG_ENCODER")]
    encoder: Option<String>,
}

impl From<TargetArgs> for TargetOverrides {
    fn from(args: TargetArgs) -> Self {
        TargetOverrides {
            base_url: args.base_url,
            backend: args.backend,
            db_host: args.db_host,
            db_api_key: args.db_api_key.map(Secret::new),
            index_name: args.index,
            encoder: args.encoder,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Ingest documents into the index
    Ingest {
        /// Document URLs
        #[arg(required = true)]
        urls: Vec<String>,

        /// File type tag (e.g. PDF); inferred from each URL when omitted
        #[arg(short = 't', long = "type")]
        file_type: Option<String>,

        /// Webhook notified when asynchronous ingestion completes
        #[arg(long)]
        webhook: Option<String>,
    },

    /// Query the index
    Query {
        /// The search query
        input: String,

        /// Maximum number of results to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Delete a document's chunks from the index
    Delete {
        /// URL the document was ingested from
        file_url: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(LogWriterFactory::default()))
        .with(filter)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_config_path);

    match cli.command {
        Commands::Init { force } => {
            let config = cmd_init(&config_path, force)?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({"status": "ok", "config": config.paths.config_file})
                );
            } else {
                println!("✓ rag-client initialized");
                println!("  Config: {}", config.paths.config_file.display());
                println!("\nNext steps:");
                println!("  1. Set vector_database.type and host in the config file");
                println!(
                    "  2. Export {} with your vector database API key",
                    config.vector_database.api_key_env
                );
                println!("  3. Ingest a document: rag-client ingest https://example.com/doc.pdf");
            }
            return Ok(());
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "rag-client", &mut std::io::stdout());
            return Ok(());
        }
        _ => {}
    }

    let config = Config::load_or_default(&config_path)?;
    let target = resolve_target(&config, cli.target.into())?;
    let client = RagClient::new(&target.client)?;

    match cli.command {
        Commands::Init { .. } | Commands::Completions { .. } => unreachable!(),

        Commands::Ingest {
            urls,
            file_type,
            webhook,
        } => {
            let has_webhook = webhook.is_some();
            let options = IngestOptions {
                file_type,
                webhook_url: webhook,
                show_progress: !cli.json,
            };
            let ack = cmd_ingest(&client, &target, &urls, options).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&ack)?);
            } else {
                print_ingest_ack(&ack, &target, has_webhook);
            }
        }

        Commands::Query { input, limit } => {
            let output = cmd_query(&client, &target, &input, limit).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_query_results(&output);
            }
        }

        Commands::Delete { file_url } => {
            let ack = cmd_delete(&client, &target, &file_url).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&ack)?);
            } else {
                print_delete_ack(&ack, &target, &file_url);
            }
        }
    }

    Ok(())
}
