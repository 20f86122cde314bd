//! semgraph CLI.
//!
//! Usage:
//!   semgraph run --config semgraph.toml --input chunks.jsonl
//!   semgraph serve --config semgraph.toml --addr 0.0.0.0:8080

use clap::{Parser, Subcommand};
use semgraph::config::{load_dotenv, Config};
use semgraph::llm::{LlmClient, OllamaClient};
use semgraph::pipeline;
use semgraph::query::Neo4jReader;
use semgraph::sink::Neo4jSink;
use semgraph::SemgraphError;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "semgraph",
    version,
    about = "Concept extraction and LLM-scored relation graph pipeline"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a source file or directory through the pipeline and commit to the graph.
    Run {
        #[arg(long, default_value = "semgraph.toml")]
        config: PathBuf,
        /// File or directory of newline-delimited chunk records.
        #[arg(long)]
        input: PathBuf,
    },
    /// Serve the read-only query HTTP surface (spec.md §4.8).
    Serve {
        #[arg(long, default_value = "semgraph.toml")]
        config: PathBuf,
        #[arg(long, default_value = "0.0.0.0:8080")]
        addr: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    load_dotenv();

    let runtime = tokio::runtime::Runtime::new().expect("failed to start async runtime");
    match runtime.block_on(dispatch()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "semgraph exited with an error");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

async fn dispatch() -> Result<(), SemgraphError> {
    match Cli::parse().command {
        Commands::Run { config, input } => run_pipeline(&config, &input).await,
        Commands::Serve { config, addr } => serve(&config, &addr).await,
    }
}

async fn run_pipeline(config_path: &Path, input: &Path) -> Result<(), SemgraphError> {
    let config = Config::load(config_path)?;
    let paths = pipeline::resolve_paths(input)?;

    let llm_client: Arc<dyn LlmClient> = Arc::new(OllamaClient::new(&config.llm));
    let sink = Box::new(Neo4jSink::open(&config.graph).await?);

    let report = pipeline::run(&paths, &config, llm_client, sink).await?;
    tracing::info!(
        lines_read = report.lines_read,
        chunks_parsed = report.chunks_parsed,
        concepts_extracted = report.concepts_extracted,
        candidates_scored = report.candidates_scored,
        relations_kept = report.relations_kept,
        "pipeline run complete"
    );
    Ok(())
}

async fn serve(config_path: &Path, addr: &str) -> Result<(), SemgraphError> {
    let config = Config::load(config_path)?;
    let reader = Neo4jReader::open(&config.graph).await?;
    let state = semgraph::http::AppState {
        reader: Arc::new(reader),
    };
    let app = semgraph::http::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "query surface listening");
    axum::serve(listener, app).await?;
    Ok(())
}
