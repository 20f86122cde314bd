//! The orchestrator wiring S1-S7 (spec.md §2, §5): bounded worker
//! concurrency per chunk, one merged stream of GraphWrite commands into a
//! single S7 sink instance, patterned on
//! `plexus::analysis::orchestrator::AnalysisOrchestrator`'s phase-based
//! concurrency (programmatic work runs in parallel via `tokio::spawn`,
//! LLM calls are rate-limited behind their own `Semaphore`).

mod record;
mod source;

use crate::config::{Config, LlmConfig, RelationLlmConfig};
use crate::error::SemgraphError;
use crate::graph::{Chunk, GraphWrite};
use crate::llm::LlmClient;
use crate::materialize::{chunk_write, concept_write, mention_write, relation_write};
use crate::pair::enumerate_candidates;
use crate::score::score_candidate;
use crate::sink::GraphSink;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tracing::{error, info};

pub use record::parse_line;
pub use source::{read_lines, resolve_paths};

/// Summary counters for a completed run, reported by the `run` CLI
/// subcommand.
#[derive(Debug, Default, Clone, Copy)]
pub struct PipelineReport {
    pub lines_read: usize,
    pub chunks_parsed: usize,
    pub concepts_extracted: usize,
    pub candidates_scored: usize,
    pub relations_kept: usize,
}

/// Run the full pipeline over `paths`, writing into `sink`. `sink` is
/// owned for the duration of the run — one worker, one sink instance, per
/// spec.md §5.
pub async fn run(
    paths: &[PathBuf],
    config: &Config,
    llm_client: Arc<dyn LlmClient>,
    sink: Box<dyn GraphSink>,
) -> Result<PipelineReport, SemgraphError> {
    let lines = read_lines(paths).await?;
    let chunks: Vec<Chunk> = lines.iter().filter_map(|line| parse_line(line)).collect();

    let (tx, mut rx) = mpsc::channel::<GraphWrite>(config.parallelism * 8);

    let mut sink = sink;
    let sink_task = tokio::spawn(async move {
        while let Some(command) = rx.recv().await {
            if let Err(err) = sink.write(command).await {
                error!(error = %err, "sink write failed");
                return Err(err);
            }
        }
        sink.close().await
    });

    let llm_available = llm_client.is_available().await;
    if !llm_available {
        info!("LLM endpoint unavailable; running without relation scoring");
    }

    let worker_semaphore = Arc::new(Semaphore::new(config.parallelism));
    let llm_semaphore = Arc::new(Semaphore::new(config.parallelism));
    let concepts_extracted = Arc::new(AtomicUsize::new(0));
    let candidates_scored = Arc::new(AtomicUsize::new(0));
    let relations_kept = Arc::new(AtomicUsize::new(0));

    let mut join_set = tokio::task::JoinSet::new();
    for chunk in chunks.iter().cloned() {
        let tx = tx.clone();
        let worker_permit = worker_semaphore.clone();
        let llm_semaphore = llm_semaphore.clone();
        let llm_client = llm_client.clone();
        let llm_config = config.llm.clone();
        let relation_config = config.relation.llm.clone();
        let concepts_extracted = concepts_extracted.clone();
        let candidates_scored = candidates_scored.clone();
        let relations_kept = relations_kept.clone();

        join_set.spawn(async move {
            let _permit = worker_permit
                .acquire_owned()
                .await
                .expect("worker semaphore never closes during a run");
            process_chunk(
                chunk,
                tx,
                llm_available,
                llm_semaphore,
                llm_client,
                llm_config,
                relation_config,
                concepts_extracted,
                candidates_scored,
                relations_kept,
            )
            .await;
        });
    }

    while join_set.join_next().await.is_some() {}
    drop(tx);

    sink_task
        .await
        .map_err(|_| SemgraphError::Io(std::io::Error::new(std::io::ErrorKind::Other, "sink task panicked")))??;

    Ok(PipelineReport {
        lines_read: lines.len(),
        chunks_parsed: chunks.len(),
        concepts_extracted: concepts_extracted.load(Ordering::Relaxed),
        candidates_scored: candidates_scored.load(Ordering::Relaxed),
        relations_kept: relations_kept.load(Ordering::Relaxed),
    })
}

/// Process one chunk end to end: extract (S3), emit Chunk/Concept/Mention
/// writes, enumerate pairs (S4), and score each candidate (S5) if scoring
/// is enabled for this run.
#[allow(clippy::too_many_arguments)]
async fn process_chunk(
    chunk: Chunk,
    tx: mpsc::Sender<GraphWrite>,
    llm_available: bool,
    llm_semaphore: Arc<Semaphore>,
    llm_client: Arc<dyn LlmClient>,
    llm_config: LlmConfig,
    relation_config: RelationLlmConfig,
    concepts_extracted: Arc<AtomicUsize>,
    candidates_scored: Arc<AtomicUsize>,
    relations_kept: Arc<AtomicUsize>,
) {
    let concepts = crate::extract::extract_concepts(&chunk);
    concepts_extracted.fetch_add(concepts.len(), Ordering::Relaxed);

    let _ = tx.send(chunk_write(&chunk)).await;
    for concept in &concepts {
        let _ = tx.send(concept_write(concept)).await;
        let _ = tx.send(mention_write(&chunk.chunk_id, &concept.id)).await;
    }

    if !llm_available {
        return;
    }

    let candidates = enumerate_candidates(&chunk, &concepts);
    for candidate in candidates {
        candidates_scored.fetch_add(1, Ordering::Relaxed);
        let _permit = llm_semaphore.clone().acquire_owned().await;
        if let Some(scored) =
            score_candidate(llm_client.as_ref(), candidate, &llm_config, &relation_config).await
        {
            relations_kept.fetch_add(1, Ordering::Relaxed);
            let _ = tx.send(relation_write(&scored)).await;
        }
    }
}
