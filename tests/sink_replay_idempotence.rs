//! Scenario 5 (spec.md §8): committing the same GraphWrite stream to a
//! sink twice leaves the graph indistinguishable from one commit, aside
//! from `updatedAt`.

mod common;

use httpmock::MockServer;
use semgraph::config::Config;
use semgraph::llm::{LlmClient, OllamaClient};
use semgraph::pipeline;
use semgraph::sink::{GraphSink, InMemorySink};
use std::io::Write;
use std::sync::Arc;
use tempfile::tempdir;

fn config_with(llm_endpoint: &str) -> Config {
    Config {
        graph: common::graph_config(),
        llm: common::llm_config(llm_endpoint),
        relation: semgraph::config::RelationConfig {
            cooccur: Default::default(),
            llm: common::relation_config(),
        },
        parallelism: 2,
    }
}

fn write_input() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chunks.jsonl");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "{}", common::sample_line("c1", "The api and rest work together")).unwrap();
    (dir, path)
}

/// Replay the full S2-S6 command stream for `path` through `llm_client`,
/// independent of any sink, so the resulting `Vec<GraphWrite>` can be
/// committed more than once.
async fn build_command_stream(
    path: &std::path::Path,
    llm_client: &dyn LlmClient,
    config: &Config,
) -> Vec<semgraph::graph::GraphWrite> {
    let mut commands = Vec::new();
    let lines = pipeline::read_lines(std::slice::from_ref(&path.to_path_buf())).await.unwrap();
    let chunks: Vec<_> = lines.iter().filter_map(|l| pipeline::parse_line(l)).collect();

    for chunk in &chunks {
        let concepts = semgraph::extract::extract_concepts(chunk);
        commands.push(semgraph::materialize::chunk_write(chunk));
        for concept in &concepts {
            commands.push(semgraph::materialize::concept_write(concept));
            commands.push(semgraph::materialize::mention_write(&chunk.chunk_id, &concept.id));
        }

        let candidates = semgraph::pair::enumerate_candidates(chunk, &concepts);
        for candidate in candidates {
            if let Some(scored) =
                semgraph::score::score_candidate(llm_client, candidate, &config.llm, &config.relation.llm).await
            {
                commands.push(semgraph::materialize::relation_write(&scored));
            }
        }
    }
    commands
}

#[tokio::test]
async fn committing_the_same_stream_twice_preserves_node_and_edge_counts() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(httpmock::Method::GET).path("/api/tags");
        then.status(200).json_body(serde_json::json!({"models": []}));
    });
    server.mock(|when, then| {
        when.method(httpmock::Method::POST).path("/api/generate");
        then.status(200).json_body(serde_json::json!({
            "response": r#"{"predicate":"related_to","confidence":0.8,"evidence":"x"}"#
        }));
    });

    let (_dir, path) = write_input();
    let config = config_with(&server.base_url());
    let llm_client: Arc<dyn LlmClient> = Arc::new(OllamaClient::new(&config.llm));
    let commands = build_command_stream(&path, llm_client.as_ref(), &config).await;
    assert!(!commands.is_empty());

    let mut sink = InMemorySink::new(config.graph.batch_size);

    for command in commands.clone() {
        sink.write(command).await.unwrap();
    }
    sink.close().await.unwrap();
    let (nodes_after_first, edges_after_first) = (sink.nodes.len(), sink.edges.len());

    for command in commands {
        sink.write(command).await.unwrap();
    }
    sink.close().await.unwrap();

    assert_eq!(sink.nodes.len(), nodes_after_first);
    assert_eq!(sink.edges.len(), edges_after_first);
}
