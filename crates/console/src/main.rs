mod config;

use anyhow::{bail, Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use config::Config;
use extract::{Extractor, GeminiClient};
use ingest::Chunk;
use schema::SchemaRegistry;
use store::ProgressState;

enum Selection {
    Range(usize, usize),
    Remaining,
    Retry,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env()?;
    let registry = SchemaRegistry::new();
    let model = GeminiClient::new(config.google_api_key.clone(), config.gemini_model.clone());

    let chunks = ingest::read_book_chunks(&config.book_path, config.chunker).await;
    if chunks.is_empty() {
        println!("No content to process at {}.", config.book_path.display());
    } else {
        println!("Book split into {} chunks.", chunks.len());
    }

    println!("=== Farsi History Knowledge Graph ===");
    println!("Commands: range <start>-<end> | all | retry | status | populate | qa | quit");

    let mut editor = DefaultEditor::new().context("failed to initialize line editor")?;
    loop {
        let line = match editor.readline("tarikh> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("Use 'quit' to exit.");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("ERROR: {e}");
                break;
            }
        };
        let line = line.trim().to_lowercase();
        if line.is_empty() {
            continue;
        }
        editor.add_history_entry(&line).ok();

        match line.as_str() {
            "quit" | "exit" | "q" => break,
            "status" => {
                let mut stats = ProgressState::load(&config.progress_path);
                stats.total_chunks_in_book = chunks.len();
                display_status(&stats);
            }
            "all" => run_extraction(&config, &registry, &model, &chunks, Selection::Remaining).await,
            "retry" => run_extraction(&config, &registry, &model, &chunks, Selection::Retry).await,
            "populate" => {
                if let Err(e) = run_populate(&config, &registry).await {
                    eprintln!("ERROR: {e:#}");
                }
            }
            "qa" => {
                if let Err(e) = run_qa(&config, &model, &registry, &mut editor).await {
                    eprintln!("ERROR: {e:#}");
                }
            }
            other => {
                let range = other
                    .strip_prefix("range")
                    .map(str::trim)
                    .unwrap_or(other);
                match parse_range(range) {
                    Some((start, end)) if start <= end => {
                        run_extraction(
                            &config,
                            &registry,
                            &model,
                            &chunks,
                            Selection::Range(start, end),
                        )
                        .await
                    }
                    _ => println!("ERROR: Invalid command. Use 'range 0-9', 'all', 'retry', 'status', 'populate', 'qa' or 'quit'."),
                }
            }
        }
    }

    println!("Exiting.");
    Ok(())
}

/// Parse `start-end` into an inclusive index pair.
fn parse_range(input: &str) -> Option<(usize, usize)> {
    let (start, end) = input.split_once('-')?;
    Some((start.trim().parse().ok()?, end.trim().parse().ok()?))
}

/// One operator action: reload both documents, run the engine over the
/// selected indices, reconcile, and persist both documents.
async fn run_extraction(
    config: &Config,
    registry: &SchemaRegistry,
    model: &GeminiClient,
    chunks: &[Chunk],
    selection: Selection,
) {
    if chunks.is_empty() {
        println!("No book content loaded; nothing to process.");
        return;
    }

    // Reload on every run so each action sees fresh state.
    let mut stats = ProgressState::load(&config.progress_path);
    stats.total_chunks_in_book = chunks.len();
    let mut all_triplets = store::load_graph(&config.graph_path);

    let indices = match selection {
        Selection::Range(start, end) => {
            if start >= chunks.len() {
                println!("ERROR: Invalid range. Must be between 0 and {}.", chunks.len() - 1);
                return;
            }
            stats.select_range(start, end)
        }
        Selection::Remaining => stats.select_remaining(),
        Selection::Retry => {
            let retry = stats.select_retry();
            if retry.is_empty() {
                println!("No failed chunks to retry.");
                return;
            }
            retry
        }
    };

    if indices.is_empty() {
        println!("No new chunks to process for the selected option.");
        return;
    }
    println!("Found {} chunks to process.", indices.len());

    let pending: Vec<Chunk> = indices.iter().map(|&i| chunks[i].clone()).collect();
    let engine = Extractor::new(model, registry).with_repair_attempts(config.repair_attempts);
    let outcome = engine.process(&pending).await;

    stats.reconcile(&outcome.succeeded, &outcome.failed);
    stats.add_token_usage(outcome.usage.input_tokens, outcome.usage.output_tokens);

    let added = outcome.new_triplets.len();
    all_triplets.extend(outcome.new_triplets);
    stats.total_triplets_extracted = all_triplets.len();

    persist_with_retry(config, &stats, &all_triplets);

    println!("\nRun complete. Added {added} new triplets.");
    display_status(&stats);
}

/// Persist both documents; on failure, try once more before telling the
/// operator the run's results could not be written.
fn persist_with_retry(config: &Config, stats: &ProgressState, triplets: &[schema::Triplet]) {
    for attempt in 0..2 {
        let graph_result = store::save_graph(&config.graph_path, triplets);
        let stats_result = stats.save(&config.progress_path);
        match (graph_result, stats_result) {
            (Ok(()), Ok(())) => return,
            (graph_result, stats_result) => {
                for (name, result) in [("graph", graph_result), ("progress", stats_result)] {
                    if let Err(e) = result {
                        eprintln!("ERROR: failed to save {name} document: {e}");
                    }
                }
                if attempt == 0 {
                    eprintln!("Retrying save once...");
                }
            }
        }
    }
    eprintln!("ERROR: this run's results could not be persisted; they will be lost on exit.");
}

fn display_status(stats: &ProgressState) {
    println!("\n--- Progress Status ---");
    println!(
        "Processed {} out of {} chunks ({:.2}% complete).",
        stats.processed_chunks.len(),
        stats.total_chunks_in_book,
        stats.percent_complete()
    );
    println!(
        "Total triplets extracted so far: {}",
        stats.total_triplets_extracted
    );
    println!(
        "Tokens used: {} in / {} out.",
        stats.total_input_tokens, stats.total_output_tokens
    );
    println!("Number of failed chunks: {}", stats.failed_chunks.len());
    if !stats.failed_chunks.is_empty() {
        println!("Failed chunk IDs: {:?}", stats.failed_chunks);
    }
    match &stats.last_updated {
        Some(ts) => println!("Last updated: {ts}"),
        None => println!("Last updated: never"),
    }
    println!("-----------------------\n");
}

/// Load the accumulated graph document into Neo4j.
async fn run_populate(config: &Config, registry: &SchemaRegistry) -> Result<()> {
    let Some(password) = &config.neo4j_password else {
        bail!("NEO4J_PASSWORD environment variable not set");
    };

    let triplets = store::load_graph(&config.graph_path);
    if triplets.is_empty() {
        println!("Graph document is empty; run an extraction first.");
        return Ok(());
    }

    let graph = neo4rs::Graph::new(
        config.neo4j_uri.as_str(),
        config.neo4j_user.as_str(),
        password.as_str(),
    )
    .await
    .context("could not connect to Neo4j")?;

    let loader =
        populate::Loader::new(&graph, registry).with_dedupe(config.dedupe_on_load);
    loader.init_constraints().await?;

    println!("Merging {} triplets into Neo4j...", triplets.len());
    let report = loader.load(&triplets).await?;
    println!(
        "Population complete: {} merged, {} skipped (unknown relation), {} deduplicated.",
        report.merged, report.skipped_unknown_relation, report.deduplicated
    );
    Ok(())
}

/// Interactive question loop over the populated graph.
async fn run_qa(
    config: &Config,
    model: &GeminiClient,
    registry: &SchemaRegistry,
    editor: &mut DefaultEditor,
) -> Result<()> {
    let Some(password) = &config.neo4j_password else {
        bail!("NEO4J_PASSWORD environment variable not set");
    };
    let graph = neo4rs::Graph::new(
        config.neo4j_uri.as_str(),
        config.neo4j_user.as_str(),
        password.as_str(),
    )
    .await
    .context("could not connect to Neo4j")?;

    let session = qa::QaSession::new(model, &graph, registry);
    println!("Ask a question about the knowledge graph ('exit' to return).");

    loop {
        let question = match editor.readline("qa> ") {
            Ok(line) => line.trim().to_string(),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("ERROR: {e}");
                break;
            }
        };
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            break;
        }
        editor.add_history_entry(&question).ok();

        match session.answer(&question).await {
            Ok(answer) => {
                println!("Query: {}", answer.cypher);
                println!("Found {} records.", answer.record_count);
                println!("\n--- Answer ---\n{}\n--------------", answer.text);
            }
            Err(e) => eprintln!("ERROR: {e:#}"),
        }
    }

    println!("Returning to main console.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_range;

    #[test]
    fn parses_well_formed_ranges() {
        assert_eq!(parse_range("0-9"), Some((0, 9)));
        assert_eq!(parse_range("12 - 15"), Some((12, 15)));
    }

    #[test]
    fn rejects_malformed_ranges() {
        assert_eq!(parse_range("abc"), None);
        assert_eq!(parse_range("3"), None);
        assert_eq!(parse_range("a-b"), None);
    }
}
