use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use ingest::ChunkerConfig;

/// Process configuration, built once at startup from the environment and
/// passed by reference into the model and database collaborators.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub gemini_model: String,
    pub neo4j_uri: String,
    pub neo4j_user: String,
    pub neo4j_password: Option<String>,
    pub book_path: PathBuf,
    pub graph_path: PathBuf,
    pub progress_path: PathBuf,
    pub chunker: ChunkerConfig,
    pub repair_attempts: usize,
    pub dedupe_on_load: bool,
}

impl Config {
    /// `GOOGLE_API_KEY` is required up front; the Neo4j password is only
    /// checked when a database command actually needs it.
    pub fn from_env() -> Result<Self> {
        let config = Self {
            google_api_key: std::env::var("GOOGLE_API_KEY")
                .context("GOOGLE_API_KEY environment variable not set")?,
            gemini_model: env_or("GEMINI_MODEL", extract::gemini::DEFAULT_MODEL),
            neo4j_uri: env_or("NEO4J_URI", "bolt://localhost:7687"),
            neo4j_user: env_or("NEO4J_USER", "neo4j"),
            neo4j_password: std::env::var("NEO4J_PASSWORD").ok(),
            book_path: env_or("BOOK_PATH", "data/book.txt").into(),
            graph_path: env_or("GRAPH_PATH", "data/extracted_graph.json").into(),
            progress_path: env_or("PROGRESS_PATH", "data/progress_stats.json").into(),
            chunker: ChunkerConfig {
                chunk_size: env_parse("CHUNK_SIZE", ChunkerConfig::default().chunk_size)?,
                overlap: env_parse("CHUNK_OVERLAP", ChunkerConfig::default().overlap)?,
            },
            repair_attempts: env_parse("REPAIR_ATTEMPTS", extract::DEFAULT_REPAIR_ATTEMPTS)?,
            dedupe_on_load: env_flag("DEDUPE_ON_LOAD"),
        };

        ensure!(
            config.chunker.chunk_size > config.chunker.overlap,
            "CHUNK_SIZE ({}) must exceed CHUNK_OVERLAP ({})",
            config.chunker.chunk_size,
            config.chunker.overlap
        );
        Ok(config)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse(key: &str, default: usize) -> Result<usize> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{key} must be an integer, got {raw:?}")),
        Err(_) => Ok(default),
    }
}

fn env_flag(key: &str) -> bool {
    matches!(
        std::env::var(key).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}
