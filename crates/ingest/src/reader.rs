use std::path::Path;

use thiserror::Error;

use crate::chunk::Chunk;
use crate::chunker::{self, ChunkerConfig};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("source text not found at {0}")]
    NotFound(String),

    #[error("source text at {0} is not valid UTF-8")]
    Decode(String),

    #[error("failed to read source text: {0}")]
    Io(#[from] std::io::Error),
}

/// Read the whole source text as UTF-8.
pub async fn read_book(path: &Path) -> Result<String, InputError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(InputError::NotFound(path.display().to_string()));
        }
        Err(e) => return Err(InputError::Io(e)),
    };

    String::from_utf8(bytes).map_err(|_| InputError::Decode(path.display().to_string()))
}

/// Read the book and split it into overlapping chunks.
///
/// A missing or undecodable file degrades to an empty chunk list with a
/// warning; callers treat "no chunks" as nothing to do, not as a crash.
pub async fn read_book_chunks(path: &Path, config: ChunkerConfig) -> Vec<Chunk> {
    match read_book(path).await {
        Ok(text) => chunker::split(&text, config.chunk_size, config.overlap),
        Err(e) => {
            tracing::warn!("could not load source text: {e}");
            Vec::new()
        }
    }
}
