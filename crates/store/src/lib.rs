pub mod graph;
pub mod progress;

pub use graph::{load_graph, save_graph};
pub use progress::ProgressState;

use thiserror::Error;

/// Failure to persist the progress or graph document.
///
/// Load-side corruption never surfaces as an error; both documents degrade to
/// an empty default when unreadable. Save-side failures are reported to the
/// operator so the in-memory results can be re-saved instead of lost.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Full rewrite through a sibling temp file and rename, so a crash mid-write
/// leaves the previous document intact.
pub(crate) fn write_atomic(path: &std::path::Path, contents: &str) -> Result<(), StoreError> {
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
