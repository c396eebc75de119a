use thiserror::Error;

/// Per-chunk extraction failures.
///
/// Every variant is recoverable at the batch level: the engine converts it
/// into a failed chunk index and moves on.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("model transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model API returned status {0}")]
    Api(reqwest::StatusCode),

    #[error("model returned no candidates")]
    EmptyResponse,

    #[error("response was not valid JSON: {0}")]
    Decode(String),

    #[error("response JSON did not contain a `graph` array")]
    MalformedGraph,

    #[error("gave up after {attempts} parse attempts: {last_error}")]
    RepairExhausted { attempts: usize, last_error: String },
}
