use crate::error::ExtractError;

/// Text and token accounting from one model call. Token counts are zero when
/// the backend reports no usage metadata.
#[derive(Debug, Clone, Default)]
pub struct ModelResponse {
    pub text: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// The model-access collaborator: prompt in, response text out.
///
/// The engine is generic over this trait so tests can run against a frozen
/// in-memory model instead of the network.
pub trait ModelClient {
    async fn generate(&self, prompt: &str) -> Result<ModelResponse, ExtractError>;
}
