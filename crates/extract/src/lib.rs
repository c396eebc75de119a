pub mod client;
pub mod error;
pub mod gemini;
pub mod parse;
pub mod prompt;

pub use client::{ModelClient, ModelResponse};
pub use error::ExtractError;
pub use gemini::GeminiClient;
pub use prompt::strip_code_fences;

use ingest::Chunk;
use schema::{SchemaRegistry, Triplet};

pub const DEFAULT_REPAIR_ATTEMPTS: usize = 2;

/// Token totals accumulated across a batch, for observability only.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    fn add(&mut self, response: &ModelResponse) {
        self.input_tokens += response.input_tokens;
        self.output_tokens += response.output_tokens;
    }
}

/// Result of one engine run over a batch of pending chunks.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub new_triplets: Vec<Triplet>,
    pub succeeded: Vec<usize>,
    pub failed: Vec<usize>,
    pub usage: TokenUsage,
}

/// The extraction engine: one model call per pending chunk, schema-validated
/// parsing, and success/failure classification.
///
/// The engine has no persistence side effects; the caller reconciles the
/// outcome into the progress store and graph document after the batch.
pub struct Extractor<'a, M: ModelClient> {
    model: &'a M,
    registry: &'a SchemaRegistry,
    max_repair_attempts: usize,
}

impl<'a, M: ModelClient> Extractor<'a, M> {
    pub fn new(model: &'a M, registry: &'a SchemaRegistry) -> Self {
        Self {
            model,
            registry,
            max_repair_attempts: DEFAULT_REPAIR_ATTEMPTS,
        }
    }

    pub fn with_repair_attempts(mut self, attempts: usize) -> Self {
        self.max_repair_attempts = attempts;
        self
    }

    /// Process pending chunks in ascending index order.
    ///
    /// Every per-chunk failure (transport, decode, shape) is caught and
    /// recorded as a failed index; a single bad chunk never aborts the batch.
    pub async fn process(&self, pending: &[Chunk]) -> BatchOutcome {
        let instructions = self.registry.render_instructions();
        let mut outcome = BatchOutcome::default();

        for chunk in pending {
            let prompt = prompt::build_extraction_prompt(&instructions, &chunk.text);

            match self.generate_graph(&prompt, &mut outcome.usage).await {
                Ok(records) => {
                    let mut accepted = 0;
                    for record in records {
                        if self.registry.validate(&record) {
                            outcome.new_triplets.push(record);
                            accepted += 1;
                        } else {
                            tracing::warn!(
                                chunk = chunk.index,
                                relation = %record.relation,
                                "rejecting record outside the schema"
                            );
                        }
                    }
                    tracing::info!(chunk = chunk.index, triplets = accepted, "chunk extracted");
                    outcome.succeeded.push(chunk.index);
                }
                Err(e) => {
                    tracing::warn!(chunk = chunk.index, "chunk failed: {e}");
                    outcome.failed.push(chunk.index);
                }
            }
        }

        outcome
    }

    /// Bounded-retry wrapper around the raw model call for structured output.
    ///
    /// Attempts a parse; on failure issues at most `max_repair_attempts`
    /// corrective re-prompts carrying the parse error text, then gives up.
    /// Token usage from every attempt, including failed ones, is accumulated.
    async fn generate_graph(
        &self,
        prompt: &str,
        usage: &mut TokenUsage,
    ) -> Result<Vec<Triplet>, ExtractError> {
        let mut next_prompt = prompt.to_string();
        let mut last_error = String::new();

        for attempt in 0..=self.max_repair_attempts {
            let response = self.model.generate(&next_prompt).await?;
            usage.add(&response);

            let stripped = prompt::strip_code_fences(&response.text);
            match parse::parse_graph(&stripped) {
                Ok(records) => return Ok(records),
                Err(e) => {
                    last_error = e.to_string();
                    if attempt < self.max_repair_attempts {
                        tracing::debug!("parse failed ({last_error}), issuing repair prompt");
                        next_prompt = prompt::build_repair_prompt(&response.text, &last_error);
                    }
                }
            }
        }

        Err(ExtractError::RepairExhausted {
            attempts: self.max_repair_attempts + 1,
            last_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    /// Frozen model: the same response for every call.
    struct FixedModel {
        text: String,
        calls: Cell<usize>,
    }

    impl FixedModel {
        fn new(text: &str) -> Self {
            Self {
                text: text.to_string(),
                calls: Cell::new(0),
            }
        }
    }

    impl ModelClient for FixedModel {
        async fn generate(&self, _prompt: &str) -> Result<ModelResponse, ExtractError> {
            self.calls.set(self.calls.get() + 1);
            Ok(ModelResponse {
                text: self.text.clone(),
                input_tokens: 100,
                output_tokens: 20,
            })
        }
    }

    /// Scripted model: replays a queue of responses, then errors.
    struct ScriptedModel {
        responses: RefCell<VecDeque<Result<String, ExtractError>>>,
    }

    impl ScriptedModel {
        fn new(responses: Vec<Result<String, ExtractError>>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
            }
        }
    }

    impl ModelClient for ScriptedModel {
        async fn generate(&self, _prompt: &str) -> Result<ModelResponse, ExtractError> {
            match self.responses.borrow_mut().pop_front() {
                Some(Ok(text)) => Ok(ModelResponse {
                    text,
                    input_tokens: 10,
                    output_tokens: 5,
                }),
                Some(Err(e)) => Err(e),
                None => Err(ExtractError::EmptyResponse),
            }
        }
    }

    fn chunks(n: usize) -> Vec<Chunk> {
        (0..n)
            .map(|i| Chunk::new(i, format!("متن بخش {i}")))
            .collect()
    }

    const VALID_RESPONSE: &str =
        r#"{"graph": [{"head": "داریوش بزرگ", "relation": "جانشین_شد", "tail": "کمبوجیه دوم"}]}"#;

    #[tokio::test]
    async fn successful_batch_accumulates_triplets_and_usage() {
        let registry = SchemaRegistry::new();
        let model = FixedModel::new(VALID_RESPONSE);
        let engine = Extractor::new(&model, &registry);

        let outcome = engine.process(&chunks(3)).await;

        assert_eq!(outcome.succeeded, vec![0, 1, 2]);
        assert!(outcome.failed.is_empty());
        assert_eq!(outcome.new_triplets.len(), 3);
        assert_eq!(outcome.usage.input_tokens, 300);
        assert_eq!(outcome.usage.output_tokens, 60);
    }

    #[tokio::test]
    async fn fenced_response_is_stripped_before_parsing() {
        let registry = SchemaRegistry::new();
        let fenced = format!("```json\n{VALID_RESPONSE}\n```");
        let model = FixedModel::new(&fenced);
        let engine = Extractor::new(&model, &registry);

        let outcome = engine.process(&chunks(1)).await;
        assert_eq!(outcome.succeeded, vec![0]);
        assert_eq!(model.calls.get(), 1);
    }

    #[tokio::test]
    async fn non_json_response_fails_chunk_after_bounded_repairs() {
        let registry = SchemaRegistry::new();
        let model = FixedModel::new("متاسفانه خروجی JSON ندارم");
        let engine = Extractor::new(&model, &registry).with_repair_attempts(2);

        let outcome = engine.process(&chunks(1)).await;

        assert_eq!(outcome.failed, vec![0]);
        assert!(outcome.succeeded.is_empty());
        assert!(outcome.new_triplets.is_empty());
        // One initial attempt plus two repairs.
        assert_eq!(model.calls.get(), 3);
    }

    #[tokio::test]
    async fn missing_graph_key_fails_the_chunk() {
        let registry = SchemaRegistry::new();
        let model = FixedModel::new(r#"{"entities": []}"#);
        let engine = Extractor::new(&model, &registry).with_repair_attempts(0);

        let outcome = engine.process(&chunks(1)).await;
        assert_eq!(outcome.failed, vec![0]);
        assert!(outcome.new_triplets.is_empty());
    }

    #[tokio::test]
    async fn repair_prompt_recovers_a_parsable_response() {
        let registry = SchemaRegistry::new();
        let model = ScriptedModel::new(vec![
            Ok("this is not json".to_string()),
            Ok(VALID_RESPONSE.to_string()),
        ]);
        let engine = Extractor::new(&model, &registry).with_repair_attempts(2);

        let outcome = engine.process(&chunks(1)).await;

        assert_eq!(outcome.succeeded, vec![0]);
        assert_eq!(outcome.new_triplets.len(), 1);
        // Both attempts count toward the token totals.
        assert_eq!(outcome.usage.input_tokens, 20);
    }

    #[tokio::test]
    async fn out_of_schema_records_are_rejected_without_failing_the_chunk() {
        let registry = SchemaRegistry::new();
        let model = FixedModel::new(
            r#"{"graph": [
                {"head": "الف", "relation": "حمایت_کرد_از", "tail": "ب"},
                {"head": "ج", "relation": "رابطه_جعلی", "tail": "د"}
            ]}"#,
        );
        let engine = Extractor::new(&model, &registry);

        let outcome = engine.process(&chunks(1)).await;

        assert_eq!(outcome.succeeded, vec![0]);
        assert_eq!(outcome.new_triplets.len(), 1);
        assert_eq!(outcome.new_triplets[0].relation, "حمایت_کرد_از");
    }

    #[tokio::test]
    async fn empty_graph_counts_as_success() {
        let registry = SchemaRegistry::new();
        let model = FixedModel::new(r#"{"graph": []}"#);
        let engine = Extractor::new(&model, &registry);

        let outcome = engine.process(&chunks(1)).await;
        assert_eq!(outcome.succeeded, vec![0]);
        assert!(outcome.new_triplets.is_empty());
    }

    #[tokio::test]
    async fn one_failing_chunk_never_aborts_the_batch() {
        let registry = SchemaRegistry::new();
        let model = ScriptedModel::new(vec![
            Err(ExtractError::Api(reqwest::StatusCode::INTERNAL_SERVER_ERROR)),
            Ok(VALID_RESPONSE.to_string()),
        ]);
        let engine = Extractor::new(&model, &registry).with_repair_attempts(0);

        let outcome = engine.process(&chunks(2)).await;

        assert_eq!(outcome.failed, vec![0]);
        assert_eq!(outcome.succeeded, vec![1]);
        assert_eq!(outcome.new_triplets.len(), 1);
    }

    #[tokio::test]
    async fn frozen_model_makes_runs_deterministic() {
        let registry = SchemaRegistry::new();
        let model = FixedModel::new(VALID_RESPONSE);
        let engine = Extractor::new(&model, &registry);
        let batch = chunks(2);

        let first = engine.process(&batch).await;
        let second = engine.process(&batch).await;

        assert_eq!(first.succeeded, second.succeeded);
        assert_eq!(first.new_triplets, second.new_triplets);
    }
}
