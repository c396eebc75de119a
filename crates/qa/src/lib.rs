pub mod prompt;

use anyhow::{bail, Context, Result};
use neo4rs::{Graph, Query};
use serde_json::Value;

use extract::{strip_code_fences, ModelClient};
use schema::SchemaRegistry;

/// Natural-language QA over the populated graph.
///
/// Each question runs a three-step chain: generate Cypher from the schema
/// vocabulary, execute it, then synthesize an answer from the returned rows.
pub struct QaSession<'a, M: ModelClient> {
    model: &'a M,
    graph: &'a Graph,
    cypher_prompt: String,
}

#[derive(Debug)]
pub struct Answer {
    pub cypher: String,
    pub record_count: usize,
    pub text: String,
}

impl<'a, M: ModelClient> QaSession<'a, M> {
    pub fn new(model: &'a M, graph: &'a Graph, registry: &SchemaRegistry) -> Self {
        Self {
            model,
            graph,
            cypher_prompt: prompt::build_cypher_prompt(registry),
        }
    }

    pub async fn answer(&self, question: &str) -> Result<Answer> {
        let cypher = self.generate_cypher(question).await?;
        tracing::debug!(%cypher, "generated query");

        let records = self.execute(&cypher).await?;
        if records.is_empty() {
            return Ok(Answer {
                cypher,
                record_count: 0,
                text: "هیچ نتیجه‌ای در گراف یافت نشد.".to_string(),
            });
        }

        let records_json = serde_json::to_string_pretty(&records)?;
        let synthesis = self
            .model
            .generate(&prompt::build_synthesis_prompt(question, &records_json))
            .await
            .context("answer synthesis failed")?;

        Ok(Answer {
            cypher,
            record_count: records.len(),
            text: synthesis.text.trim().to_string(),
        })
    }

    async fn generate_cypher(&self, question: &str) -> Result<String> {
        let full_prompt = format!("{}\n**User Question:** \"{question}\"", self.cypher_prompt);
        let response = self
            .model
            .generate(&full_prompt)
            .await
            .context("Cypher generation failed")?;

        let cypher = strip_code_fences(&response.text);
        if cypher.is_empty() || cypher.contains("ERROR") {
            bail!("model could not produce a query for this question");
        }
        Ok(cypher)
    }

    async fn execute(&self, cypher: &str) -> Result<Vec<Value>> {
        let mut stream = self
            .graph
            .execute(Query::new(cypher.to_string()))
            .await
            .context("query execution failed")?;

        let mut records = Vec::new();
        while let Some(row) = stream.next().await? {
            records.push(row.to::<Value>().unwrap_or(Value::Null));
        }
        Ok(records)
    }
}
