use schema::SchemaRegistry;

/// System prompt for the text-to-Cypher model, carrying the graph's closed
/// vocabulary and the querying strategies that work well on this dataset.
pub fn build_cypher_prompt(registry: &SchemaRegistry) -> String {
    let node_labels = registry.node_labels().collect::<Vec<_>>().join("`, `");
    let relationship_types = registry
        .relationship_types()
        .collect::<Vec<_>>()
        .join("`, `");

    format!(
        r#"You are an expert Neo4j Cypher query generator. Your task is to convert a user's question in natural language into a Cypher query.

**DATABASE SCHEMA:**
- **Node Labels:** `{node_labels}`
- **Relationship Types:** `{relationship_types}`
- **Node Properties:** All nodes have a `name` property.
- **Relationship Properties:** Relationships can have properties like `reason`, `year`, `note`, `type`, etc.

**CRITICAL INSTRUCTIONS:**
1.  You MUST use the provided Node Labels and Relationship Types.
2.  Match node names exactly or with `CONTAINS` on the `name` property.
3.  Return ONLY the Cypher query.

**QUERYING STRATEGIES & EXAMPLES:**
- **Complex Actions:** For "opposition" or "support," search for a LIST of related relationship types.
- **Relationship Properties:** For "why," "when," or "how," return the ENTIRE relationship object `r`. This is the most robust method."#
    )
}

/// Prompt asking the model to answer the original question from the rows the
/// Cypher query returned.
pub fn build_synthesis_prompt(question: &str, records_json: &str) -> String {
    format!(
        r#"You are an AI assistant. Your task is to answer a user's question based on the data provided.
Answer concisely in the same language as the original question.

Original Question: "{question}"

Data from Database (in JSON format):
{records_json}

Answer:"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cypher_prompt_carries_the_vocabulary() {
        let registry = SchemaRegistry::new();
        let prompt = build_cypher_prompt(&registry);
        assert!(prompt.contains("شخص"));
        assert!(prompt.contains("جانشین_شد"));
        assert!(prompt.contains("Cypher"));
    }

    #[test]
    fn synthesis_prompt_embeds_question_and_data() {
        let prompt = build_synthesis_prompt("چه کسی مخالفت کرد؟", r#"[{"name": "الف"}]"#);
        assert!(prompt.contains("چه کسی مخالفت کرد؟"));
        assert!(prompt.contains(r#"[{"name": "الف"}]"#));
    }
}
