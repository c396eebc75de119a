/// Full extraction prompt: schema instructions followed by the chunk text.
pub fn build_extraction_prompt(instructions: &str, chunk_text: &str) -> String {
    format!("{instructions}\n\n**متن ورودی برای تحلیل:**\n\n---\n{chunk_text}\n---")
}

/// Corrective re-prompt carrying the parse error, used by the bounded repair
/// loop when a response fails to parse as the expected JSON shape.
pub fn build_repair_prompt(invalid_response: &str, parse_error: &str) -> String {
    format!(
        r#"The following response could not be parsed ({parse_error}):

{invalid_response}

Return the same content as a single valid JSON object with exactly one key named "graph" whose value is an array of objects with "head", "relation" and "tail" keys. Output only the raw JSON object: no markdown, no code fences, no explanations."#
    )
}

/// Strip Markdown code-fence wrappers from a model response, if present.
pub fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();

    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```cypher"))
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let without_close = without_open.strip_suffix("```").unwrap_or(without_open);

    without_close.trim().to_string()
}
