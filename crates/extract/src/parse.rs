use schema::Triplet;
use serde_json::Value;

use crate::error::ExtractError;

/// Parse a (fence-stripped) model response into triplet records.
///
/// The contract is strict at the top level: the text must be a JSON object
/// with a `graph` key holding an array, or the whole chunk fails. Individual
/// array entries that are not valid records are dropped with a warning
/// rather than failing the chunk; the registry check happens later in the
/// engine.
pub fn parse_graph(text: &str) -> Result<Vec<Triplet>, ExtractError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ExtractError::Decode(e.to_string()))?;

    let items = value
        .as_object()
        .and_then(|obj| obj.get("graph"))
        .and_then(|graph| graph.as_array())
        .ok_or(ExtractError::MalformedGraph)?;

    let mut records = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<Triplet>(item.clone()) {
            Ok(triplet) => records.push(triplet),
            Err(e) => tracing::warn!("dropping malformed record: {e}"),
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_response_parses() {
        let records = parse_graph(
            r#"{"graph": [{"head": "کوروش بزرگ", "relation": "حکومت_کرد_در", "tail": "ایران"}]}"#,
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tail, "ایران");
    }

    #[test]
    fn empty_graph_is_a_valid_response() {
        assert!(parse_graph(r#"{"graph": []}"#).unwrap().is_empty());
    }

    #[test]
    fn non_json_text_is_a_decode_error() {
        assert!(matches!(
            parse_graph("در این متن رابطه‌ای یافت نشد"),
            Err(ExtractError::Decode(_))
        ));
    }

    #[test]
    fn missing_graph_key_is_malformed() {
        assert!(matches!(
            parse_graph(r#"{"triplets": []}"#),
            Err(ExtractError::MalformedGraph)
        ));
    }

    #[test]
    fn graph_key_must_hold_an_array() {
        assert!(matches!(
            parse_graph(r#"{"graph": "none"}"#),
            Err(ExtractError::MalformedGraph)
        ));
    }

    #[test]
    fn records_missing_required_keys_are_dropped() {
        let records = parse_graph(
            r#"{"graph": [
                {"head": "الف", "relation": "حمایت_کرد_از", "tail": "ب"},
                {"head": "ج", "relation": "حمایت_کرد_از"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(records.len(), 1);
    }
}
