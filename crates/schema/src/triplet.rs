use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One extracted `(head, relation, tail)` fact.
///
/// The label and property fields are optional extensions: early extraction
/// runs produced bare triplets, later ones annotate entity labels and
/// relationship properties. Both forms round-trip through the graph document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triplet {
    pub head: String,
    pub relation: String,
    pub tail: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tail_label: Option<String>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub properties: Map<String, Value>,
}

impl Triplet {
    pub fn new(
        head: impl Into<String>,
        relation: impl Into<String>,
        tail: impl Into<String>,
    ) -> Self {
        Self {
            head: head.into(),
            relation: relation.into(),
            tail: tail.into(),
            head_label: None,
            tail_label: None,
            properties: Map::new(),
        }
    }

    /// Flatten the property map to Bolt-safe scalars.
    ///
    /// Scalar values pass through unchanged; a list or nested object value is
    /// encoded as its JSON string, since the graph store only accepts flat
    /// property values.
    pub fn flatten_properties(&self) -> Map<String, Value> {
        self.properties
            .iter()
            .map(|(key, value)| {
                let flat = match value {
                    Value::Array(_) | Value::Object(_) => Value::String(value.to_string()),
                    scalar => scalar.clone(),
                };
                (key.clone(), flat)
            })
            .collect()
    }
}
