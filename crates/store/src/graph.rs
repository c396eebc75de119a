use std::path::Path;

use serde::{Deserialize, Serialize};

use schema::Triplet;

use crate::{write_atomic, StoreError};

/// On-disk shape of the accumulated graph: one object wrapping the ordered
/// triplet sequence under a fixed key.
#[derive(Serialize, Deserialize)]
struct GraphDocument {
    graph: Vec<Triplet>,
}

/// Load every triplet extracted so far, in extraction order.
///
/// Accepts the wrapped `{"graph": [...]}` form and, for read compatibility,
/// legacy documents that store the bare array. Missing or corrupt documents
/// degrade to an empty sequence.
pub fn load_graph(path: &Path) -> Vec<Triplet> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            tracing::warn!("could not read graph document: {e}; starting empty");
            return Vec::new();
        }
    };

    if let Ok(doc) = serde_json::from_str::<GraphDocument>(&raw) {
        return doc.graph;
    }
    if let Ok(bare) = serde_json::from_str::<Vec<Triplet>>(&raw) {
        return bare;
    }

    tracing::warn!("could not parse graph document; starting empty");
    Vec::new()
}

/// Full rewrite of the graph document in the wrapped form.
///
/// The sequence is append-only across runs and never deduplicated here; the
/// database load relies on MERGE semantics for that.
pub fn save_graph(path: &Path, triplets: &[Triplet]) -> Result<(), StoreError> {
    let doc = GraphDocument {
        graph: triplets.to_vec(),
    };
    write_atomic(path, &serde_json::to_string_pretty(&doc)?)
}
