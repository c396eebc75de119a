use std::collections::{BTreeMap, HashSet};

use anyhow::{Context, Result};
use neo4rs::{Graph, Query};
use serde_json::Value;

use schema::{NodeLabel, SchemaRegistry, Triplet};

/// Triplets merged per UNWIND round trip.
pub const BATCH_SIZE: usize = 1000;

/// Loads accumulated triplets into Neo4j with merge-on-name semantics, so
/// repeated loads never duplicate nodes or relationships.
pub struct Loader<'a> {
    graph: &'a Graph,
    registry: &'a SchemaRegistry,
    dedupe: bool,
}

#[derive(Debug, Default)]
pub struct LoadReport {
    pub merged: usize,
    pub skipped_unknown_relation: usize,
    pub deduplicated: usize,
}

/// One UNWIND batch: property-less triplets sharing a relationship type, and
/// therefore a registry label pair.
struct Batch<'t> {
    relation: &'t str,
    head_label: NodeLabel,
    tail_label: NodeLabel,
    triplets: Vec<&'t Triplet>,
}

/// Work split computed before touching the database.
struct LoadPlan<'t> {
    batches: Vec<Batch<'t>>,
    singles: Vec<(&'t Triplet, NodeLabel, NodeLabel)>,
    skipped_unknown_relation: usize,
    deduplicated: usize,
}

impl<'a> Loader<'a> {
    pub fn new(graph: &'a Graph, registry: &'a SchemaRegistry) -> Self {
        Self {
            graph,
            registry,
            dedupe: false,
        }
    }

    /// Drop repeated `(head, relation, tail)` facts before loading. Off by
    /// default: MERGE already keeps the database free of duplicates, this
    /// only saves round trips.
    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }

    /// Ensure a uniqueness constraint on `name` for every node label.
    pub async fn init_constraints(&self) -> Result<()> {
        for label in NodeLabel::ALL {
            let cypher = format!(
                "CREATE CONSTRAINT IF NOT EXISTS FOR (n:`{}`) REQUIRE n.name IS UNIQUE",
                label.as_str()
            );
            self.graph
                .run(Query::new(cypher))
                .await
                .with_context(|| format!("failed to create constraint for {}", label.as_str()))?;
        }
        Ok(())
    }

    /// Merge a sequence of triplets into the database.
    ///
    /// Property-less triplets are grouped by relationship type and merged in
    /// `UNWIND` batches of [`BATCH_SIZE`]; triplets carrying properties need
    /// per-record SET clauses and go one by one. Triplets whose relation is
    /// outside the registry are skipped and counted, never fatal.
    pub async fn load(&self, triplets: &[Triplet]) -> Result<LoadReport> {
        let plan = plan_load(self.registry, triplets, self.dedupe);
        let mut report = LoadReport {
            merged: 0,
            skipped_unknown_relation: plan.skipped_unknown_relation,
            deduplicated: plan.deduplicated,
        };

        for batch in &plan.batches {
            self.merge_batch(batch).await.with_context(|| {
                format!("failed to merge batch of {} for {}", batch.triplets.len(), batch.relation)
            })?;
            report.merged += batch.triplets.len();
        }

        for (triplet, head_label, tail_label) in &plan.singles {
            self.merge_triplet(triplet, *head_label, *tail_label)
                .await
                .with_context(|| {
                    format!("failed to merge ({} {} {})", triplet.head, triplet.relation, triplet.tail)
                })?;
            report.merged += 1;
        }

        Ok(report)
    }

    async fn merge_batch(&self, batch: &Batch<'_>) -> Result<()> {
        let heads: Vec<String> = batch.triplets.iter().map(|t| t.head.clone()).collect();
        let tails: Vec<String> = batch.triplets.iter().map(|t| t.tail.clone()).collect();

        let cypher = build_batch_cypher(batch.head_label, batch.relation, batch.tail_label);
        let query = Query::new(cypher).param("heads", heads).param("tails", tails);

        self.graph.run(query).await?;
        Ok(())
    }

    async fn merge_triplet(
        &self,
        triplet: &Triplet,
        head_label: NodeLabel,
        tail_label: NodeLabel,
    ) -> Result<()> {
        let properties = triplet.flatten_properties();
        let cypher = build_merge_cypher(head_label, &triplet.relation, tail_label, &properties);

        let mut query = Query::new(cypher)
            .param("head", triplet.head.clone())
            .param("tail", triplet.tail.clone());

        for (i, (_, value)) in properties.iter().enumerate() {
            let name = format!("p{i}");
            query = match value {
                Value::Bool(b) => query.param(name.as_str(), *b),
                Value::Number(n) if n.is_i64() => query.param(name.as_str(), n.as_i64().unwrap()),
                Value::Number(n) => query.param(name.as_str(), n.as_f64().unwrap_or(0.0)),
                Value::String(s) => query.param(name.as_str(), s.clone()),
                other => query.param(name.as_str(), other.to_string()),
            };
        }

        self.graph.run(query).await?;
        Ok(())
    }
}

/// Split the input into per-relation UNWIND batches and property-carrying
/// singles, applying dedup and unknown-relation skipping up front.
fn plan_load<'t>(registry: &SchemaRegistry, triplets: &'t [Triplet], dedupe: bool) -> LoadPlan<'t> {
    let mut groups: BTreeMap<&'t str, Vec<&'t Triplet>> = BTreeMap::new();
    let mut singles = Vec::new();
    let mut skipped_unknown_relation = 0;
    let mut deduplicated = 0;
    let mut seen = HashSet::new();

    for triplet in triplets {
        if dedupe {
            let key = (
                triplet.head.as_str(),
                triplet.relation.as_str(),
                triplet.tail.as_str(),
            );
            if !seen.insert(key) {
                deduplicated += 1;
                continue;
            }
        }

        let Some((head_label, tail_label)) = registry.label_pair(&triplet.relation) else {
            tracing::warn!(relation = %triplet.relation, "skipping triplet with unknown relation");
            skipped_unknown_relation += 1;
            continue;
        };

        if triplet.properties.is_empty() {
            groups.entry(triplet.relation.as_str()).or_default().push(triplet);
        } else {
            singles.push((triplet, head_label, tail_label));
        }
    }

    let mut batches = Vec::new();
    for (relation, group) in groups {
        // label_pair succeeded for every member of the group
        let (head_label, tail_label) = registry.label_pair(relation).unwrap();
        for chunk in group.chunks(BATCH_SIZE) {
            batches.push(Batch {
                relation,
                head_label,
                tail_label,
                triplets: chunk.to_vec(),
            });
        }
    }

    LoadPlan {
        batches,
        singles,
        skipped_unknown_relation,
        deduplicated,
    }
}

/// Build the UNWIND statement for one per-relation batch.
///
/// Head and tail names ride in as parallel list parameters; labels and the
/// relationship type are interpolated, not parameterized, because Cypher
/// cannot parameterize them and they only ever come from the closed registry.
fn build_batch_cypher(head_label: NodeLabel, relation: &str, tail_label: NodeLabel) -> String {
    format!(
        "UNWIND range(0, size($heads) - 1) AS i \
         MERGE (h:`{}` {{name: $heads[i]}}) \
         MERGE (t:`{}` {{name: $tails[i]}}) \
         MERGE (h)-[r:`{}`]->(t)",
        head_label.as_str(),
        tail_label.as_str(),
        relation,
    )
}

/// Build the MERGE statement for one property-carrying triplet.
///
/// Property keys come from model output, so keys that are not plain
/// identifiers are dropped.
fn build_merge_cypher(
    head_label: NodeLabel,
    relation: &str,
    tail_label: NodeLabel,
    properties: &serde_json::Map<String, Value>,
) -> String {
    let mut cypher = format!(
        "MERGE (h:`{}` {{name: $head}}) MERGE (t:`{}` {{name: $tail}}) MERGE (h)-[r:`{}`]->(t)",
        head_label.as_str(),
        tail_label.as_str(),
        relation,
    );

    for (i, (key, _)) in properties.iter().enumerate() {
        if !is_safe_property_key(key) {
            tracing::warn!(key = %key, "dropping property with unsafe key");
            continue;
        }
        cypher.push_str(&format!(" SET r.`{key}` = $p{i}"));
    }

    cypher
}

fn is_safe_property_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn triplet(head: &str, relation: &str, tail: &str) -> Triplet {
        Triplet::new(head, relation, tail)
    }

    #[test]
    fn plan_groups_property_less_triplets_by_relation() {
        let registry = SchemaRegistry::new();
        let triplets = vec![
            triplet("الف", "حمایت_کرد_از", "ب"),
            triplet("ج", "جانشین_شد", "د"),
            triplet("ه", "حمایت_کرد_از", "و"),
        ];

        let plan = plan_load(&registry, &triplets, false);

        assert_eq!(plan.batches.len(), 2);
        assert!(plan.singles.is_empty());
        let supported = plan
            .batches
            .iter()
            .find(|b| b.relation == "حمایت_کرد_از")
            .unwrap();
        assert_eq!(supported.triplets.len(), 2);
    }

    #[test]
    fn plan_splits_oversized_groups_at_batch_size() {
        let registry = SchemaRegistry::new();
        let triplets: Vec<Triplet> = (0..BATCH_SIZE + 1)
            .map(|i| triplet(&format!("شخص{i}"), "جانشین_شد", "دیگری"))
            .collect();

        let plan = plan_load(&registry, &triplets, false);

        assert_eq!(plan.batches.len(), 2);
        assert_eq!(plan.batches[0].triplets.len(), BATCH_SIZE);
        assert_eq!(plan.batches[1].triplets.len(), 1);
    }

    #[test]
    fn plan_routes_property_triplets_to_singles() {
        let registry = SchemaRegistry::new();
        let mut with_props = triplet("الف", "حمایت_کرد_از", "ب");
        with_props.properties.insert("سال".into(), json!(1357));
        let triplets = vec![with_props, triplet("ج", "حمایت_کرد_از", "د")];

        let plan = plan_load(&registry, &triplets, false);

        assert_eq!(plan.singles.len(), 1);
        assert_eq!(plan.batches.len(), 1);
        assert_eq!(plan.batches[0].triplets.len(), 1);
    }

    #[test]
    fn plan_counts_unknown_relations_and_duplicates() {
        let registry = SchemaRegistry::new();
        let triplets = vec![
            triplet("الف", "حمایت_کرد_از", "ب"),
            triplet("الف", "حمایت_کرد_از", "ب"),
            triplet("ج", "رابطه_جعلی", "د"),
        ];

        let plan = plan_load(&registry, &triplets, true);

        assert_eq!(plan.deduplicated, 1);
        assert_eq!(plan.skipped_unknown_relation, 1);
        assert_eq!(plan.batches.len(), 1);
        assert_eq!(plan.batches[0].triplets.len(), 1);
    }

    #[test]
    fn batch_cypher_unwinds_parallel_name_lists() {
        let cypher = build_batch_cypher(NodeLabel::Person, "متولد_شد_در", NodeLabel::Location);
        assert!(cypher.starts_with("UNWIND range(0, size($heads) - 1) AS i"));
        assert!(cypher.contains("MERGE (h:`شخص` {name: $heads[i]})"));
        assert!(cypher.contains("MERGE (t:`مکان` {name: $tails[i]})"));
        assert!(cypher.contains("[r:`متولد_شد_در`]"));
    }

    #[test]
    fn merge_cypher_uses_registry_labels() {
        let cypher = build_merge_cypher(
            NodeLabel::Person,
            "متولد_شد_در",
            NodeLabel::Location,
            &Map::new(),
        );
        assert!(cypher.contains("MERGE (h:`شخص` {name: $head})"));
        assert!(cypher.contains("MERGE (t:`مکان` {name: $tail})"));
        assert!(cypher.contains("[r:`متولد_شد_در`]"));
    }

    #[test]
    fn safe_property_keys_become_set_clauses() {
        let mut props = Map::new();
        props.insert("سال".into(), json!(1357));
        let cypher =
            build_merge_cypher(NodeLabel::Person, "حمایت_کرد_از", NodeLabel::Concept, &props);
        assert!(cypher.contains("SET r.`سال` = $p0"));
    }

    #[test]
    fn unsafe_property_keys_are_dropped() {
        let mut props = Map::new();
        props.insert("bad`key".into(), json!("x"));
        props.insert("note".into(), json!("y"));
        let cypher =
            build_merge_cypher(NodeLabel::Person, "حمایت_کرد_از", NodeLabel::Concept, &props);
        assert!(!cypher.contains("bad`key"));
        assert!(cypher.contains("SET r.`note` = $p1"));
    }

    #[test]
    fn farsi_keys_count_as_identifiers() {
        assert!(is_safe_property_key("سال_وقوع"));
        assert!(is_safe_property_key("year"));
        assert!(!is_safe_property_key(""));
        assert!(!is_safe_property_key("a b"));
        assert!(!is_safe_property_key("x`y"));
    }
}
