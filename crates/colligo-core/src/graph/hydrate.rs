//! Batch hydration
//!
//! One identifier batch in, typed records out, with exactly one graph
//! round trip in between. Identifiers that resolve to nothing, or to
//! data that cannot satisfy a record's required fields, are skipped so
//! batch operations stay total.

use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

use crate::domain::EntityRecord;
use crate::error::Result;
use crate::graph::client::GraphSource;
use crate::graph::compact::compact;
use crate::graph::mapping::mapping_for;
use crate::graph::materializer::Materializer;
use crate::graph::query::QueryBuilder;
use crate::graph::resource::ResourceGraph;

/// The outcome of hydrating one identifier batch
#[derive(Debug)]
pub struct HydratedBatch<T> {
    /// Records in request order; skipped identifiers leave no hole
    pub records: Vec<T>,
    /// Display names seen anywhere in the response, keyed by identifier.
    /// Used to label facet values without extra round trips.
    pub labels: HashMap<String, String>,
}

impl<T> HydratedBatch<T> {
    fn empty() -> Self {
        Self {
            records: Vec::new(),
            labels: HashMap::new(),
        }
    }
}

/// Hydrate a batch of identifiers into typed records
///
/// Duplicate identifiers collapse to their first occurrence. An empty
/// batch never touches the graph store.
pub async fn hydrate_batch<T, G>(
    source: &G,
    ids: &[String],
    locale: &str,
) -> Result<HydratedBatch<T>>
where
    T: EntityRecord,
    G: GraphSource + ?Sized,
{
    let mut batch = HydratedBatch::empty();

    let mut unique: Vec<&str> = Vec::new();
    for id in ids {
        if !unique.contains(&id.as_str()) {
            unique.push(id);
        }
    }
    if unique.is_empty() {
        return Ok(batch);
    }

    let mapping = mapping_for(T::KIND);

    // 1. One bounded query for the whole batch
    let query = QueryBuilder::new(mapping)
        .with_locale(locale)
        .with_ids(unique.iter().copied())
        .build();

    // 2. Fetch and regroup the constructed triples
    let triples = source.construct(&query).await?;
    let graph = ResourceGraph::from_triples(&triples);
    debug!(
        requested = unique.len(),
        resources = graph.len(),
        "built resource graph"
    );

    // 3. Materialize, compact and type each requested entity
    let materializer = Materializer::new(&graph, mapping).with_locale(locale);
    for id in unique {
        let Some(tree) = materializer.record(id) else {
            debug!(entity_id = %id, "no entity in graph response, skipping");
            continue;
        };
        let Some(tree) = compact(tree) else {
            continue;
        };
        harvest_labels(&tree, &mut batch.labels);
        match serde_json::from_value::<T>(tree) {
            Ok(record) => batch.records.push(record),
            Err(e) => {
                debug!(entity_id = %id, error = %e, "record missing required fields, skipping");
            }
        }
    }

    Ok(batch)
}

/// Collect `{id, name}` pairs from anywhere in a record tree
fn harvest_labels(value: &Value, labels: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            if let (Some(Value::String(id)), Some(Value::String(name))) =
                (map.get("id"), map.get("name"))
            {
                labels.entry(id.clone()).or_insert_with(|| name.clone());
            }
            for member in map.values() {
                harvest_labels(member, labels);
            }
        }
        Value::Array(members) => {
            for member in members {
                harvest_labels(member, labels);
            }
        }
        _ => {}
    }
}
