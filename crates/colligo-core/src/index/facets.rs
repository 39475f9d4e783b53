//! Facet assembly
//!
//! Turns raw aggregation buckets into the caller-facing filter lists.
//! Bucket delivery order is preserved and nothing is fabricated: a
//! facet the engine did not answer for is simply absent. Labels come
//! from an identifier-to-name map harvested from hydrated records;
//! misses fall back to the raw key.

use std::collections::{BTreeMap, HashMap};

use crate::domain::{EntityKind, SearchResultFilter};
use crate::graph::mapping::facets_for;
use crate::index::types::Aggregate;

/// Assemble the filter lists for one search response
pub fn assemble_filters(
    kind: EntityKind,
    aggregations: &BTreeMap<String, Aggregate>,
    labels: &HashMap<String, String>,
) -> BTreeMap<String, Vec<SearchResultFilter>> {
    let mut filters = BTreeMap::new();

    for facet in facets_for(kind) {
        let Some(aggregate) = aggregations.get(facet.name) else {
            continue;
        };
        let values: Vec<SearchResultFilter> = aggregate
            .buckets
            .iter()
            .map(|bucket| {
                let name = labels.get(&bucket.key).map_or(&bucket.key, |label| label);
                SearchResultFilter::new(&bucket.key, bucket.doc_count).with_name(name)
            })
            .collect();
        filters.insert(facet.name.to_string(), values);
    }

    filters
}
