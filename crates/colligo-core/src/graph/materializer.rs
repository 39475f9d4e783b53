//! Table-driven entity materialization
//!
//! Walks a kind's property mapping over the resource graph and builds
//! one record tree per entity. The materializer only collects what the
//! graph holds; deciding what to omit is the compaction pass's job.
//! Multi-step paths were already collapsed to their head predicate by
//! the CONSTRUCT template, so every rule reads at `path[0]`.

use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::CalendarDate;
use crate::graph::mapping::{FieldKind, PropertyMapping, PropertyRule};
use crate::graph::resource::{Resource, ResourceGraph};
use crate::graph::triples::Term;
use crate::graph::vocab;

/// Materializes record trees for one entity kind from one response
#[derive(Debug)]
pub struct Materializer<'a> {
    graph: &'a ResourceGraph,
    mapping: &'static PropertyMapping,
    locale: &'a str,
}

impl<'a> Materializer<'a> {
    pub fn new(graph: &'a ResourceGraph, mapping: &'static PropertyMapping) -> Self {
        Self {
            graph,
            mapping,
            locale: "en",
        }
    }

    /// Set the locale used for display literal preference
    pub fn with_locale(mut self, locale: &'a str) -> Self {
        self.locale = locale;
        self
    }

    /// Build the record tree for one entity, or `None` when the graph
    /// holds no resource of the mapping's class under this identifier
    pub fn record(&self, id: &str) -> Option<Value> {
        let resource = self.graph.resource(id)?;
        if !resource.has_type(self.mapping.class) {
            return None;
        }

        let mut record = Map::new();
        record.insert("id".to_string(), Value::String(id.to_string()));
        for rule in self.mapping.rules {
            if let Some(value) = self.field_value(resource, rule) {
                record.insert(rule.field.to_string(), value);
            }
        }
        Some(Value::Object(record))
    }

    fn field_value(&self, resource: &Resource, rule: &PropertyRule) -> Option<Value> {
        let predicate = rule.path[0];
        match rule.kind {
            FieldKind::Scalar => self.scalar(resource, rule, predicate),
            FieldKind::ScalarList => {
                let values: Vec<Value> = resource
                    .values(predicate)
                    .iter()
                    .filter_map(term_scalar)
                    .collect();
                if values.is_empty() {
                    None
                } else {
                    Some(Value::Array(values))
                }
            }
            FieldKind::Thing => {
                let term = self.single_node(resource, rule, predicate)?;
                self.thing_value(term)
            }
            FieldKind::ThingList => {
                let things: Vec<Value> = resource
                    .values(predicate)
                    .iter()
                    .filter_map(|term| self.thing_value(term))
                    .collect();
                if things.is_empty() {
                    None
                } else {
                    Some(Value::Array(things))
                }
            }
            FieldKind::Date => {
                let lexical = self.scalar(resource, rule, predicate)?;
                let lexical = lexical.as_str()?;
                Some(Value::String(CalendarDate::parse(lexical).to_string()))
            }
            FieldKind::Measurements => self.measurements(resource, predicate),
        }
    }

    /// First value of a single-valued rule, logging what gets discarded
    fn scalar(&self, resource: &Resource, rule: &PropertyRule, predicate: &str) -> Option<Value> {
        let values = resource.values(predicate);
        if values.is_empty() {
            return None;
        }
        if values.len() > 1 {
            debug!(
                field = rule.field,
                discarded = values.len() - 1,
                "multiple values for single-valued field, keeping first"
            );
        }
        if rule.language_tagged {
            resource
                .preferred_literal(predicate, self.locale)
                .map(|lit| Value::String(lit.lexical.clone()))
        } else {
            term_scalar(&values[0])
        }
    }

    fn single_node<'r>(
        &self,
        resource: &'r Resource,
        rule: &PropertyRule,
        predicate: &str,
    ) -> Option<&'r Term> {
        let nodes: Vec<&Term> = resource
            .values(predicate)
            .iter()
            .filter(|term| !matches!(term, Term::Literal(_)))
            .collect();
        if nodes.len() > 1 {
            debug!(
                field = rule.field,
                discarded = nodes.len() - 1,
                "multiple values for single-valued field, keeping first"
            );
        }
        nodes.first().copied()
    }

    /// Shape a referenced resource as `{id, name?}`
    fn thing_value(&self, term: &Term) -> Option<Value> {
        let key = term.node_key()?;
        let mut thing = Map::new();
        thing.insert("id".to_string(), Value::String(key.clone()));
        if let Some(target) = self.graph.resource(&key) {
            if let Some(name) = target.preferred_literal(vocab::NAME, self.locale) {
                thing.insert("name".to_string(), Value::String(name.lexical.clone()));
            }
        }
        Some(Value::Object(thing))
    }

    /// Measurement sub-records, stable-sorted ascending by metric order
    fn measurements(&self, resource: &Resource, predicate: &str) -> Option<Value> {
        let mut items: Vec<(i64, Value)> = Vec::new();
        for term in resource.values(predicate) {
            if let Some(item) = self.measurement_value(term) {
                items.push(item);
            }
        }
        if items.is_empty() {
            return None;
        }
        items.sort_by_key(|(order, _)| *order);
        Some(Value::Array(items.into_iter().map(|(_, v)| v).collect()))
    }

    fn measurement_value(&self, term: &Term) -> Option<(i64, Value)> {
        let key = term.node_key()?;
        let node = self.graph.resource(&key)?;

        let value = node
            .literals(vocab::MEASUREMENT_VALUE)
            .next()
            .and_then(|lit| parse_boolean(&lit.lexical));
        let metric_key = node
            .first(vocab::MEASUREMENT_OF)
            .and_then(Term::node_key);
        let (Some(value), Some(metric_key)) = (value, metric_key) else {
            debug!(measurement = %key, "incomplete measurement, skipping");
            return None;
        };

        let metric_node = self.graph.resource(&metric_key)?;
        let Some(order) = metric_node
            .literals(vocab::ORDER)
            .next()
            .and_then(|lit| lit.lexical.parse::<i64>().ok())
        else {
            debug!(metric = %metric_key, "metric without order, skipping measurement");
            return None;
        };

        let mut metric = Map::new();
        metric.insert("id".to_string(), Value::String(metric_key.clone()));
        if let Some(name) = metric_node.preferred_literal(vocab::NAME, self.locale) {
            metric.insert("name".to_string(), Value::String(name.lexical.clone()));
        }
        metric.insert("order".to_string(), Value::Number(order.into()));

        let mut measurement = Map::new();
        measurement.insert("id".to_string(), Value::String(key));
        measurement.insert("value".to_string(), Value::Bool(value));
        measurement.insert("metric".to_string(), Value::Object(metric));

        Some((order, Value::Object(measurement)))
    }
}

/// A term's scalar form: a literal's lexical value, or an IRI reference
/// as its IRI string. Blank nodes have no scalar form.
fn term_scalar(term: &Term) -> Option<Value> {
    match term {
        Term::Literal(lit) => Some(Value::String(lit.lexical.clone())),
        Term::Iri(iri) => Some(Value::String(iri.clone())),
        Term::Blank(_) => None,
    }
}

/// xsd:boolean lexical space
fn parse_boolean(lexical: &str) -> Option<bool> {
    match lexical {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntityKind;
    use crate::graph::mapping::mapping_for;
    use crate::graph::triples::{Literal, Triple};
    use serde_json::json;

    fn iri(s: &str) -> Term {
        Term::Iri(s.to_string())
    }

    fn blank(s: &str) -> Term {
        Term::Blank(s.to_string())
    }

    fn plain(s: &str) -> Term {
        Term::Literal(Literal {
            lexical: s.to_string(),
            language: None,
            datatype: None,
        })
    }

    fn tagged(s: &str, lang: &str) -> Term {
        Term::Literal(Literal {
            lexical: s.to_string(),
            language: Some(lang.to_string()),
            datatype: None,
        })
    }

    fn triple(subject: Term, predicate: &str, object: Term) -> Triple {
        Triple {
            subject,
            predicate: predicate.to_string(),
            object,
        }
    }

    const DATASET_ID: &str = "https://example.org/dataset/1";

    fn dataset_triples() -> Vec<Triple> {
        vec![
            triple(iri(DATASET_ID), vocab::RDF_TYPE, iri(vocab::DATASET)),
            triple(iri(DATASET_ID), vocab::NAME, tagged("Meubels", "nl")),
            triple(iri(DATASET_ID), vocab::NAME, plain("Furniture")),
            triple(
                iri(DATASET_ID),
                vocab::PUBLISHER,
                iri("https://example.org/org/1"),
            ),
            triple(
                iri("https://example.org/org/1"),
                vocab::NAME,
                plain("Museum"),
            ),
            triple(iri(DATASET_ID), vocab::KEYWORD, plain("chairs")),
            triple(iri(DATASET_ID), vocab::KEYWORD, plain("tables")),
            triple(iri(DATASET_ID), vocab::DATE_CREATED, plain("2019-02-27")),
            // Measurements arrive out of order: 3, 1, 2
            triple(iri(DATASET_ID), vocab::MEASUREMENT, blank("m3")),
            triple(iri(DATASET_ID), vocab::MEASUREMENT, blank("m1")),
            triple(iri(DATASET_ID), vocab::MEASUREMENT, blank("m2")),
            triple(blank("m3"), vocab::MEASUREMENT_VALUE, plain("false")),
            triple(
                blank("m3"),
                vocab::MEASUREMENT_OF,
                iri("https://example.org/metric/c"),
            ),
            triple(blank("m1"), vocab::MEASUREMENT_VALUE, plain("true")),
            triple(
                blank("m1"),
                vocab::MEASUREMENT_OF,
                iri("https://example.org/metric/a"),
            ),
            triple(blank("m2"), vocab::MEASUREMENT_VALUE, plain("1")),
            triple(
                blank("m2"),
                vocab::MEASUREMENT_OF,
                iri("https://example.org/metric/b"),
            ),
            triple(
                iri("https://example.org/metric/c"),
                vocab::ORDER,
                plain("3"),
            ),
            triple(
                iri("https://example.org/metric/a"),
                vocab::ORDER,
                plain("1"),
            ),
            triple(
                iri("https://example.org/metric/a"),
                vocab::NAME,
                plain("Open data"),
            ),
            triple(
                iri("https://example.org/metric/b"),
                vocab::ORDER,
                plain("2"),
            ),
        ]
    }

    #[test]
    fn test_materializes_dataset_record() {
        let graph = ResourceGraph::from_triples(&dataset_triples());
        let materializer = Materializer::new(&graph, mapping_for(EntityKind::Dataset));
        let record = materializer.record(DATASET_ID).unwrap();

        assert_eq!(record["id"], DATASET_ID);
        // Untagged literal wins the display preference
        assert_eq!(record["name"], "Furniture");
        assert_eq!(
            record["publisher"],
            json!({ "id": "https://example.org/org/1", "name": "Museum" })
        );
        assert_eq!(record["keywords"], json!(["chairs", "tables"]));
        assert_eq!(record["dateCreated"], "2019-02-27");
        assert!(record.get("license").is_none());
    }

    #[test]
    fn test_measurements_sorted_by_metric_order() {
        let graph = ResourceGraph::from_triples(&dataset_triples());
        let materializer = Materializer::new(&graph, mapping_for(EntityKind::Dataset));
        let record = materializer.record(DATASET_ID).unwrap();

        let measurements = record["measurements"].as_array().unwrap();
        let orders: Vec<i64> = measurements
            .iter()
            .map(|m| m["metric"]["order"].as_i64().unwrap())
            .collect();
        assert_eq!(orders, vec![1, 2, 3]);
        // "1" is a valid xsd:boolean lexical form
        assert_eq!(measurements[1]["value"], true);
        assert_eq!(measurements[0]["metric"]["name"], "Open data");
        assert!(measurements[1]["metric"].get("name").is_none());
    }

    #[test]
    fn test_thing_take_first_keeps_arrival_order_winner() {
        let mut triples = dataset_triples();
        triples.push(triple(
            iri(DATASET_ID),
            vocab::PUBLISHER,
            iri("https://example.org/org/2"),
        ));
        let graph = ResourceGraph::from_triples(&triples);
        let materializer = Materializer::new(&graph, mapping_for(EntityKind::Dataset));
        let record = materializer.record(DATASET_ID).unwrap();

        assert_eq!(record["publisher"]["id"], "https://example.org/org/1");
    }

    #[test]
    fn test_unknown_id_and_wrong_class_yield_none() {
        let graph = ResourceGraph::from_triples(&dataset_triples());
        let materializer = Materializer::new(&graph, mapping_for(EntityKind::Dataset));
        assert!(materializer.record("https://example.org/dataset/404").is_none());

        // The publisher exists in the graph but is not a dataset
        assert!(materializer.record("https://example.org/org/1").is_none());
    }

    #[test]
    fn test_incomplete_measurement_is_skipped() {
        let triples = vec![
            triple(iri(DATASET_ID), vocab::RDF_TYPE, iri(vocab::DATASET)),
            triple(iri(DATASET_ID), vocab::MEASUREMENT, blank("broken")),
            triple(blank("broken"), vocab::MEASUREMENT_VALUE, plain("true")),
            // no measurementOf link
        ];
        let graph = ResourceGraph::from_triples(&triples);
        let materializer = Materializer::new(&graph, mapping_for(EntityKind::Dataset));
        let record = materializer.record(DATASET_ID).unwrap();
        assert!(record.get("measurements").is_none());
    }

    #[test]
    fn test_event_chain_references_extract_as_identifiers() {
        let event = "https://example.org/event/2";
        let triples = vec![
            triple(iri(event), vocab::RDF_TYPE, iri(vocab::PROVENANCE_EVENT)),
            triple(
                iri(event),
                vocab::ADDITIONAL_TYPE,
                iri("https://example.org/term/acquisition"),
            ),
            triple(
                iri(event),
                vocab::STARTS_AFTER,
                iri("https://example.org/event/1"),
            ),
        ];
        let graph = ResourceGraph::from_triples(&triples);
        let materializer = Materializer::new(&graph, mapping_for(EntityKind::ProvenanceEvent));
        let record = materializer.record(event).unwrap();

        // A plain identifier string, not a nested record
        assert_eq!(record["startsAfter"], "https://example.org/event/1");
        assert_eq!(
            record["types"],
            json!([{ "id": "https://example.org/term/acquisition" }])
        );
    }

    #[test]
    fn test_sparse_entity_carries_only_populated_fields() {
        let triples = vec![
            triple(iri(DATASET_ID), vocab::RDF_TYPE, iri(vocab::DATASET)),
            triple(iri(DATASET_ID), vocab::NAME, plain("Furniture")),
        ];
        let graph = ResourceGraph::from_triples(&triples);
        let materializer = Materializer::new(&graph, mapping_for(EntityKind::Dataset));
        let record = materializer.record(DATASET_ID).unwrap();

        let keys: Vec<&str> = record.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "name"]);
    }

    #[test]
    fn test_invalid_date_keeps_lexical_form() {
        let triples = vec![
            triple(iri(DATASET_ID), vocab::RDF_TYPE, iri(vocab::DATASET)),
            triple(iri(DATASET_ID), vocab::DATE_CREATED, plain("circa 1650")),
        ];
        let graph = ResourceGraph::from_triples(&triples);
        let materializer = Materializer::new(&graph, mapping_for(EntityKind::Dataset));
        let record = materializer.record(DATASET_ID).unwrap();
        assert_eq!(record["dateCreated"], "circa 1650");
    }

    #[test]
    fn test_locale_drives_display_names() {
        let triples = vec![
            triple(iri(DATASET_ID), vocab::RDF_TYPE, iri(vocab::DATASET)),
            triple(iri(DATASET_ID), vocab::NAME, tagged("Meubels", "nl")),
            triple(iri(DATASET_ID), vocab::NAME, tagged("Furniture", "en")),
        ];
        let graph = ResourceGraph::from_triples(&triples);
        let record = Materializer::new(&graph, mapping_for(EntityKind::Dataset))
            .with_locale("nl")
            .record(DATASET_ID)
            .unwrap();
        assert_eq!(record["name"], "Meubels");
    }
}
