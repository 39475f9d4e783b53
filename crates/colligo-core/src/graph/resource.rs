//! Resource graph built from response triples
//!
//! Triples are regrouped by subject into an arena keyed by identifier
//! (IRI or prefixed blank node label). Edges stay identifier references
//! resolved through the arena, so cyclic data cannot send a traversal
//! into a loop; the mapping tables bound every walk.

use std::collections::HashMap;

use crate::graph::triples::{Literal, Term, Triple};
use crate::graph::vocab;

/// One node of the resource graph: all observed terms per predicate,
/// in arrival order
#[derive(Debug, Clone, Default)]
pub struct Resource {
    properties: HashMap<String, Vec<Term>>,
}

impl Resource {
    /// All values for one predicate, in arrival order
    pub fn values(&self, predicate: &str) -> &[Term] {
        self.properties
            .get(predicate)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// First value for one predicate
    pub fn first(&self, predicate: &str) -> Option<&Term> {
        self.values(predicate).first()
    }

    /// All literal values for one predicate, in arrival order
    pub fn literals(&self, predicate: &str) -> impl Iterator<Item = &Literal> {
        self.values(predicate).iter().filter_map(Term::as_literal)
    }

    /// The display literal for one predicate: the first language-less
    /// literal, else the first literal tagged with the locale, else the
    /// first literal at all
    pub fn preferred_literal(&self, predicate: &str, locale: &str) -> Option<&Literal> {
        let mut untagged = None;
        let mut tagged = None;
        let mut any = None;
        for lit in self.literals(predicate) {
            if any.is_none() {
                any = Some(lit);
            }
            match &lit.language {
                None if untagged.is_none() => untagged = Some(lit),
                Some(lang) if tagged.is_none() && lang_matches(lang, locale) => tagged = Some(lit),
                _ => {}
            }
        }
        untagged.or(tagged).or(any)
    }

    /// Whether this resource asserts the given rdf:type
    pub fn has_type(&self, class_iri: &str) -> bool {
        self.values(vocab::RDF_TYPE)
            .iter()
            .any(|term| term.as_iri() == Some(class_iri))
    }
}

/// All resources of one response, keyed by identifier
#[derive(Debug, Clone, Default)]
pub struct ResourceGraph {
    resources: HashMap<String, Resource>,
}

impl ResourceGraph {
    /// Regroup triples by subject
    pub fn from_triples(triples: &[Triple]) -> Self {
        let mut resources: HashMap<String, Resource> = HashMap::new();
        for triple in triples {
            let Some(key) = triple.subject.node_key() else {
                continue;
            };
            resources
                .entry(key)
                .or_default()
                .properties
                .entry(triple.predicate.clone())
                .or_default()
                .push(triple.object.clone());
        }
        Self { resources }
    }

    /// Look up a resource by identifier
    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.get(id)
    }

    /// Whether the graph holds a resource with this identifier
    pub fn contains(&self, id: &str) -> bool {
        self.resources.contains_key(id)
    }

    /// Number of resources
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// BCP 47 style tag match: exact or more specific than the locale
fn lang_matches(tag: &str, locale: &str) -> bool {
    let tag = tag.to_ascii_lowercase();
    let locale = locale.to_ascii_lowercase();
    tag == locale || tag.starts_with(&format!("{}-", locale))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iri(s: &str) -> Term {
        Term::Iri(s.to_string())
    }

    fn lit(lexical: &str, language: Option<&str>) -> Term {
        Term::Literal(Literal {
            lexical: lexical.to_string(),
            language: language.map(|l| l.to_string()),
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

    #[test]
    fn test_groups_triples_by_subject() {
        let triples = vec![
            triple(
                iri("https://example.org/d/1"),
                vocab::RDF_TYPE,
                iri(vocab::DATASET),
            ),
            triple(
                iri("https://example.org/d/1"),
                vocab::KEYWORD,
                lit("chairs", None),
            ),
            triple(
                iri("https://example.org/d/1"),
                vocab::KEYWORD,
                lit("tables", None),
            ),
            triple(
                Term::Blank("m1".to_string()),
                vocab::MEASUREMENT_VALUE,
                lit("true", None),
            ),
        ];

        let graph = ResourceGraph::from_triples(&triples);
        assert_eq!(graph.len(), 2);

        let dataset = graph.resource("https://example.org/d/1").unwrap();
        assert!(dataset.has_type(vocab::DATASET));

        let keywords: Vec<&str> = dataset
            .literals(vocab::KEYWORD)
            .map(|l| l.lexical.as_str())
            .collect();
        assert_eq!(keywords, vec!["chairs", "tables"]);

        assert!(graph.contains("_:m1"));
        assert!(graph.resource("https://example.org/d/2").is_none());
    }

    #[test]
    fn test_reference_cycles_are_harmless() {
        let triples = vec![
            triple(
                iri("https://example.org/e/1"),
                vocab::STARTS_AFTER,
                iri("https://example.org/e/2"),
            ),
            triple(
                iri("https://example.org/e/2"),
                vocab::STARTS_AFTER,
                iri("https://example.org/e/1"),
            ),
        ];

        let graph = ResourceGraph::from_triples(&triples);
        let first = graph.resource("https://example.org/e/1").unwrap();
        let target = first.first(vocab::STARTS_AFTER).unwrap();
        // Resolving the edge is just a lookup; no recursion happens
        assert!(graph.contains(&target.node_key().unwrap()));
    }

    #[test]
    fn test_preferred_literal_prefers_untagged() {
        let triples = vec![
            triple(
                iri("https://example.org/d/1"),
                vocab::NAME,
                lit("Schilderijen", Some("nl")),
            ),
            triple(
                iri("https://example.org/d/1"),
                vocab::NAME,
                lit("Paintings", None),
            ),
        ];
        let graph = ResourceGraph::from_triples(&triples);
        let resource = graph.resource("https://example.org/d/1").unwrap();
        assert_eq!(
            resource.preferred_literal(vocab::NAME, "nl").unwrap().lexical,
            "Paintings"
        );
    }

    #[test]
    fn test_preferred_literal_falls_back_to_locale_tag() {
        let triples = vec![
            triple(
                iri("https://example.org/d/1"),
                vocab::NAME,
                lit("Gemälde", Some("de")),
            ),
            triple(
                iri("https://example.org/d/1"),
                vocab::NAME,
                lit("Paintings", Some("en-GB")),
            ),
        ];
        let graph = ResourceGraph::from_triples(&triples);
        let resource = graph.resource("https://example.org/d/1").unwrap();
        assert_eq!(
            resource.preferred_literal(vocab::NAME, "en").unwrap().lexical,
            "Paintings"
        );
    }

    #[test]
    fn test_missing_predicate_yields_empty_slice() {
        let graph = ResourceGraph::from_triples(&[]);
        assert!(graph.is_empty());

        let triples = vec![triple(
            iri("https://example.org/d/1"),
            vocab::NAME,
            lit("Paintings", None),
        )];
        let graph = ResourceGraph::from_triples(&triples);
        let resource = graph.resource("https://example.org/d/1").unwrap();
        assert!(resource.values(vocab::DESCRIPTION).is_empty());
        assert!(resource.first(vocab::DESCRIPTION).is_none());
    }
}
