//! Search engine wire types
//!
//! Serde mirror of the JSON the full-text index speaks: a bool query
//! with one full-text clause and hard filters, bucketed terms
//! aggregations for facets, and the hits/aggregations response shape.
//! Only the parts this crate uses are mirrored; anything outside this
//! shape fails deserialization on purpose.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ========== Request ==========

/// One search request body
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    /// Ask the engine for exact totals instead of a lower bound
    pub track_total_hits: bool,

    pub from: u32,
    pub size: u32,

    /// Documents are only needed for their identifier
    #[serde(rename = "_source")]
    pub source: Vec<String>,

    pub query: QueryContainer,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<BTreeMap<String, SortDirective>>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub aggregations: BTreeMap<String, TermsAggregation>,
}

impl SearchRequest {
    /// Create a request for one result page
    pub fn new(from: u32, size: u32) -> Self {
        Self {
            track_total_hits: true,
            from,
            size,
            source: vec!["id".to_string()],
            query: QueryContainer {
                bool_query: BoolQuery::default(),
            },
            sort: Vec::new(),
            aggregations: BTreeMap::new(),
        }
    }

    /// Add a scoring clause
    pub fn with_must(mut self, clause: QueryClause) -> Self {
        self.query.bool_query.must.push(clause);
        self
    }

    /// Add a non-scoring hard filter
    pub fn with_filter(mut self, clause: QueryClause) -> Self {
        self.query.bool_query.filter.push(clause);
        self
    }

    /// Add one sort step
    pub fn with_sort(mut self, field: impl Into<String>, order: impl Into<String>) -> Self {
        let mut step = BTreeMap::new();
        step.insert(
            field.into(),
            SortDirective {
                order: order.into(),
            },
        );
        self.sort.push(step);
        self
    }

    /// Add one facet aggregation
    pub fn with_aggregation(mut self, name: impl Into<String>, agg: TermsAggregation) -> Self {
        self.aggregations.insert(name.into(), agg);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryContainer {
    #[serde(rename = "bool")]
    pub bool_query: BoolQuery,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BoolQuery {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub must: Vec<QueryClause>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<QueryClause>,
}

/// The query clauses this crate emits
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum QueryClause {
    SimpleQueryString {
        simple_query_string: SimpleQueryString,
    },
    Term {
        term: BTreeMap<String, String>,
    },
    Terms {
        terms: BTreeMap<String, Vec<String>>,
    },
}

impl QueryClause {
    /// Full-text clause; all terms must match
    pub fn simple_query_string(query: impl Into<String>) -> Self {
        Self::SimpleQueryString {
            simple_query_string: SimpleQueryString {
                query: query.into(),
                default_operator: "and".to_string(),
            },
        }
    }

    /// Exact single-value filter
    pub fn term(field: impl Into<String>, value: impl Into<String>) -> Self {
        let mut term = BTreeMap::new();
        term.insert(field.into(), value.into());
        Self::Term { term }
    }

    /// Exact any-of filter
    pub fn terms(field: impl Into<String>, values: Vec<String>) -> Self {
        let mut terms = BTreeMap::new();
        terms.insert(field.into(), values);
        Self::Terms { terms }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SimpleQueryString {
    pub query: String,
    pub default_operator: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SortDirective {
    pub order: String,
}

/// A bucketed terms aggregation over one field
#[derive(Debug, Clone, Serialize)]
pub struct TermsAggregation {
    pub terms: TermsAggregationBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct TermsAggregationBody {
    pub field: String,
    /// Bucket cap; values beyond it are silently truncated by the engine
    pub size: u32,
    /// Zero keeps known values listed even when filters exclude them
    pub min_doc_count: u32,
}

impl TermsAggregation {
    pub fn new(field: impl Into<String>, size: u32) -> Self {
        Self {
            terms: TermsAggregationBody {
                field: field.into(),
                size,
                min_doc_count: 0,
            },
        }
    }
}

// ========== Response ==========

/// One search response body
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub hits: Hits,
    #[serde(default)]
    pub aggregations: BTreeMap<String, Aggregate>,
}

impl SearchResponse {
    /// Total matches across all pages
    pub fn total(&self) -> u64 {
        self.hits.total.value
    }

    /// Document identifiers in engine rank order
    pub fn ranked_ids(&self) -> Vec<String> {
        self.hits
            .hits
            .iter()
            .map(|hit| hit.source.id.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hits {
    pub total: TotalHits,
    pub hits: Vec<Hit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TotalHits {
    pub value: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hit {
    #[serde(rename = "_source")]
    pub source: HitSource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HitSource {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Aggregate {
    #[serde(default)]
    pub buckets: Vec<Bucket>,
}

/// One facet value with its document count
#[derive(Debug, Clone, Deserialize)]
pub struct Bucket {
    pub key: String,
    pub doc_count: u64,
}
