//! Search index integration
//!
//! Request building, the HTTP client and aggregation handling for the
//! full-text index. The index ranks and filters identifiers only; the
//! graph side owns every displayed field.

mod client;
mod facets;
mod types;

// ========== Re-exports ==========

pub use client::{
    build_search_request, SearchBackend, SearchIndexClient, SearchIndexClientBuilder,
};
pub use facets::assemble_filters;
pub use types::{Aggregate, Bucket, QueryClause, SearchRequest, SearchResponse, TermsAggregation};
