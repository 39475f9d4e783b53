//! Full-text search client
//!
//! Composes one engine request per search: a `simple_query_string`
//! clause, a hard filter on the entity kind, one terms filter per
//! selected facet, and one bucketed terms aggregation per facet the
//! kind exposes. The `SearchBackend` trait is the seam the service
//! layer depends on.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::domain::{EntityKind, SearchOptions, SortBy};
use crate::error::{Error, Result};
use crate::graph::mapping::{facet_field, facets_for};
use crate::index::types::{QueryClause, SearchRequest, SearchResponse, TermsAggregation};

/// Bucket cap per facet aggregation; values beyond it are truncated
const FACET_BUCKET_SIZE: u32 = 100;

/// Transport seam for the search index
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run one search for a kind and return the engine response
    async fn search(&self, kind: EntityKind, options: &SearchOptions) -> Result<SearchResponse>;
}

/// Compose the engine request for one search
///
/// Unknown facet names in the filter set are skipped with a warning;
/// filter state arrives from UI state and must degrade gracefully.
pub fn build_search_request(kind: EntityKind, options: &SearchOptions) -> SearchRequest {
    let mut request = SearchRequest::new(options.offset, options.limit)
        .with_must(QueryClause::simple_query_string(options.effective_query()))
        .with_filter(QueryClause::term("kind", kind.as_str()));

    for (facet, values) in &options.filters {
        if values.is_empty() {
            continue;
        }
        match facet_field(kind, facet) {
            Some(field) => {
                request = request.with_filter(QueryClause::terms(
                    format!("{}.keyword", field),
                    values.clone(),
                ));
            }
            None => {
                warn!(facet = %facet, kind = %kind, "unknown facet filter, skipping");
            }
        }
    }

    let order = options.sort_order.as_str();
    request = match options.sort_by {
        SortBy::Relevance => request.with_sort("_score", order),
        SortBy::Name => request.with_sort("name.keyword", order),
        SortBy::DateCreated => request.with_sort("dateCreated", order),
    };

    for facet in facets_for(kind) {
        request = request.with_aggregation(
            facet.name,
            TermsAggregation::new(format!("{}.keyword", facet.field), FACET_BUCKET_SIZE),
        );
    }

    request
}

/// HTTP client for the search index endpoint
#[derive(Debug, Clone)]
pub struct SearchIndexClient {
    client: HttpClient,
    endpoint: String,
}

impl SearchIndexClient {
    /// Start building a client for the given endpoint
    pub fn builder(endpoint: impl Into<String>) -> SearchIndexClientBuilder {
        SearchIndexClientBuilder::new(endpoint)
    }

    /// The endpoint this client posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Builder for [`SearchIndexClient`]
#[derive(Debug, Clone)]
pub struct SearchIndexClientBuilder {
    endpoint: String,
    timeout_secs: u64,
}

impl SearchIndexClientBuilder {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout_secs: 30,
        }
    }

    /// Set the request timeout in seconds
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Validate the endpoint and build the client
    pub fn build(self) -> Result<SearchIndexClient> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| Error::ConfigError(format!("invalid search endpoint: {}", e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(Error::ConfigError(format!(
                "search endpoint must use http or https, got '{}'",
                url.scheme()
            )));
        }

        let client = HttpClient::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(Error::SearchRequest)?;

        Ok(SearchIndexClient {
            client,
            endpoint: self.endpoint,
        })
    }
}

#[async_trait]
impl SearchBackend for SearchIndexClient {
    async fn search(&self, kind: EntityKind, options: &SearchOptions) -> Result<SearchResponse> {
        let request = build_search_request(kind, options);
        debug!(
            endpoint = %self.endpoint,
            kind = %kind,
            query = %options.effective_query(),
            "sending search request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(Error::SearchRequest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            warn!(status = %status, "search index returned an error");
            return Err(Error::SearchStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(Error::SearchRequest)?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;
        debug!(
            total = parsed.total(),
            page_hits = parsed.hits.hits.len(),
            "parsed search response"
        );
        Ok(parsed)
    }
}
