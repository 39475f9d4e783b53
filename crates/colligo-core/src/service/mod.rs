//! Collection service for search and retrieval
//!
//! Orchestrates the two backends behind one surface: the search index
//! ranks and filters identifiers, the graph store hydrates them into
//! full records. Neither backend ever sees the other's concerns.

use tracing::{debug, info};
use url::Url;

use crate::config::Config;
use crate::domain::{EntityRecord, SearchOptions, SearchResult};
use crate::error::{Error, Result};
use crate::graph::{GraphSource, hydrate_batch, SparqlClient};
use crate::index::{assemble_filters, SearchBackend, SearchIndexClient};

/// Service combining index-backed search with graph-backed hydration
pub struct CollectionService<G: GraphSource, S: SearchBackend> {
    graph: G,
    search: S,
    locale: String,
}

impl CollectionService<SparqlClient, SearchIndexClient> {
    /// Create a service wired to HTTP backends from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        config
            .validate()
            .map_err(|e| Error::ConfigError(e.to_string()))?;

        let graph = SparqlClient::builder(&config.graph.endpoint)
            .with_timeout_secs(config.graph.timeout_secs)
            .build()?;
        let search = SearchIndexClient::builder(&config.search.endpoint)
            .with_timeout_secs(config.search.timeout_secs)
            .build()?;

        Ok(Self::new(graph, search).with_locale(&config.locale))
    }
}

impl<G: GraphSource, S: SearchBackend> CollectionService<G, S> {
    /// Create a service over the given backends
    pub fn new(graph: G, search: S) -> Self {
        Self {
            graph,
            search,
            locale: "en".to_string(),
        }
    }

    /// Set the locale used for language-tagged values
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Get the configured locale
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Search one entity kind and hydrate the result page
    pub async fn search<T: EntityRecord>(
        &self,
        options: &SearchOptions,
    ) -> Result<SearchResult<T>> {
        options.validate()?;
        info!(
            kind = %T::KIND,
            query = %options.effective_query(),
            offset = options.offset,
            limit = options.limit,
            "searching"
        );

        // Rank identifiers in the index
        let response = self.search.search(T::KIND, options).await?;
        let ranked_ids = response.ranked_ids();

        // Hydrate the page in one graph round trip; request order is
        // rank order, so the records come back ranked
        let batch = hydrate_batch::<T, G>(&self.graph, &ranked_ids, &self.locale).await?;

        // Turn the aggregations into labelled facet values
        let filters = assemble_filters(T::KIND, &response.aggregations, &batch.labels);

        debug!(
            total = response.total(),
            entities = batch.records.len(),
            facets = filters.len(),
            "search complete"
        );

        Ok(SearchResult {
            total_count: response.total(),
            offset: options.offset,
            limit: options.limit,
            sort_by: options.sort_by,
            sort_order: options.sort_order,
            entities: batch.records,
            filters,
        })
    }

    /// Fetch one entity by identifier
    ///
    /// A malformed or unknown identifier is a miss, not an error.
    pub async fn get_by_id<T: EntityRecord>(&self, id: &str) -> Result<Option<T>> {
        if !is_valid_identifier(id) {
            debug!(entity_id = %id, "malformed identifier, treating as not found");
            return Ok(None);
        }

        let ids = [id.to_string()];
        let batch = hydrate_batch::<T, G>(&self.graph, &ids, &self.locale).await?;
        Ok(batch.records.into_iter().next())
    }

    /// Fetch a batch of entities by identifier, preserving input order
    ///
    /// Malformed and unknown identifiers are skipped; duplicates collapse
    /// to their first occurrence.
    pub async fn get_by_ids<T: EntityRecord>(&self, ids: &[String]) -> Result<Vec<T>> {
        let valid: Vec<String> = ids
            .iter()
            .filter(|id| {
                let ok = is_valid_identifier(id);
                if !ok {
                    debug!(entity_id = %id, "malformed identifier, skipping");
                }
                ok
            })
            .cloned()
            .collect();

        if valid.is_empty() {
            return Ok(Vec::new());
        }

        let batch = hydrate_batch::<T, G>(&self.graph, &valid, &self.locale).await?;
        Ok(batch.records)
    }
}

// ========== Private Helpers ==========

/// Entity identifiers are absolute IRIs; anything else cannot exist
fn is_valid_identifier(id: &str) -> bool {
    Url::parse(id).is_ok()
}
