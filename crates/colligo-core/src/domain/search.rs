//! Search options and result envelopes
//!
//! Defines the caller-facing search surface: paging and sorting options,
//! facet filters, and the result envelope that pairs hydrated entities
//! with facet counts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};

/// Fields a search can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    /// Engine relevance score
    Relevance,
    /// Entity display name
    Name,
    /// Creation date
    DateCreated,
}

impl SortBy {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::Name => "name",
            Self::DateCreated => "date-created",
        }
    }

    /// Create from string representation
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "relevance" => Some(Self::Relevance),
            "name" => Some(Self::Name),
            "date-created" | "created" => Some(Self::DateCreated),
            _ => None,
        }
    }

    /// Get all sort fields
    pub fn all() -> Vec<Self> {
        vec![Self::Relevance, Self::Name, Self::DateCreated]
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of a sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    /// Create from string representation
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Ascending),
            "desc" | "descending" => Some(Self::Descending),
            _ => None,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Search parameters with paging, sorting and facet filters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOptions {
    /// The search text; blank means match-all
    pub query: String,

    /// Offset for pagination
    pub offset: u32,

    /// Maximum number of results per page; must be greater than zero
    pub limit: u32,

    /// Field to sort by
    pub sort_by: SortBy,

    /// Sort direction
    pub sort_order: SortOrder,

    /// Facet filters: facet name to the selected value identifiers.
    /// Values within one facet are OR-ed; facets are AND-ed together.
    pub filters: BTreeMap<String, Vec<String>>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            query: "*".to_string(),
            offset: 0,
            limit: 10,
            sort_by: SortBy::Relevance,
            sort_order: SortOrder::Descending,
            filters: BTreeMap::new(),
        }
    }
}

impl SearchOptions {
    /// Create options with default settings (match-all, first page of 10)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Set the offset for pagination
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Set the result limit
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set the sort field and direction
    pub fn with_sort(mut self, sort_by: SortBy, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }

    /// Add selected values for one facet
    pub fn with_filter(mut self, facet: impl Into<String>, values: Vec<String>) -> Self {
        self.filters.insert(facet.into(), values);
        self
    }

    /// The query text to send to the engine; blank input becomes match-all
    pub fn effective_query(&self) -> &str {
        let trimmed = self.query.trim();
        if trimmed.is_empty() { "*" } else { trimmed }
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 {
            return Err(Error::InvalidOptions(
                "limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// One selectable facet value with its match count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultFilter {
    /// Identifier of the facet value
    pub id: String,

    /// Display name, when one could be resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Number of matching documents; zero-count values stay listed so a
    /// selected filter never disappears from the UI
    pub total_count: u64,
}

impl SearchResultFilter {
    /// Create a new facet value
    pub fn new(id: impl Into<String>, total_count: u64) -> Self {
        Self {
            id: id.into(),
            name: None,
            total_count,
        }
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A page of hydrated entities plus the facet counts for the whole match
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult<T> {
    /// Total number of matches across all pages
    pub total_count: u64,

    /// Echo of the requested offset
    pub offset: u32,

    /// Echo of the requested limit
    pub limit: u32,

    /// Echo of the requested sort field
    pub sort_by: SortBy,

    /// Echo of the requested sort direction
    pub sort_order: SortOrder,

    /// Hydrated entities in engine rank order
    pub entities: Vec<T>,

    /// Facet name to its values, in engine delivery order
    pub filters: BTreeMap<String, Vec<SearchResultFilter>>,
}
