//! Colligo Core Library
//!
//! This crate provides the core functionality for Colligo, including:
//! - Domain records for datasets, heritage objects and provenance events
//! - Search index integration (ranking, filtering, facet aggregations)
//! - Graph store integration (SPARQL CONSTRUCT batch hydration)
//! - The collection service that composes both backends
//! - Configuration with file and environment layering
//!
//! The split of responsibilities is strict: the index only ever ranks
//! and filters identifiers, and the graph store is the single source of
//! truth for every displayed field.

pub mod config;
pub mod domain;
pub mod error;
pub mod graph;
pub mod index;
pub mod service;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::domain::{
        Dataset, EntityKind, HeritageObject, ProvenanceEvent, SearchOptions, SearchResult,
        SortBy, SortOrder, Thing,
    };
    pub use crate::error::{Error, Result};
    pub use crate::service::CollectionService;
}
