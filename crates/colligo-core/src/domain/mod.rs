//! Domain layer
//!
//! Contains the entity records the hydration pipeline produces and the
//! search options/results surface callers interact with.

mod entity;
mod search;

pub use entity::{
    CalendarDate, Dataset, EntityKind, EntityRecord, HeritageObject, Measurement, Metric,
    ProvenanceEvent, Thing,
};
pub use search::{SearchOptions, SearchResult, SearchResultFilter, SortBy, SortOrder};
