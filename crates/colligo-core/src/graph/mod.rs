//! Graph store integration
//!
//! Everything between an entity identifier and a typed record lives
//! here: the SPARQL CONSTRUCT builder, the HTTP client, the N-Triples
//! reader, the per-subject resource graph, the table-driven record
//! materializer and the compaction pass that the hydration pipeline
//! composes.

mod client;
mod compact;
mod hydrate;
mod materializer;
mod query;
mod resource;
mod triples;

pub mod mapping;
pub mod vocab;

// ========== Re-exports ==========

pub use client::{GraphSource, SparqlClient, SparqlClientBuilder};
pub use compact::compact;
pub use hydrate::{hydrate_batch, HydratedBatch};
pub use materializer::Materializer;
pub use query::QueryBuilder;
pub use resource::{Resource, ResourceGraph};
pub use triples::{parse_ntriples, Literal, Term, Triple};
