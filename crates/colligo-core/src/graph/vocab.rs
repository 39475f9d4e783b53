//! Fixed vocabulary of the collection graph
//!
//! Class and predicate IRIs under the colligo schema namespace, plus the
//! one external term we depend on (`rdf:type`). Queries and mapping
//! tables address the graph exclusively through these constants.

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// Namespace all colligo terms live under
pub const NS: &str = "https://w3id.org/colligo/schema#";

// ========== Classes ==========

pub const DATASET: &str = "https://w3id.org/colligo/schema#Dataset";
pub const HERITAGE_OBJECT: &str = "https://w3id.org/colligo/schema#HeritageObject";
pub const PROVENANCE_EVENT: &str = "https://w3id.org/colligo/schema#ProvenanceEvent";

// ========== Shared predicates ==========

pub const NAME: &str = "https://w3id.org/colligo/schema#name";
pub const DESCRIPTION: &str = "https://w3id.org/colligo/schema#description";

// ========== Dataset predicates ==========

pub const PUBLISHER: &str = "https://w3id.org/colligo/schema#publisher";
pub const LICENSE: &str = "https://w3id.org/colligo/schema#license";
pub const KEYWORD: &str = "https://w3id.org/colligo/schema#keyword";
pub const LANDING_PAGE: &str = "https://w3id.org/colligo/schema#landingPage";
pub const DATE_CREATED: &str = "https://w3id.org/colligo/schema#dateCreated";
pub const DATE_MODIFIED: &str = "https://w3id.org/colligo/schema#dateModified";
pub const DATE_PUBLISHED: &str = "https://w3id.org/colligo/schema#datePublished";
pub const MEASUREMENT: &str = "https://w3id.org/colligo/schema#measurement";
pub const MEASUREMENT_VALUE: &str = "https://w3id.org/colligo/schema#measurementValue";
pub const MEASUREMENT_OF: &str = "https://w3id.org/colligo/schema#measurementOf";
pub const ORDER: &str = "https://w3id.org/colligo/schema#order";

// ========== Heritage object predicates ==========

pub const IDENTIFIER: &str = "https://w3id.org/colligo/schema#identifier";
pub const INSCRIPTION: &str = "https://w3id.org/colligo/schema#inscription";
pub const ADDITIONAL_TYPE: &str = "https://w3id.org/colligo/schema#additionalType";
pub const ABOUT: &str = "https://w3id.org/colligo/schema#about";
pub const MATERIAL: &str = "https://w3id.org/colligo/schema#material";
pub const TECHNIQUE: &str = "https://w3id.org/colligo/schema#technique";
pub const CREATOR: &str = "https://w3id.org/colligo/schema#creator";
pub const IMAGE: &str = "https://w3id.org/colligo/schema#image";
pub const CONTENT_URL: &str = "https://w3id.org/colligo/schema#contentUrl";
pub const OWNER: &str = "https://w3id.org/colligo/schema#owner";
pub const IS_PART_OF: &str = "https://w3id.org/colligo/schema#isPartOf";

// ========== Provenance event predicates ==========

pub const START_DATE: &str = "https://w3id.org/colligo/schema#startDate";
pub const END_DATE: &str = "https://w3id.org/colligo/schema#endDate";
pub const TRANSFERRED_FROM: &str = "https://w3id.org/colligo/schema#transferredFrom";
pub const TRANSFERRED_TO: &str = "https://w3id.org/colligo/schema#transferredTo";
pub const LOCATION: &str = "https://w3id.org/colligo/schema#location";
pub const STARTS_AFTER: &str = "https://w3id.org/colligo/schema#startsAfter";
pub const ENDS_BEFORE: &str = "https://w3id.org/colligo/schema#endsBefore";
