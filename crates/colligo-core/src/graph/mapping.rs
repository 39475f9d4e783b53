//! Declarative property mappings
//!
//! Each entity kind is described by a table of rules: which predicate
//! path feeds which record field, and how its values are shaped. The
//! query builder and the materializer both walk these tables, so adding
//! a property to a kind is one table row, not new control flow. Facet
//! tables likewise declare which index fields a kind exposes as facets.

use crate::domain::EntityKind;
use crate::graph::vocab;

/// How the values selected by one rule become a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A single value: the first literal's lexical form, or the IRI of
    /// the first referenced resource. Extras are discarded.
    Scalar,
    /// Every literal value, as an array
    ScalarList,
    /// A single referenced resource, shaped `{id, name?}`. Take-first.
    Thing,
    /// Every referenced resource, shaped `{id, name?}`
    ThingList,
    /// A single date literal, parsed leniently
    Date,
    /// Ordered measurement sub-records with their metrics
    Measurements,
}

/// One rule: a record field fed by a predicate path
#[derive(Debug, Clone, Copy)]
pub struct PropertyRule {
    /// Record field the values land in, as serialized
    pub field: &'static str,
    /// Predicate path from the entity to the values; multi-step paths
    /// collapse to the head predicate in the constructed graph
    pub path: &'static [&'static str],
    /// Extraction shape
    pub kind: FieldKind,
    /// Whether literals carry language tags the query must filter down
    /// to the configured locale
    pub language_tagged: bool,
}

/// The full mapping for one entity kind
#[derive(Debug, Clone, Copy)]
pub struct PropertyMapping {
    pub kind: EntityKind,
    /// Class IRI asserted for this kind in the graph
    pub class: &'static str,
    pub rules: &'static [PropertyRule],
}

/// One facet a kind exposes: its public name and the index field it
/// aggregates over
#[derive(Debug, Clone, Copy)]
pub struct FacetField {
    pub name: &'static str,
    pub field: &'static str,
}

// ========== Rule tables ==========

const DATASET_RULES: &[PropertyRule] = &[
    PropertyRule {
        field: "name",
        path: &[vocab::NAME],
        kind: FieldKind::Scalar,
        language_tagged: true,
    },
    PropertyRule {
        field: "description",
        path: &[vocab::DESCRIPTION],
        kind: FieldKind::Scalar,
        language_tagged: true,
    },
    PropertyRule {
        field: "publisher",
        path: &[vocab::PUBLISHER],
        kind: FieldKind::Thing,
        language_tagged: false,
    },
    PropertyRule {
        field: "license",
        path: &[vocab::LICENSE],
        kind: FieldKind::Thing,
        language_tagged: false,
    },
    PropertyRule {
        field: "keywords",
        path: &[vocab::KEYWORD],
        kind: FieldKind::ScalarList,
        language_tagged: false,
    },
    PropertyRule {
        field: "landingPages",
        path: &[vocab::LANDING_PAGE],
        kind: FieldKind::ScalarList,
        language_tagged: false,
    },
    PropertyRule {
        field: "dateCreated",
        path: &[vocab::DATE_CREATED],
        kind: FieldKind::Date,
        language_tagged: false,
    },
    PropertyRule {
        field: "dateModified",
        path: &[vocab::DATE_MODIFIED],
        kind: FieldKind::Date,
        language_tagged: false,
    },
    PropertyRule {
        field: "datePublished",
        path: &[vocab::DATE_PUBLISHED],
        kind: FieldKind::Date,
        language_tagged: false,
    },
    PropertyRule {
        field: "measurements",
        path: &[vocab::MEASUREMENT],
        kind: FieldKind::Measurements,
        language_tagged: false,
    },
];

const HERITAGE_OBJECT_RULES: &[PropertyRule] = &[
    PropertyRule {
        field: "identifier",
        path: &[vocab::IDENTIFIER],
        kind: FieldKind::Scalar,
        language_tagged: false,
    },
    PropertyRule {
        field: "name",
        path: &[vocab::NAME],
        kind: FieldKind::Scalar,
        language_tagged: true,
    },
    PropertyRule {
        field: "description",
        path: &[vocab::DESCRIPTION],
        kind: FieldKind::Scalar,
        language_tagged: true,
    },
    PropertyRule {
        field: "inscriptions",
        path: &[vocab::INSCRIPTION],
        kind: FieldKind::ScalarList,
        language_tagged: false,
    },
    PropertyRule {
        field: "types",
        path: &[vocab::ADDITIONAL_TYPE],
        kind: FieldKind::ThingList,
        language_tagged: false,
    },
    PropertyRule {
        field: "subjects",
        path: &[vocab::ABOUT],
        kind: FieldKind::ThingList,
        language_tagged: false,
    },
    PropertyRule {
        field: "materials",
        path: &[vocab::MATERIAL],
        kind: FieldKind::ThingList,
        language_tagged: false,
    },
    PropertyRule {
        field: "techniques",
        path: &[vocab::TECHNIQUE],
        kind: FieldKind::ThingList,
        language_tagged: false,
    },
    PropertyRule {
        field: "creators",
        path: &[vocab::CREATOR],
        kind: FieldKind::ThingList,
        language_tagged: false,
    },
    PropertyRule {
        field: "images",
        path: &[vocab::IMAGE, vocab::CONTENT_URL],
        kind: FieldKind::ScalarList,
        language_tagged: false,
    },
    PropertyRule {
        field: "owner",
        path: &[vocab::OWNER],
        kind: FieldKind::Thing,
        language_tagged: false,
    },
    PropertyRule {
        field: "isPartOf",
        path: &[vocab::IS_PART_OF],
        kind: FieldKind::Thing,
        language_tagged: false,
    },
];

const PROVENANCE_EVENT_RULES: &[PropertyRule] = &[
    PropertyRule {
        field: "types",
        path: &[vocab::ADDITIONAL_TYPE],
        kind: FieldKind::ThingList,
        language_tagged: false,
    },
    PropertyRule {
        field: "description",
        path: &[vocab::DESCRIPTION],
        kind: FieldKind::Scalar,
        language_tagged: true,
    },
    PropertyRule {
        field: "startDate",
        path: &[vocab::START_DATE],
        kind: FieldKind::Date,
        language_tagged: false,
    },
    PropertyRule {
        field: "endDate",
        path: &[vocab::END_DATE],
        kind: FieldKind::Date,
        language_tagged: false,
    },
    PropertyRule {
        field: "transferredFrom",
        path: &[vocab::TRANSFERRED_FROM],
        kind: FieldKind::Thing,
        language_tagged: false,
    },
    PropertyRule {
        field: "transferredTo",
        path: &[vocab::TRANSFERRED_TO],
        kind: FieldKind::Thing,
        language_tagged: false,
    },
    PropertyRule {
        field: "location",
        path: &[vocab::LOCATION],
        kind: FieldKind::Thing,
        language_tagged: false,
    },
    PropertyRule {
        field: "startsAfter",
        path: &[vocab::STARTS_AFTER],
        kind: FieldKind::Scalar,
        language_tagged: false,
    },
    PropertyRule {
        field: "endsBefore",
        path: &[vocab::ENDS_BEFORE],
        kind: FieldKind::Scalar,
        language_tagged: false,
    },
];

const DATASET_MAPPING: PropertyMapping = PropertyMapping {
    kind: EntityKind::Dataset,
    class: vocab::DATASET,
    rules: DATASET_RULES,
};

const HERITAGE_OBJECT_MAPPING: PropertyMapping = PropertyMapping {
    kind: EntityKind::HeritageObject,
    class: vocab::HERITAGE_OBJECT,
    rules: HERITAGE_OBJECT_RULES,
};

const PROVENANCE_EVENT_MAPPING: PropertyMapping = PropertyMapping {
    kind: EntityKind::ProvenanceEvent,
    class: vocab::PROVENANCE_EVENT,
    rules: PROVENANCE_EVENT_RULES,
};

/// The property mapping for a kind
pub fn mapping_for(kind: EntityKind) -> &'static PropertyMapping {
    match kind {
        EntityKind::Dataset => &DATASET_MAPPING,
        EntityKind::HeritageObject => &HERITAGE_OBJECT_MAPPING,
        EntityKind::ProvenanceEvent => &PROVENANCE_EVENT_MAPPING,
    }
}

// ========== Facet tables ==========

const DATASET_FACETS: &[FacetField] = &[
    FacetField {
        name: "publishers",
        field: "publisher",
    },
    FacetField {
        name: "licenses",
        field: "license",
    },
];

const HERITAGE_OBJECT_FACETS: &[FacetField] = &[
    FacetField {
        name: "owners",
        field: "owner",
    },
    FacetField {
        name: "types",
        field: "objectType",
    },
    FacetField {
        name: "subjects",
        field: "subject",
    },
    FacetField {
        name: "materials",
        field: "material",
    },
    FacetField {
        name: "techniques",
        field: "technique",
    },
    FacetField {
        name: "creators",
        field: "creator",
    },
];

// Provenance events are reached through their objects; they carry no
// facets of their own
const PROVENANCE_EVENT_FACETS: &[FacetField] = &[];

/// The facets a kind exposes
pub fn facets_for(kind: EntityKind) -> &'static [FacetField] {
    match kind {
        EntityKind::Dataset => DATASET_FACETS,
        EntityKind::HeritageObject => HERITAGE_OBJECT_FACETS,
        EntityKind::ProvenanceEvent => PROVENANCE_EVENT_FACETS,
    }
}

/// Resolve a facet's public name to its index field, if the kind has it
pub fn facet_field(kind: EntityKind, name: &str) -> Option<&'static str> {
    facets_for(kind)
        .iter()
        .find(|facet| facet.name == name)
        .map(|facet| facet.field)
}
