//! Domain entities for heritage collections
//!
//! These are the typed records the graph hydration pipeline produces:
//! datasets, heritage objects and provenance events, plus the small
//! referenced shapes they share (`Thing`, `Metric`, `Measurement`).
//! Records are plain request-scoped values; nothing here talks to a
//! backend.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::Error;

// ========== Entity kinds ==========

/// The kinds of entity the hydration pipeline knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Dataset,
    HeritageObject,
    ProvenanceEvent,
}

impl EntityKind {
    /// Collection-style name, used for CLI arguments and the index `kind` field
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Dataset => "datasets",
            EntityKind::HeritageObject => "heritage-objects",
            EntityKind::ProvenanceEvent => "provenance-events",
        }
    }

    /// All known kinds
    pub fn all() -> &'static [EntityKind] {
        &[
            EntityKind::Dataset,
            EntityKind::HeritageObject,
            EntityKind::ProvenanceEvent,
        ]
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "datasets" | "dataset" => Ok(EntityKind::Dataset),
            "heritage-objects" | "heritage-object" | "objects" => Ok(EntityKind::HeritageObject),
            "provenance-events" | "provenance-event" | "events" => Ok(EntityKind::ProvenanceEvent),
            _ => Err(Error::InvalidEntityKind(s.to_string())),
        }
    }
}

/// A typed record the pipeline can materialize for some entity kind
pub trait EntityRecord: DeserializeOwned + Send {
    /// The kind whose mapping table produces this record
    const KIND: EntityKind;
}

// ========== Shared shapes ==========

/// A referenced resource: an identifier plus an optional display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thing {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Thing {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A quality dimension a dataset can be measured against, with a
/// display order for stable presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub order: i64,
}

impl Metric {
    pub fn new(id: impl Into<String>, order: i64) -> Self {
        Self {
            id: id.into(),
            name: None,
            order,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A boolean outcome for one metric of a dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    pub id: String,
    pub value: bool,
    pub metric: Metric,
}

impl Measurement {
    pub fn new(id: impl Into<String>, value: bool, metric: Metric) -> Self {
        Self {
            id: id.into(),
            value,
            metric,
        }
    }
}

// ========== Calendar dates ==========

/// A date from the graph, which may carry a lexical form that is not a
/// valid calendar date. Invalid forms are preserved as-is rather than
/// rejected, so one bad literal never sinks a whole record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarDate {
    Valid(NaiveDate),
    Invalid(String),
}

impl CalendarDate {
    /// Parse a lexical form, falling back to the `Invalid` sentinel
    ///
    /// Accepts plain `YYYY-MM-DD` dates and RFC 3339 date-times (the
    /// date part is kept). Anything else is carried through verbatim.
    pub fn parse(raw: &str) -> Self {
        if let Ok(date) = raw.parse::<NaiveDate>() {
            return CalendarDate::Valid(date);
        }
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
            return CalendarDate::Valid(dt.date_naive());
        }
        CalendarDate::Invalid(raw.to_string())
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, CalendarDate::Valid(_))
    }

    /// The valid date, if there is one
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            CalendarDate::Valid(date) => Some(*date),
            CalendarDate::Invalid(_) => None,
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarDate::Valid(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            CalendarDate::Invalid(raw) => write!(f, "{}", raw),
        }
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(CalendarDate::parse(&raw))
    }
}

// ========== Records ==========

/// A published collection description with optional quality measurements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Thing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<Thing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landing_pages: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<CalendarDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<CalendarDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_published: Option<CalendarDate>,
    /// Ascending by `metric.order`; never empty when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurements: Option<Vec<Measurement>>,
}

impl Dataset {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: None,
            publisher: None,
            license: None,
            keywords: None,
            landing_pages: None,
            date_created: None,
            date_modified: None,
            date_published: None,
            measurements: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_publisher(mut self, publisher: Thing) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn with_license(mut self, license: Thing) -> Self {
        self.license = Some(license);
        self
    }

    pub fn with_measurements(mut self, measurements: Vec<Measurement>) -> Self {
        self.measurements = Some(measurements);
        self
    }
}

impl EntityRecord for Dataset {
    const KIND: EntityKind = EntityKind::Dataset;
}

/// A physical or digital collection item, always tied to the dataset
/// it is part of
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeritageObject {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inscriptions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<Thing>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subjects: Option<Vec<Thing>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub materials: Option<Vec<Thing>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub techniques: Option<Vec<Thing>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creators: Option<Vec<Thing>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Thing>,
    /// The dataset this object belongs to. Required: an object without
    /// a dataset link is not materialized.
    pub is_part_of: Dataset,
}

impl HeritageObject {
    pub fn new(id: impl Into<String>, is_part_of: Dataset) -> Self {
        Self {
            id: id.into(),
            identifier: None,
            name: None,
            description: None,
            inscriptions: None,
            types: None,
            subjects: None,
            materials: None,
            techniques: None,
            creators: None,
            images: None,
            owner: None,
            is_part_of,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_owner(mut self, owner: Thing) -> Self {
        self.owner = Some(owner);
        self
    }
}

impl EntityRecord for HeritageObject {
    const KIND: EntityKind = EntityKind::HeritageObject;
}

/// One event in an object's custody history
///
/// Events chain chronologically through `starts_after` / `ends_before`,
/// which hold identifiers of other events rather than nested records, so
/// a chain (or an accidental cycle in the data) never recurses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvenanceEvent {
    pub id: String,
    /// Required: an event without at least one type is not materialized
    pub types: Vec<Thing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<CalendarDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<CalendarDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transferred_from: Option<Thing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transferred_to: Option<Thing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Thing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_before: Option<String>,
}

impl ProvenanceEvent {
    pub fn new(id: impl Into<String>, types: Vec<Thing>) -> Self {
        Self {
            id: id.into(),
            types,
            description: None,
            start_date: None,
            end_date: None,
            transferred_from: None,
            transferred_to: None,
            location: None,
            starts_after: None,
            ends_before: None,
        }
    }
}

impl EntityRecord for ProvenanceEvent {
    const KIND: EntityKind = EntityKind::ProvenanceEvent;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_round_trip() {
        for kind in EntityKind::all() {
            let parsed: EntityKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, *kind);
        }
    }

    #[test]
    fn test_entity_kind_accepts_singular_alias() {
        let kind: EntityKind = "heritage-object".parse().unwrap();
        assert_eq!(kind, EntityKind::HeritageObject);
    }

    #[test]
    fn test_entity_kind_rejects_unknown() {
        let result = "paintings".parse::<EntityKind>();
        assert!(result.is_err());
    }

    #[test]
    fn test_calendar_date_parses_plain_date() {
        let date = CalendarDate::parse("1887-06-30");
        assert_eq!(
            date,
            CalendarDate::Valid(NaiveDate::from_ymd_opt(1887, 6, 30).unwrap())
        );
        assert_eq!(date.to_string(), "1887-06-30");
    }

    #[test]
    fn test_calendar_date_parses_rfc3339_datetime() {
        let date = CalendarDate::parse("2021-03-14T09:26:53Z");
        assert_eq!(
            date.date(),
            Some(NaiveDate::from_ymd_opt(2021, 3, 14).unwrap())
        );
    }

    #[test]
    fn test_calendar_date_keeps_invalid_form() {
        let date = CalendarDate::parse("circa 1650");
        assert_eq!(date, CalendarDate::Invalid("circa 1650".to_string()));
        assert!(!date.is_valid());
        assert_eq!(date.to_string(), "circa 1650");
    }

    #[test]
    fn test_calendar_date_serde_round_trip() {
        let valid: CalendarDate = serde_json::from_str("\"1901-12-01\"").unwrap();
        assert!(valid.is_valid());
        assert_eq!(serde_json::to_string(&valid).unwrap(), "\"1901-12-01\"");

        let invalid: CalendarDate = serde_json::from_str("\"unknown\"").unwrap();
        assert_eq!(invalid, CalendarDate::Invalid("unknown".to_string()));
    }

    #[test]
    fn test_thing_builder() {
        let thing = Thing::new("https://example.org/term/1").with_name("canvas");
        assert_eq!(thing.id, "https://example.org/term/1");
        assert_eq!(thing.name.as_deref(), Some("canvas"));
    }

    #[test]
    fn test_dataset_serializes_camel_case_and_skips_none() {
        let dataset = Dataset::new("https://example.org/dataset/1")
            .with_name("Paintings")
            .with_publisher(Thing::new("https://example.org/org/1").with_name("Museum"));
        let json = serde_json::to_value(&dataset).unwrap();

        assert_eq!(json["name"], "Paintings");
        assert_eq!(json["publisher"]["name"], "Museum");
        assert!(json.get("dateCreated").is_none());
        assert!(json.get("license").is_none());
    }

    #[test]
    fn test_heritage_object_requires_dataset_on_deserialize() {
        let missing = serde_json::json!({
            "id": "https://example.org/object/1",
            "name": "Chair"
        });
        assert!(serde_json::from_value::<HeritageObject>(missing).is_err());

        let present = serde_json::json!({
            "id": "https://example.org/object/1",
            "isPartOf": { "id": "https://example.org/dataset/1" }
        });
        let object: HeritageObject = serde_json::from_value(present).unwrap();
        assert_eq!(object.is_part_of.id, "https://example.org/dataset/1");
    }

    #[test]
    fn test_provenance_event_requires_types() {
        let missing = serde_json::json!({
            "id": "https://example.org/event/1",
            "description": "Sold at auction"
        });
        assert!(serde_json::from_value::<ProvenanceEvent>(missing).is_err());
    }

    #[test]
    fn test_measurement_serde_round_trip() {
        let measurement = Measurement::new(
            "https://example.org/measurement/1",
            true,
            Metric::new("https://example.org/metric/open-license", 2).with_name("Open license"),
        );
        let json = serde_json::to_string(&measurement).unwrap();
        let back: Measurement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, measurement);
        assert_eq!(back.metric.order, 2);
    }
}
