//! SPARQL CONSTRUCT query builder
//!
//! Builds one bounded CONSTRUCT query for a batch of entity identifiers
//! from a kind's property mapping. Identifiers are injected through a
//! `VALUES` block, every rule gets its own `OPTIONAL` so missing
//! properties never eliminate an entity, and language-tagged literals
//! are filtered to untagged forms plus the configured locale. Output is
//! deterministic: rules render in table order, variables derive from
//! field names.

use crate::graph::mapping::{FieldKind, PropertyMapping, PropertyRule};
use crate::graph::vocab;

/// Builder for one batch hydration query
#[derive(Debug, Clone)]
pub struct QueryBuilder<'a> {
    mapping: &'static PropertyMapping,
    locale: &'a str,
    ids: Vec<String>,
}

impl<'a> QueryBuilder<'a> {
    /// Create a builder for one entity kind's mapping
    pub fn new(mapping: &'static PropertyMapping) -> Self {
        Self {
            mapping,
            locale: "en",
            ids: Vec::new(),
        }
    }

    /// Set the locale used in language filters
    pub fn with_locale(mut self, locale: &'a str) -> Self {
        self.locale = locale;
        self
    }

    /// Add identifiers to the batch, dropping duplicates while keeping
    /// first-seen order. Identifiers that cannot appear inside an IRI
    /// reference are dropped: they could never match a stored subject,
    /// and rendering them would corrupt the VALUES block.
    pub fn with_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in ids {
            let id = id.into();
            if id.is_empty() || id.chars().any(forbidden_in_iri_ref) {
                continue;
            }
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
        self
    }

    /// Render the query text
    pub fn build(&self) -> String {
        let mut q = String::new();

        q.push_str("CONSTRUCT {\n");
        q.push_str(&format!("  ?this a <{}> .\n", self.mapping.class));
        for rule in self.mapping.rules {
            self.push_construct_patterns(&mut q, rule);
        }
        q.push_str("}\nWHERE {\n");

        q.push_str("  VALUES ?this {");
        for id in &self.ids {
            q.push_str(&format!(" <{}>", id));
        }
        q.push_str(" }\n");
        q.push_str(&format!("  ?this a <{}> .\n", self.mapping.class));

        for rule in self.mapping.rules {
            self.push_where_block(&mut q, rule);
        }

        q.push_str("}\n");
        q
    }

    /// Template triples one rule contributes to the constructed graph.
    /// Multi-step paths collapse to their head predicate here, so the
    /// response always links values directly to the entity.
    fn push_construct_patterns(&self, q: &mut String, rule: &PropertyRule) {
        let var = rule.field;
        q.push_str(&format!("  ?this <{}> ?{} .\n", rule.path[0], var));

        match rule.kind {
            FieldKind::Thing | FieldKind::ThingList => {
                q.push_str(&format!("  ?{} <{}> ?{}_name .\n", var, vocab::NAME, var));
            }
            FieldKind::Measurements => {
                q.push_str(&format!(
                    "  ?{} <{}> ?{}_value .\n",
                    var,
                    vocab::MEASUREMENT_VALUE,
                    var
                ));
                q.push_str(&format!(
                    "  ?{} <{}> ?{}_metric .\n",
                    var,
                    vocab::MEASUREMENT_OF,
                    var
                ));
                q.push_str(&format!(
                    "  ?{}_metric <{}> ?{}_metric_order .\n",
                    var,
                    vocab::ORDER,
                    var
                ));
                q.push_str(&format!(
                    "  ?{}_metric <{}> ?{}_metric_name .\n",
                    var,
                    vocab::NAME,
                    var
                ));
            }
            _ => {}
        }
    }

    /// One OPTIONAL block per rule in the WHERE clause
    fn push_where_block(&self, q: &mut String, rule: &PropertyRule) {
        let var = rule.field;
        let path_expr = rule
            .path
            .iter()
            .map(|p| format!("<{}>", p))
            .collect::<Vec<_>>()
            .join("/");

        q.push_str("  OPTIONAL {\n");
        q.push_str(&format!("    ?this {} ?{} .\n", path_expr, var));
        if rule.language_tagged {
            q.push_str(&self.lang_filter(var, "    "));
        }

        match rule.kind {
            FieldKind::Thing | FieldKind::ThingList => {
                q.push_str("    OPTIONAL {\n");
                q.push_str(&format!(
                    "      ?{} <{}> ?{}_name .\n",
                    var,
                    vocab::NAME,
                    var
                ));
                q.push_str(&self.lang_filter(&format!("{}_name", var), "      "));
                q.push_str("    }\n");
            }
            FieldKind::Measurements => {
                q.push_str(&format!(
                    "    ?{} <{}> ?{}_value .\n",
                    var,
                    vocab::MEASUREMENT_VALUE,
                    var
                ));
                q.push_str(&format!(
                    "    ?{} <{}> ?{}_metric .\n",
                    var,
                    vocab::MEASUREMENT_OF,
                    var
                ));
                q.push_str(&format!(
                    "    ?{}_metric <{}> ?{}_metric_order .\n",
                    var,
                    vocab::ORDER,
                    var
                ));
                q.push_str("    OPTIONAL {\n");
                q.push_str(&format!(
                    "      ?{}_metric <{}> ?{}_metric_name .\n",
                    var,
                    vocab::NAME,
                    var
                ));
                q.push_str(&self.lang_filter(&format!("{}_metric_name", var), "      "));
                q.push_str("    }\n");
            }
            _ => {}
        }

        q.push_str("  }\n");
    }

    fn lang_filter(&self, var: &str, indent: &str) -> String {
        format!(
            "{}FILTER(LANG(?{}) = \"\" || LANGMATCHES(LANG(?{}), \"{}\"))\n",
            indent, var, var, self.locale
        )
    }
}

/// Characters the IRIREF production excludes
fn forbidden_in_iri_ref(c: char) -> bool {
    c <= '\u{20}' || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\')
}
