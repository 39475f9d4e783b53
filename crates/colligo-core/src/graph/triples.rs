//! Triple model and N-Triples parsing
//!
//! The graph store answers CONSTRUCT queries with N-Triples. This module
//! parses that wire form into a small term model the resource graph is
//! built from. Terms keep their language tags and datatypes; blank nodes
//! keep their response-scoped labels.

use sophia::api::prelude::*;
// The statement struct below shadows the trait name; the anonymous
// import keeps `.s()`/`.p()`/`.o()` resolvable.
use sophia::api::triple::Triple as _;

use crate::error::{Error, Result};

/// A literal value with its optional language tag and datatype IRI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub lexical: String,
    pub language: Option<String>,
    pub datatype: Option<String>,
}

/// One RDF term
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// An IRI reference
    Iri(String),
    /// A blank node label, without the `_:` prefix
    Blank(String),
    /// A literal value
    Literal(Literal),
}

impl Term {
    /// Resource key for graph lookup: the IRI, or the prefixed blank
    /// node label. Literals have no key.
    pub fn node_key(&self) -> Option<String> {
        match self {
            Term::Iri(iri) => Some(iri.clone()),
            Term::Blank(label) => Some(format!("_:{}", label)),
            Term::Literal(_) => None,
        }
    }

    /// The literal, if this term is one
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// The IRI, if this term is one
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }
}

/// One parsed statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub subject: Term,
    pub predicate: String,
    pub object: Term,
}

/// Sink error for the sophia streaming parser
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
struct TermParseError {
    message: String,
}

impl TermParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Parse an N-Triples document into triples
///
/// Statements whose predicate is not an IRI are skipped; anything the
/// parser rejects fails the whole response, since a malformed body means
/// the store did not answer what we asked.
pub fn parse_ntriples(body: &str) -> Result<Vec<Triple>> {
    let reader = std::io::BufReader::new(std::io::Cursor::new(body.as_bytes()));
    let mut triples: Vec<Triple> = Vec::new();

    let mut parser = sophia::turtle::parser::nt::parse_bufread(reader);
    parser
        .try_for_each_triple(|t| -> std::result::Result<(), TermParseError> {
            let subject = parse_term(&t.s().to_string())?;
            if matches!(subject, Term::Literal(_)) {
                return Err(TermParseError::new("literal in subject position"));
            }
            let Term::Iri(predicate) = parse_term(&t.p().to_string())? else {
                return Ok(());
            };
            let object = parse_term(&t.o().to_string())?;
            triples.push(Triple {
                subject,
                predicate,
                object,
            });
            Ok(())
        })
        .map_err(|e| Error::TripleParse(e.to_string()))?;

    Ok(triples)
}

/// Parse a term from its N-Triples display form
fn parse_term(term: &str) -> std::result::Result<Term, TermParseError> {
    let s = term.trim();

    if let Some(iri) = s.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
        return Ok(Term::Iri(iri.to_string()));
    }

    if let Some(label) = s.strip_prefix("_:") {
        return Ok(Term::Blank(label.to_string()));
    }

    if s.starts_with('"') {
        let end = closing_quote(s)
            .ok_or_else(|| TermParseError::new(format!("unterminated literal: {}", s)))?;
        let lexical = unescape(&s[1..end]);
        let rest = s[end + 1..].trim();

        let (language, datatype) = if let Some(lang) = rest.strip_prefix('@') {
            (Some(lang.to_string()), None)
        } else if let Some(dt) = rest.strip_prefix("^^") {
            let dt = dt.trim();
            let iri = dt
                .strip_prefix('<')
                .and_then(|t| t.strip_suffix('>'))
                .unwrap_or(dt);
            (None, Some(iri.to_string()))
        } else {
            (None, None)
        };

        return Ok(Term::Literal(Literal {
            lexical,
            language,
            datatype,
        }));
    }

    Err(TermParseError::new(format!("unsupported term form: {}", s)))
}

/// Byte index of the unescaped closing quote of a literal starting at 0
fn closing_quote(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Resolve N-Triples string escapes, including \uXXXX and \UXXXXXXXX
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('u') => push_unicode_escape(&mut out, &mut chars, 4),
            Some('U') => push_unicode_escape(&mut out, &mut chars, 8),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn push_unicode_escape(out: &mut String, chars: &mut std::str::Chars<'_>, len: usize) {
    let hex: String = chars.by_ref().take(len).collect();
    match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
        Some(c) => out.push(c),
        None => {
            // Keep the malformed escape verbatim rather than dropping data
            out.push('\\');
            out.push_str(&hex);
        }
    }
}
