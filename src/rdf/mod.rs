//! The RDF ingestion engine: an unordered, possibly cyclic triple set in,
//! a fully-typed [`Document`] out.
//!
//! The triple list comes from an external RDF/XML tokenizer; this module
//! indexes it ([`graph`]), walks it with one memoized cycle-tolerant
//! walker ([`walk`]), parses the license-expression sub-grammar
//! ([`license`]), builds each entity kind from the triples attached to
//! its node, and assembles the document root ([`document`]).
//!
//! Parsing is strict and closed-world: the first unrecognized predicate,
//! malformed identifier, or structural ambiguity aborts the whole parse.

pub mod graph;
pub mod vocab;

mod annotation;
mod checksum;
mod document;
mod file;
mod license;
mod package;
mod relationship;
mod snippet;
mod walk;

pub use graph::{Node, NodeKind, Triple, TripleGraph};
pub use walk::{CyclePolicy, VisitMap};

use crate::error::{ParseError, Result};
use crate::ident::ElementId;
use crate::model::{
    Annotation, AnyLicenseInfo, Document, ExtractedLicensingInfo, File, Package, Relationship,
    Review, Snippet, SpecRevision,
};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Parse a triple set into a document under an explicitly chosen revision.
///
/// The revision selects the predicate tables and checksum policy; the
/// root node's own `specVersion` literal is recorded verbatim but not
/// cross-checked against it.
pub fn parse_document(revision: SpecRevision, triples: Vec<Triple>) -> Result<Document> {
    let graph = TripleGraph::new(triples);
    Parser::new(revision, &graph).assemble()
}

/// Parse a triple set, sniffing the revision from the root node's
/// `specVersion` literal.
pub fn parse_document_auto(triples: Vec<Triple>) -> Result<Document> {
    let graph = TripleGraph::new(triples);
    let root = document::find_root(&graph)?;
    let version = document::spec_version_literal(&graph, root)?.ok_or_else(|| {
        ParseError::missing_field("specVersion", root.value.clone())
    })?;
    let revision = SpecRevision::from_spec_version(&version)
        .ok_or_else(|| ParseError::invalid_value("specVersion", version))?;
    Parser::new(revision, &graph).assemble()
}

/// The shared reference an entity walk hands out: the entity's bare
/// element id, tagged with its kind. Consumers resolve it through the
/// arenas, so a reference taken while the entity was still Grey can never
/// expose a half-built object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EntityRef {
    Package(String),
    File(String),
    Snippet(String),
}

impl EntityRef {
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Self::Package(_) => "Package",
            Self::File(_) => "File",
            Self::Snippet(_) => "Snippet",
        }
    }
}

/// One parse invocation: the triple index plus every piece of shared
/// mutable state. Fresh per call; never reused across parses.
pub(crate) struct Parser<'g> {
    revision: SpecRevision,
    graph: &'g TripleGraph,
    entities: VisitMap<EntityRef>,
    licenses: VisitMap<AnyLicenseInfo>,
    packages: IndexMap<String, Package>,
    files: IndexMap<String, File>,
    snippets: IndexMap<String, Snippet>,
    /// File ids reached through a has-file edge; everything else becomes
    /// an unpackaged file in the final pass.
    packaged_files: HashSet<String>,
    relationships: Vec<Relationship>,
    annotations: Vec<Annotation>,
    reviews: Vec<Review>,
    other_licenses: Vec<ExtractedLicensingInfo>,
}

impl<'g> Parser<'g> {
    pub(crate) fn new(revision: SpecRevision, graph: &'g TripleGraph) -> Self {
        Self {
            revision,
            graph,
            entities: VisitMap::new(),
            licenses: VisitMap::new(),
            packages: IndexMap::new(),
            files: IndexMap::new(),
            snippets: IndexMap::new(),
            packaged_files: HashSet::new(),
            relationships: Vec::new(),
            annotations: Vec::new(),
            reviews: Vec::new(),
            other_licenses: Vec::new(),
        }
    }

    /// The element id carried by an entity node's IRI suffix.
    pub(crate) fn element_id_of(node: &Node, kind: &'static str) -> Result<ElementId> {
        ElementId::parse(node.suffix())
            .map_err(|e| e.context(format!("identifier of {kind} node {node}")))
    }
}

// ---------------------------------------------------------------------------
// Predicate tables
// ---------------------------------------------------------------------------

/// A predicate pattern in one of the known namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pred {
    Rdf(&'static str),
    Rdfs(&'static str),
    Spdx(&'static str),
    Doap(&'static str),
}

impl Pred {
    fn matches(self, term: vocab::Term<'_>) -> bool {
        use vocab::Term;
        match (self, term) {
            (Self::Rdf(a), Term::Rdf(b)) => a == b,
            (Self::Rdfs(a), Term::Rdfs(b)) => a == b,
            (Self::Spdx(a), Term::Spdx(b)) => a == b,
            (Self::Doap(a), Term::Doap(b)) => a == b,
            _ => false,
        }
    }
}

/// One predicate-table row: the predicate, the revision window it exists
/// in (inclusive on both ends), and the field it maps to.
pub(crate) type PredicateRow<F> = (Pred, SpecRevision, SpecRevision, F);

/// Look a predicate up in a node kind's table under the active revision.
/// `None` means the predicate is outside the closed-world schema and the
/// caller must fail with [`ParseError::UnknownPredicate`].
pub(crate) fn lookup_predicate<F: Copy>(
    table: &[PredicateRow<F>],
    term: vocab::Term<'_>,
    revision: SpecRevision,
) -> Option<F> {
    table.iter().find_map(|&(pred, since, until, field)| {
        (pred.matches(term) && revision >= since && revision <= until).then_some(field)
    })
}

// ---------------------------------------------------------------------------
// Literal coercion helpers shared by the builders
// ---------------------------------------------------------------------------

/// The object of a triple as a literal string.
pub(crate) fn literal_str<'a>(triple: &'a Triple, field: &'static str) -> Result<&'a str> {
    if triple.object.is_literal() {
        Ok(&triple.object.value)
    } else {
        Err(ParseError::invalid_value(
            field,
            format!("expected a literal, found {}", triple.object),
        ))
    }
}

/// A boolean field; exactly `"true"` or `"false"`, nothing else.
pub(crate) fn literal_bool(triple: &Triple, field: &'static str) -> Result<bool> {
    match literal_str(triple, field)? {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(ParseError::invalid_value(field, other)),
    }
}

/// An RFC3339 timestamp field.
pub(crate) fn literal_datetime(triple: &Triple, field: &'static str) -> Result<DateTime<Utc>> {
    let s = literal_str(triple, field)?;
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ParseError::invalid_value(field, s))
}

/// A non-negative integer field (range offsets, line numbers).
pub(crate) fn literal_u64(triple: &Triple, field: &'static str) -> Result<u64> {
    let s = literal_str(triple, field)?;
    s.trim()
        .parse::<u64>()
        .map_err(|_| ParseError::invalid_value(field, s))
}

/// Check a string is a syntactically valid absolute URI.
pub(crate) fn validate_uri(s: &str, _field: &'static str) -> Result<()> {
    url::Url::parse(s)
        .map(|_| ())
        .map_err(|e| ParseError::invalid_uri(s, e.to_string()))
}
