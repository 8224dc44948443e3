//! **SPDX document interchange: versioned schemas and RDF triple-graph ingestion.**
//!
//! `spdx-interchange` defines in-memory SPDX document schemas for spec
//! revisions 2.1, 2.2, and 2.3, and turns an unordered, possibly cyclic
//! set of RDF (subject, predicate, object) triples — as produced by an
//! external RDF/XML tokenizer — into a fully-typed [`model::Document`]
//! graph, including a recursive-descent parser for the SPDX
//! license-expression sub-grammar.
//!
//! ## Key Properties
//!
//! - **Strict, closed-world parsing**: every predicate outside the schema
//!   for a node kind is a hard error, as are malformed identifiers,
//!   ambiguous structure, and out-of-policy checksum algorithms.
//! - **Cycle tolerance where the spec allows it**: self- and
//!   mutually-referential packages, files, and relationships parse to
//!   exactly one object per identity; a cyclic license expression is
//!   rejected with [`error::ParseError::CyclicLicenseReference`].
//! - **Revisions as data**: one set of structs covers all three
//!   revisions; field availability and checksum policy live in tables
//!   keyed by [`model::SpecRevision`].
//! - **Identifier fidelity**: element ids, cross-document ids, and the
//!   `NONE`/`NOASSERTION` tokens round-trip bit-exactly through the
//!   string forms in [`ident`].
//!
//! ## Core Concepts & Modules
//!
//! - **[`ident`]**: the identifier codec (`SPDXRef-`, `DocumentRef-`,
//!   special tokens).
//! - **[`model`]**: the typed document schemas. Entity arenas are
//!   insertion-ordered maps keyed by bare element id; cross-references
//!   store keys, never direct object references.
//! - **[`rdf`]**: the ingestion engine — triple index, cycle-tolerant
//!   node walker, license parser, entity builders, document assembler.
//! - **[`error`]**: the [`error::ParseError`] taxonomy and `Result` alias.
//!
//! ## Getting Started: Parsing a Triple Set
//!
//! ```
//! use spdx_interchange::rdf::{Node, Triple};
//! use spdx_interchange::parse_document_auto;
//!
//! const SPDX: &str = "http://spdx.org/rdf/terms#";
//! const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let doc = Node::iri("http://example.com/doc#SPDXRef-DOCUMENT");
//!     let triples = vec![
//!         Triple::new(doc.clone(), RDF_TYPE, Node::iri(format!("{SPDX}SpdxDocument"))),
//!         Triple::new(doc.clone(), format!("{SPDX}specVersion"), Node::literal("SPDX-2.3")),
//!         Triple::new(doc.clone(), format!("{SPDX}dataLicense"), Node::literal("CC0-1.0")),
//!         Triple::new(doc.clone(), format!("{SPDX}name"), Node::literal("example")),
//!     ];
//!
//!     let document = parse_document_auto(triples)?;
//!     assert_eq!(document.spdx_version, "SPDX-2.3");
//!     assert_eq!(document.name.as_deref(), Some("example"));
//!     Ok(())
//! }
//! ```
//!
//! The tokenizer, the tag-value codec, and all CLI surfaces are out of
//! scope for this crate; the triple list arrives fully materialized and
//! no network or filesystem calls are made.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]

pub mod error;
pub mod ident;
pub mod model;
pub mod rdf;

// Re-export main types for convenience
pub use error::{ErrorContext, ParseError, Result};
pub use ident::{DocElementId, ElementId, SpecialRef};
pub use model::{AnyLicenseInfo, Document, SpecRevision};
pub use rdf::{parse_document, parse_document_auto, Node, NodeKind, Triple, TripleGraph};
