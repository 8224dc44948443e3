//! Document root location and assembly.
//!
//! The assembler finds the unique root node typed `SpdxDocument`, builds
//! the document-only fields, delegates everything nested to the entity
//! builders, dispatches leftover root-level nodes, and finishes with the
//! one required reconciliation pass: collecting files no package owns.

use crate::error::{ParseError, Result};
use crate::ident::{DocElementId, ElementId};
use crate::model::{
    Actor, ChecksumContext, CreationInfo, Document, ExternalDocumentRef, SpecRevision,
};
use crate::rdf::graph::{Node, TripleGraph};
use crate::rdf::vocab::{self, classify, Term};
use crate::rdf::{
    literal_datetime, literal_str, lookup_predicate, Parser, Pred, PredicateRow,
};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
enum DocField {
    Type,
    SpecVersion,
    DataLicense,
    Name,
    Comment,
    CreationInfo,
    ExternalDocumentRef,
    ExtractedLicensingInfo,
    DescribesPackage,
    ReferencesFile,
    Relationship,
    Annotation,
    Reviewed,
}

use SpecRevision::{V2_1, V2_2, V2_3};

#[rustfmt::skip]
const DOCUMENT_PREDICATES: &[PredicateRow<DocField>] = &[
    (Pred::Rdf("type"),                        V2_1, V2_3, DocField::Type),
    (Pred::Spdx("specVersion"),                V2_1, V2_3, DocField::SpecVersion),
    (Pred::Spdx("dataLicense"),                V2_1, V2_3, DocField::DataLicense),
    (Pred::Spdx("name"),                       V2_1, V2_3, DocField::Name),
    (Pred::Rdfs("comment"),                    V2_1, V2_3, DocField::Comment),
    (Pred::Spdx("creationInfo"),               V2_1, V2_3, DocField::CreationInfo),
    (Pred::Spdx("externalDocumentRef"),        V2_1, V2_3, DocField::ExternalDocumentRef),
    (Pred::Spdx("hasExtractedLicensingInfo"),  V2_1, V2_3, DocField::ExtractedLicensingInfo),
    (Pred::Spdx("describesPackage"),           V2_1, V2_3, DocField::DescribesPackage),
    (Pred::Spdx("referencesFile"),             V2_1, V2_2, DocField::ReferencesFile),
    (Pred::Spdx("relationship"),               V2_1, V2_3, DocField::Relationship),
    (Pred::Spdx("annotation"),                 V2_1, V2_3, DocField::Annotation),
    (Pred::Spdx("reviewed"),                   V2_1, V2_2, DocField::Reviewed),
];

/// Locate the unique root-level node typed `SpdxDocument`. Only subjects
/// that never appear as an object are considered, so nested references
/// to other documents cannot produce false positives.
pub(crate) fn find_root(graph: &TripleGraph) -> Result<&Node> {
    let mut found: Option<&Node> = None;
    for node in graph.subjects() {
        if !graph.is_root(&node.value) {
            continue;
        }
        let Some(type_uri) = graph.node_type(node)? else {
            continue;
        };
        if classify(&type_uri) == Term::Spdx("SpdxDocument") {
            if found.is_some() {
                return Err(ParseError::ambiguous(
                    "more than one root node typed SpdxDocument".to_string(),
                ));
            }
            found = Some(node);
        }
    }
    found.ok_or_else(|| {
        ParseError::missing_field("SpdxDocument root node", "the supplied triple graph")
    })
}

/// The root node's `specVersion` literal, if it carries one.
pub(crate) fn spec_version_literal(graph: &TripleGraph, root: &Node) -> Result<Option<String>> {
    for &idx in graph.attached(root) {
        let triple = graph.triple(idx);
        if classify(&triple.predicate) == Term::Spdx("specVersion") {
            return literal_str(triple, "specVersion").map(|s| Some(s.to_string()));
        }
    }
    Ok(None)
}

impl Parser<'_> {
    /// Drive the whole parse: one fully-populated document out, or the
    /// first error encountered.
    pub(crate) fn assemble(mut self) -> Result<Document> {
        let root = find_root(self.graph)?;
        debug!(root = %root.value, revision = %self.revision, "located document root");

        let spdx_id = ElementId::parse(root.suffix())
            .map_err(|e| e.context(format!("identifier of document root {root}")))?;
        let namespace = vocab::uri_base(&root.value).map(str::to_string);
        let doc_ref = DocElementId::local(spdx_id.clone());

        let mut spdx_version: Option<String> = None;
        let mut data_license: Option<String> = None;
        let mut name: Option<String> = None;
        let mut comment: Option<String> = None;
        let mut creation_info = CreationInfo::default();
        let mut external_document_refs = Vec::new();

        for &idx in self.graph.attached(root) {
            let triple = self.graph.triple(idx);
            let Some(field) =
                lookup_predicate(DOCUMENT_PREDICATES, classify(&triple.predicate), self.revision)
            else {
                return Err(ParseError::unknown_predicate(
                    &triple.predicate,
                    "SpdxDocument",
                    root.value.clone(),
                ));
            };
            let object = triple.object.clone();
            match field {
                DocField::Type => {}
                DocField::SpecVersion => {
                    spdx_version = Some(literal_str(triple, "specVersion")?.to_string());
                }
                DocField::DataLicense => {
                    // Either a license-list IRI or a plain literal.
                    data_license = Some(if object.is_literal() {
                        object.value.clone()
                    } else {
                        object.suffix().to_string()
                    });
                }
                DocField::Name => {
                    name = Some(literal_str(triple, "name")?.to_string());
                }
                DocField::Comment => {
                    comment = Some(literal_str(triple, "comment")?.to_string());
                }
                DocField::CreationInfo => {
                    creation_info = self.build_creation_info(&object)?;
                }
                DocField::ExternalDocumentRef => {
                    external_document_refs.push(self.build_external_document_ref(&object)?);
                }
                DocField::ExtractedLicensingInfo => {
                    let parsed = self.parse_license(&object)?;
                    match parsed {
                        crate::model::AnyLicenseInfo::Extracted(info) => {
                            self.other_licenses.push(info);
                        }
                        other => {
                            return Err(ParseError::invalid_value(
                                "hasExtractedLicensingInfo",
                                other.flatten(),
                            ));
                        }
                    }
                }
                DocField::DescribesPackage => {
                    self.build_package(&object)?;
                }
                DocField::ReferencesFile => {
                    self.build_file(&object)?;
                }
                DocField::Relationship => {
                    self.build_relationship(doc_ref.clone(), &object)?;
                }
                DocField::Annotation => {
                    self.build_annotation(doc_ref.clone(), &object)?;
                }
                DocField::Reviewed => {
                    self.build_review(&object)?;
                }
            }
        }

        self.dispatch_remaining_roots(&root.value)?;
        self.wire_snippets()?;

        // The one required second pass, after all other parsing: files no
        // has-file edge ever reached become the document's own.
        let unpackaged_file_ids: Vec<String> = self
            .files
            .keys()
            .filter(|id| !self.packaged_files.contains(*id))
            .cloned()
            .collect();
        debug!(
            packages = self.packages.len(),
            files = self.files.len(),
            unpackaged = unpackaged_file_ids.len(),
            snippets = self.snippets.len(),
            relationships = self.relationships.len(),
            "assembly complete"
        );

        Ok(Document {
            revision: self.revision,
            spdx_version: spdx_version.unwrap_or_else(|| self.revision.spec_version().to_string()),
            data_license: data_license
                .ok_or_else(|| ParseError::missing_field("dataLicense", root.value.clone()))?,
            spdx_id,
            name,
            namespace,
            comment,
            creation_info,
            external_document_refs,
            packages: self.packages,
            files: self.files,
            unpackaged_file_ids,
            snippets: self.snippets,
            other_licenses: self.other_licenses,
            relationships: self.relationships,
            annotations: self.annotations,
            reviews: self.reviews,
        })
    }

    /// Every root-level node the document walk never consumed: detached
    /// snippets attach to their file; anything else is left behind.
    fn dispatch_remaining_roots(&mut self, root_value: &str) -> Result<()> {
        let leftovers: Vec<Node> = self
            .graph
            .subjects()
            .filter(|node| {
                node.value != root_value
                    && self.graph.is_root(&node.value)
                    && !self.entities.visited(&node.value)
                    && !self.licenses.visited(&node.value)
            })
            .cloned()
            .collect();
        for node in leftovers {
            // A node already pulled in through an edge since the filter ran.
            if self.entities.visited(&node.value) {
                continue;
            }
            let Some(type_uri) = self.graph.node_type(&node)? else {
                debug!(node = %node, "skipping untyped root-level node");
                continue;
            };
            match classify(&type_uri) {
                Term::Spdx("Snippet") => {
                    self.build_snippet(&node)?;
                }
                _ => {
                    debug!(node = %node, node_type = %type_uri, "skipping unconsumed root-level node");
                }
            }
        }
        Ok(())
    }

    /// Attach each snippet's id onto its owning file; a snippet whose file
    /// never materialized is an unresolved reference.
    fn wire_snippets(&mut self) -> Result<()> {
        let pairs: Vec<(String, String)> = self
            .snippets
            .iter()
            .map(|(id, snippet)| (id.clone(), snippet.file_id.clone()))
            .collect();
        for (snippet_id, file_id) in pairs {
            let Some(file) = self.files.get_mut(&file_id) else {
                return Err(ParseError::unresolved(
                    format!("SPDXRef-{file_id}"),
                    format!("snippet SPDXRef-{snippet_id} is carved from an unknown file"),
                ));
            };
            file.snippet_ids.push(snippet_id);
        }
        Ok(())
    }

    fn build_creation_info(&mut self, node: &Node) -> Result<CreationInfo> {
        let mut info = CreationInfo::default();
        for &idx in self.graph.attached(node) {
            let triple = self.graph.triple(idx);
            match classify(&triple.predicate) {
                Term::Rdf("type") => {}
                Term::Spdx("creator") => {
                    info.creators
                        .push(Actor::parse(literal_str(triple, "creator")?, "creator")?);
                }
                Term::Spdx("created") => {
                    info.created = Some(literal_datetime(triple, "created")?);
                }
                Term::Spdx("licenseListVersion") => {
                    info.license_list_version =
                        Some(literal_str(triple, "licenseListVersion")?.to_string());
                }
                Term::Rdfs("comment") => {
                    info.comment = Some(literal_str(triple, "comment")?.to_string());
                }
                _ => {
                    return Err(ParseError::unknown_predicate(
                        &triple.predicate,
                        "CreationInfo",
                        node.value.clone(),
                    ));
                }
            }
        }
        Ok(info)
    }

    fn build_external_document_ref(&mut self, node: &Node) -> Result<ExternalDocumentRef> {
        let mut doc_ref_id: Option<String> = None;
        let mut spdx_document: Option<String> = None;
        let mut checksum = None;
        for &idx in self.graph.attached(node) {
            let triple = self.graph.triple(idx);
            let object = triple.object.clone();
            match classify(&triple.predicate) {
                Term::Rdf("type") => {}
                Term::Spdx("externalDocumentId") => {
                    let raw = literal_str(triple, "externalDocumentId")?;
                    match DocElementId::parse(raw)? {
                        DocElementId::DocRef(doc) => doc_ref_id = Some(doc),
                        _ => {
                            return Err(ParseError::malformed_identifier(
                                raw,
                                "externalDocumentId must be a bare DocumentRef",
                            ));
                        }
                    }
                }
                Term::Spdx("spdxDocument") => {
                    spdx_document = Some(object.value.clone());
                }
                Term::Spdx("checksum") => {
                    checksum =
                        Some(self.build_checksum(&object, ChecksumContext::ExternalDocumentRef)?);
                }
                _ => {
                    return Err(ParseError::unknown_predicate(
                        &triple.predicate,
                        "ExternalDocumentRef",
                        node.value.clone(),
                    ));
                }
            }
        }
        Ok(ExternalDocumentRef {
            doc_ref_id: doc_ref_id.ok_or_else(|| {
                ParseError::missing_field("externalDocumentId", node.value.clone())
            })?,
            spdx_document: spdx_document
                .ok_or_else(|| ParseError::missing_field("spdxDocument", node.value.clone()))?,
            checksum: checksum
                .ok_or_else(|| ParseError::missing_field("checksum", node.value.clone()))?,
        })
    }
}
