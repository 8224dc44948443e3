//! The document root container.

use crate::ident::ElementId;
use crate::model::{
    Actor, Annotation, Checksum, ExtractedLicensingInfo, File, Package, Relationship, Review,
    Snippet, SpecRevision,
};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Who produced the document and when.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationInfo {
    /// Ordered as supplied by the input.
    pub creators: Vec<Actor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_list_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// A link from this document to an element space in another document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDocumentRef {
    /// The ref id without its `DocumentRef-` prefix.
    pub doc_ref_id: String,
    /// Namespace URI of the referenced document.
    pub spdx_document: String,
    pub checksum: Checksum,
}

/// A fully-assembled SPDX document.
///
/// Entity arenas are insertion-ordered maps keyed by bare element id;
/// every cross-reference elsewhere in the graph (package file lists,
/// snippet owners, relationship endpoints) stores such a key and resolves
/// through these arenas. The document is constructed once per parse call,
/// fully populated before it is returned, and never mutated afterward by
/// this subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub revision: SpecRevision,
    /// The verbatim `specVersion` value, e.g. `SPDX-2.3`.
    pub spdx_version: String,
    pub data_license: String,
    #[serde(rename = "SPDXID")]
    pub spdx_id: ElementId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub creation_info: CreationInfo,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub external_document_refs: Vec<ExternalDocumentRef>,
    /// All packages, in first-encounter order.
    pub packages: IndexMap<String, Package>,
    /// Every file in the document, packaged or not.
    pub files: IndexMap<String, File>,
    /// Ids of files no package owns; populated by the final assembly pass.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub unpackaged_file_ids: Vec<String>,
    pub snippets: IndexMap<String, Snippet>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub other_licenses: Vec<ExtractedLicensingInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub relationships: Vec<Relationship>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub annotations: Vec<Annotation>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub reviews: Vec<Review>,
}

impl Document {
    /// Look up a package by bare element id.
    #[must_use]
    pub fn package(&self, id: &str) -> Option<&Package> {
        self.packages.get(id)
    }

    /// Look up a file by bare element id.
    #[must_use]
    pub fn file(&self, id: &str) -> Option<&File> {
        self.files.get(id)
    }

    /// Look up a snippet by bare element id.
    #[must_use]
    pub fn snippet(&self, id: &str) -> Option<&Snippet> {
        self.snippets.get(id)
    }

    /// The files owned directly by the document, resolved through the arena.
    pub fn unpackaged_files(&self) -> impl Iterator<Item = &File> {
        self.unpackaged_file_ids
            .iter()
            .filter_map(|id| self.files.get(id))
    }
}
