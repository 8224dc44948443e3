//! File node builder.

use crate::error::{ParseError, Result};
use crate::ident::DocElementId;
use crate::model::{ArtifactOf, ChecksumContext, File, FileType, SpecRevision};
use crate::rdf::graph::Node;
use crate::rdf::vocab::{classify, Term};
use crate::rdf::walk::CyclePolicy;
use crate::rdf::{
    literal_str, lookup_predicate, EntityRef, Parser, Pred, PredicateRow,
};

#[derive(Debug, Clone, Copy)]
enum FileField {
    Type,
    Name,
    FileType,
    Checksum,
    LicenseConcluded,
    LicenseInfoInFile,
    LicenseComments,
    CopyrightText,
    Comment,
    NoticeText,
    Contributor,
    AttributionText,
    FileDependency,
    ArtifactOf,
    Relationship,
    Annotation,
}

use SpecRevision::{V2_1, V2_2, V2_3};

#[rustfmt::skip]
const FILE_PREDICATES: &[PredicateRow<FileField>] = &[
    (Pred::Rdf("type"),                  V2_1, V2_3, FileField::Type),
    (Pred::Spdx("fileName"),             V2_1, V2_3, FileField::Name),
    (Pred::Spdx("fileType"),             V2_1, V2_3, FileField::FileType),
    (Pred::Spdx("checksum"),             V2_1, V2_3, FileField::Checksum),
    (Pred::Spdx("licenseConcluded"),     V2_1, V2_3, FileField::LicenseConcluded),
    (Pred::Spdx("licenseInfoInFile"),    V2_1, V2_3, FileField::LicenseInfoInFile),
    (Pred::Spdx("licenseComments"),      V2_1, V2_3, FileField::LicenseComments),
    (Pred::Spdx("copyrightText"),        V2_1, V2_3, FileField::CopyrightText),
    (Pred::Rdfs("comment"),              V2_1, V2_3, FileField::Comment),
    (Pred::Spdx("noticeText"),           V2_1, V2_3, FileField::NoticeText),
    (Pred::Spdx("fileContributor"),      V2_1, V2_3, FileField::Contributor),
    (Pred::Spdx("attributionText"),      V2_2, V2_3, FileField::AttributionText),
    (Pred::Spdx("fileDependency"),       V2_1, V2_3, FileField::FileDependency),
    (Pred::Spdx("artifactOf"),           V2_1, V2_2, FileField::ArtifactOf),
    (Pred::Spdx("relationship"),         V2_1, V2_3, FileField::Relationship),
    (Pred::Spdx("annotation"),           V2_1, V2_3, FileField::Annotation),
];

/// Prefix on `fileType` URI suffixes.
const FILE_TYPE_PREFIX: &str = "fileType_";

impl Parser<'_> {
    /// Build the file at `node`, returning its bare element id.
    ///
    /// A node with no attached triples is a bare reference to a file
    /// defined elsewhere (or nowhere): the id parses but no record is
    /// created. Cyclic re-entry shares the id of the file under
    /// construction.
    pub(crate) fn build_file(&mut self, node: &Node) -> Result<String> {
        match self.entities.check(&node.value, CyclePolicy::ShareExisting)? {
            Some(EntityRef::File(id)) => return Ok(id),
            Some(other) => {
                return Err(ParseError::ambiguous(format!(
                    "node {node} is referenced as both a {} and a File",
                    other.describe()
                )));
            }
            None => {}
        }

        let id = Self::element_id_of(node, "File")?;
        let key = id.as_str().to_string();
        if !self.graph.describes(node) {
            return Ok(key);
        }

        self.entities
            .begin(node.value.clone(), Some(EntityRef::File(key.clone())));
        self.files.insert(key.clone(), File::new(key.clone()));

        let mut file = File::new(key.clone());
        let from = DocElementId::local(id);
        for &idx in self.graph.attached(node) {
            let triple = self.graph.triple(idx);
            let Some(field) =
                lookup_predicate(FILE_PREDICATES, classify(&triple.predicate), self.revision)
            else {
                return Err(ParseError::unknown_predicate(
                    &triple.predicate,
                    "File",
                    node.value.clone(),
                ));
            };
            let object = triple.object.clone();
            match field {
                FileField::Type => {}
                FileField::Name => {
                    file.name = literal_str(triple, "fileName")?.to_string();
                }
                FileField::FileType => {
                    let token = object
                        .suffix()
                        .strip_prefix(FILE_TYPE_PREFIX)
                        .ok_or_else(|| {
                            ParseError::invalid_value("fileType", object.value.clone())
                        })?;
                    file.file_types.push(
                        FileType::from_uri_token(token)
                            .ok_or_else(|| ParseError::invalid_value("fileType", token))?,
                    );
                }
                FileField::Checksum => {
                    file.checksums
                        .push(self.build_checksum(&object, ChecksumContext::File)?);
                }
                FileField::LicenseConcluded => {
                    file.license_concluded = Some(self.parse_license(&object)?);
                }
                FileField::LicenseInfoInFile => {
                    file.license_info_in_files.push(self.parse_license(&object)?);
                }
                FileField::LicenseComments => {
                    file.license_comments =
                        Some(literal_str(triple, "licenseComments")?.to_string());
                }
                FileField::CopyrightText => {
                    file.copyright_text = Some(literal_str(triple, "copyrightText")?.to_string());
                }
                FileField::Comment => {
                    file.comment = Some(literal_str(triple, "comment")?.to_string());
                }
                FileField::NoticeText => {
                    file.notice_text = Some(literal_str(triple, "noticeText")?.to_string());
                }
                FileField::Contributor => {
                    file.contributors
                        .push(literal_str(triple, "fileContributor")?.to_string());
                }
                FileField::AttributionText => {
                    file.attribution_texts
                        .push(literal_str(triple, "attributionText")?.to_string());
                }
                FileField::FileDependency => {
                    // A co-reference to another file, not ownership.
                    let dep_id = self.build_file(&object)?;
                    file.dependency_ids.push(dep_id);
                }
                FileField::ArtifactOf => {
                    file.artifact_of.push(self.build_artifact_of(&object)?);
                }
                FileField::Relationship => {
                    self.build_relationship(from.clone(), &object)?;
                }
                FileField::Annotation => {
                    self.build_annotation(from.clone(), &object)?;
                }
            }
        }

        if file.name.is_empty() {
            return Err(ParseError::missing_field("fileName", node.value.clone()));
        }

        self.files.insert(key.clone(), file);
        self.entities
            .complete(&node.value, EntityRef::File(key.clone()));
        Ok(key)
    }

    fn build_artifact_of(&mut self, node: &Node) -> Result<ArtifactOf> {
        let mut artifact = ArtifactOf::default();
        for &idx in self.graph.attached(node) {
            let triple = self.graph.triple(idx);
            match classify(&triple.predicate) {
                Term::Rdf("type") => {}
                Term::Doap("name") => {
                    artifact.name = Some(literal_str(triple, "doap:name")?.to_string());
                }
                Term::Doap("homepage") => {
                    artifact.home_page = Some(triple.object.value.clone());
                }
                _ => {
                    return Err(ParseError::unknown_predicate(
                        &triple.predicate,
                        "ArtifactOf",
                        node.value.clone(),
                    ));
                }
            }
        }
        Ok(artifact)
    }
}
