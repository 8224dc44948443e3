//! Package node builder.
//!
//! The predicate schema is one static table gated by revision; lookup
//! happens once per triple and dispatch is an exhaustive match on the
//! field enum, so the closed world is both data and compiler-checked.

use crate::error::{ParseError, Result};
use crate::ident::DocElementId;
use crate::model::{
    ActorOrNoAssertion, ChecksumContext, ExternalRef, ExternalRefCategory, Package,
    PackagePurpose, PackageVerificationCode, SpecRevision,
};
use crate::rdf::graph::Node;
use crate::rdf::vocab::{classify, Term};
use crate::rdf::walk::CyclePolicy;
use crate::rdf::{
    literal_bool, literal_datetime, literal_str, lookup_predicate, validate_uri, EntityRef,
    Parser, Pred, PredicateRow,
};

#[derive(Debug, Clone, Copy)]
enum PackageField {
    Type,
    Name,
    Version,
    FileName,
    Supplier,
    Originator,
    DownloadLocation,
    FilesAnalyzed,
    VerificationCode,
    Checksum,
    HomePage,
    SourceInfo,
    LicenseConcluded,
    LicenseDeclared,
    LicenseInfoFromFiles,
    LicenseComments,
    CopyrightText,
    Summary,
    Description,
    Comment,
    ExternalRef,
    AttributionText,
    PrimaryPurpose,
    ReleaseDate,
    BuiltDate,
    ValidUntilDate,
    HasFile,
    Relationship,
    Annotation,
}

use SpecRevision::{V2_1, V2_2, V2_3};

#[rustfmt::skip]
const PACKAGE_PREDICATES: &[PredicateRow<PackageField>] = &[
    (Pred::Rdf("type"),                      V2_1, V2_3, PackageField::Type),
    (Pred::Spdx("name"),                     V2_1, V2_3, PackageField::Name),
    (Pred::Spdx("versionInfo"),              V2_1, V2_3, PackageField::Version),
    (Pred::Spdx("packageFileName"),          V2_1, V2_3, PackageField::FileName),
    (Pred::Spdx("supplier"),                 V2_1, V2_3, PackageField::Supplier),
    (Pred::Spdx("originator"),               V2_1, V2_3, PackageField::Originator),
    (Pred::Spdx("downloadLocation"),         V2_1, V2_3, PackageField::DownloadLocation),
    (Pred::Spdx("filesAnalyzed"),            V2_1, V2_3, PackageField::FilesAnalyzed),
    (Pred::Spdx("packageVerificationCode"),  V2_1, V2_3, PackageField::VerificationCode),
    (Pred::Spdx("checksum"),                 V2_1, V2_3, PackageField::Checksum),
    (Pred::Doap("homepage"),                 V2_1, V2_3, PackageField::HomePage),
    (Pred::Spdx("sourceInfo"),               V2_1, V2_3, PackageField::SourceInfo),
    (Pred::Spdx("licenseConcluded"),         V2_1, V2_3, PackageField::LicenseConcluded),
    (Pred::Spdx("licenseDeclared"),          V2_1, V2_3, PackageField::LicenseDeclared),
    (Pred::Spdx("licenseInfoFromFiles"),     V2_1, V2_3, PackageField::LicenseInfoFromFiles),
    (Pred::Spdx("licenseComments"),          V2_1, V2_3, PackageField::LicenseComments),
    (Pred::Spdx("copyrightText"),            V2_1, V2_3, PackageField::CopyrightText),
    (Pred::Spdx("summary"),                  V2_1, V2_3, PackageField::Summary),
    (Pred::Spdx("description"),              V2_1, V2_3, PackageField::Description),
    (Pred::Rdfs("comment"),                  V2_1, V2_3, PackageField::Comment),
    (Pred::Spdx("externalRef"),              V2_1, V2_3, PackageField::ExternalRef),
    (Pred::Spdx("attributionText"),          V2_2, V2_3, PackageField::AttributionText),
    (Pred::Spdx("primaryPackagePurpose"),    V2_3, V2_3, PackageField::PrimaryPurpose),
    (Pred::Spdx("releaseDate"),              V2_3, V2_3, PackageField::ReleaseDate),
    (Pred::Spdx("builtDate"),                V2_3, V2_3, PackageField::BuiltDate),
    (Pred::Spdx("validUntilDate"),           V2_3, V2_3, PackageField::ValidUntilDate),
    (Pred::Spdx("hasFile"),                  V2_1, V2_3, PackageField::HasFile),
    (Pred::Spdx("relationship"),             V2_1, V2_3, PackageField::Relationship),
    (Pred::Spdx("annotation"),               V2_1, V2_3, PackageField::Annotation),
];

/// Prefix on `primaryPackagePurpose` URI suffixes.
const PURPOSE_PREFIX: &str = "purpose_";
/// Prefix on `referenceCategory` URI suffixes.
const REF_CATEGORY_PREFIX: &str = "referenceCategory_";

impl Parser<'_> {
    /// Build the package at `node`, returning its bare element id.
    /// Re-entry through a cycle shares the id of the package under
    /// construction; the finished record lands in the package arena.
    pub(crate) fn build_package(&mut self, node: &Node) -> Result<String> {
        match self.entities.check(&node.value, CyclePolicy::ShareExisting)? {
            Some(EntityRef::Package(id)) => return Ok(id),
            Some(other) => {
                return Err(ParseError::ambiguous(format!(
                    "node {node} is referenced as both a {} and a Package",
                    other.describe()
                )));
            }
            None => {}
        }

        let id = Self::element_id_of(node, "Package")?;
        let key = id.as_str().to_string();
        self.entities
            .begin(node.value.clone(), Some(EntityRef::Package(key.clone())));
        // Reserve the arena slot now so the arena keeps encounter order.
        self.packages.insert(key.clone(), Package::new(key.clone()));

        let mut package = Package::new(key.clone());
        let from = DocElementId::local(id);
        for &idx in self.graph.attached(node) {
            let triple = self.graph.triple(idx);
            let Some(field) =
                lookup_predicate(PACKAGE_PREDICATES, classify(&triple.predicate), self.revision)
            else {
                return Err(ParseError::unknown_predicate(
                    &triple.predicate,
                    "Package",
                    node.value.clone(),
                ));
            };
            let object = triple.object.clone();
            match field {
                PackageField::Type => {}
                PackageField::Name => {
                    package.name = literal_str(triple, "name")?.to_string();
                }
                PackageField::Version => {
                    package.version = Some(literal_str(triple, "versionInfo")?.to_string());
                }
                PackageField::FileName => {
                    package.file_name = Some(literal_str(triple, "packageFileName")?.to_string());
                }
                PackageField::Supplier => {
                    let value = literal_str(triple, "supplier")?;
                    package.supplier = Some(ActorOrNoAssertion::parse(value, "supplier")?);
                }
                PackageField::Originator => {
                    let value = literal_str(triple, "originator")?;
                    package.originator = Some(ActorOrNoAssertion::parse(value, "originator")?);
                }
                PackageField::DownloadLocation => {
                    package.download_location = Some(download_location_value(&object)?);
                }
                PackageField::FilesAnalyzed => {
                    package.files_analyzed = Some(literal_bool(triple, "filesAnalyzed")?);
                }
                PackageField::VerificationCode => {
                    package.verification_code = Some(self.build_verification_code(&object)?);
                }
                PackageField::Checksum => {
                    package
                        .checksums
                        .push(self.build_checksum(&object, ChecksumContext::Package)?);
                }
                PackageField::HomePage => {
                    package.home_page = Some(object.value.clone());
                }
                PackageField::SourceInfo => {
                    package.source_info = Some(literal_str(triple, "sourceInfo")?.to_string());
                }
                PackageField::LicenseConcluded => {
                    package.license_concluded = Some(self.parse_license(&object)?);
                }
                PackageField::LicenseDeclared => {
                    package.license_declared = Some(self.parse_license(&object)?);
                }
                PackageField::LicenseInfoFromFiles => {
                    package
                        .license_info_from_files
                        .push(self.parse_license(&object)?);
                }
                PackageField::LicenseComments => {
                    package.license_comments =
                        Some(literal_str(triple, "licenseComments")?.to_string());
                }
                PackageField::CopyrightText => {
                    package.copyright_text =
                        Some(literal_str(triple, "copyrightText")?.to_string());
                }
                PackageField::Summary => {
                    package.summary = Some(literal_str(triple, "summary")?.to_string());
                }
                PackageField::Description => {
                    package.description = Some(literal_str(triple, "description")?.to_string());
                }
                PackageField::Comment => {
                    package.comment = Some(literal_str(triple, "comment")?.to_string());
                }
                PackageField::ExternalRef => {
                    package.external_refs.push(self.build_external_ref(&object)?);
                }
                PackageField::AttributionText => {
                    package
                        .attribution_texts
                        .push(literal_str(triple, "attributionText")?.to_string());
                }
                PackageField::PrimaryPurpose => {
                    package.primary_purpose = Some(purpose_value(&object)?);
                }
                PackageField::ReleaseDate => {
                    package.release_date = Some(literal_datetime(triple, "releaseDate")?);
                }
                PackageField::BuiltDate => {
                    package.built_date = Some(literal_datetime(triple, "builtDate")?);
                }
                PackageField::ValidUntilDate => {
                    package.valid_until_date = Some(literal_datetime(triple, "validUntilDate")?);
                }
                PackageField::HasFile => {
                    let file_id = self.build_file(&object)?;
                    self.packaged_files.insert(file_id.clone());
                    package.file_ids.push(file_id);
                }
                PackageField::Relationship => {
                    self.build_relationship(from.clone(), &object)?;
                }
                PackageField::Annotation => {
                    self.build_annotation(from.clone(), &object)?;
                }
            }
        }

        if package.name.is_empty() {
            return Err(ParseError::missing_field("name", node.value.clone()));
        }

        // Replacing the reserved slot keeps its arena position.
        self.packages.insert(key.clone(), package);
        self.entities
            .complete(&node.value, EntityRef::Package(key.clone()));
        Ok(key)
    }

    fn build_verification_code(&mut self, node: &Node) -> Result<PackageVerificationCode> {
        let mut code = PackageVerificationCode::default();
        let mut has_value = false;
        for &idx in self.graph.attached(node) {
            let triple = self.graph.triple(idx);
            match classify(&triple.predicate) {
                Term::Rdf("type") => {}
                Term::Spdx("packageVerificationCodeValue") => {
                    code.value = literal_str(triple, "packageVerificationCodeValue")?.to_string();
                    has_value = true;
                }
                Term::Spdx("packageVerificationCodeExcludedFile") => {
                    code.excluded_files.push(
                        literal_str(triple, "packageVerificationCodeExcludedFile")?.to_string(),
                    );
                }
                _ => {
                    return Err(ParseError::unknown_predicate(
                        &triple.predicate,
                        "PackageVerificationCode",
                        node.value.clone(),
                    ));
                }
            }
        }
        if !has_value {
            return Err(ParseError::missing_field(
                "packageVerificationCodeValue",
                node.value.clone(),
            ));
        }
        Ok(code)
    }

    fn build_external_ref(&mut self, node: &Node) -> Result<ExternalRef> {
        let mut category: Option<ExternalRefCategory> = None;
        let mut ref_type: Option<String> = None;
        let mut locator: Option<String> = None;
        let mut comment: Option<String> = None;
        for &idx in self.graph.attached(node) {
            let triple = self.graph.triple(idx);
            match classify(&triple.predicate) {
                Term::Rdf("type") => {}
                Term::Spdx("referenceCategory") => {
                    let token = triple
                        .object
                        .suffix()
                        .strip_prefix(REF_CATEGORY_PREFIX)
                        .ok_or_else(|| {
                            ParseError::invalid_value(
                                "referenceCategory",
                                triple.object.value.clone(),
                            )
                        })?;
                    category = Some(ExternalRefCategory::from_uri_token(token).ok_or_else(
                        || ParseError::invalid_value("referenceCategory", token),
                    )?);
                }
                Term::Spdx("referenceType") => {
                    ref_type = Some(triple.object.suffix().to_string());
                }
                Term::Spdx("referenceLocator") => {
                    locator = Some(literal_str(triple, "referenceLocator")?.to_string());
                }
                Term::Rdfs("comment") => {
                    comment = Some(literal_str(triple, "comment")?.to_string());
                }
                _ => {
                    return Err(ParseError::unknown_predicate(
                        &triple.predicate,
                        "ExternalRef",
                        node.value.clone(),
                    ));
                }
            }
        }
        Ok(ExternalRef {
            category: category
                .ok_or_else(|| ParseError::missing_field("referenceCategory", node.value.clone()))?,
            ref_type: ref_type
                .ok_or_else(|| ParseError::missing_field("referenceType", node.value.clone()))?,
            locator: locator
                .ok_or_else(|| ParseError::missing_field("referenceLocator", node.value.clone()))?,
            comment,
        })
    }
}

/// A download location: a URI, or the literal `NONE` / `NOASSERTION`.
fn download_location_value(object: &Node) -> Result<String> {
    if object.is_literal() && (object.value == "NONE" || object.value == "NOASSERTION") {
        return Ok(object.value.clone());
    }
    validate_uri(&object.value, "downloadLocation")?;
    Ok(object.value.clone())
}

fn purpose_value(object: &Node) -> Result<PackagePurpose> {
    let token = object
        .suffix()
        .strip_prefix(PURPOSE_PREFIX)
        .ok_or_else(|| ParseError::invalid_value("primaryPackagePurpose", object.value.clone()))?;
    PackagePurpose::from_uri_token(token)
        .ok_or_else(|| ParseError::invalid_value("primaryPackagePurpose", token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ActorKind;
    use crate::rdf::graph::{Triple, TripleGraph};
    use crate::rdf::vocab::{RDF_TYPE, SPDX_NS};

    fn spdx(term: &str) -> String {
        format!("{SPDX_NS}{term}")
    }

    fn pkg_node() -> Node {
        Node::iri("http://example.com/doc#SPDXRef-pkg")
    }

    fn base_triples(node: &Node) -> Vec<Triple> {
        vec![
            Triple::new(node.clone(), RDF_TYPE, Node::iri(spdx("Package"))),
            Triple::new(node.clone(), spdx("name"), Node::literal("acme-lib")),
        ]
    }

    #[test]
    fn test_build_minimal_package() {
        let node = pkg_node();
        let graph = TripleGraph::new(base_triples(&node));
        let mut parser = Parser::new(V2_3, &graph);
        let id = parser.build_package(&node).unwrap();
        assert_eq!(id, "pkg");
        assert_eq!(parser.packages["pkg"].name, "acme-lib");
    }

    #[test]
    fn test_supplier_and_originator() {
        let node = pkg_node();
        let mut triples = base_triples(&node);
        triples.push(Triple::new(
            node.clone(),
            spdx("supplier"),
            Node::literal("Organization: Acme Corp"),
        ));
        triples.push(Triple::new(
            node.clone(),
            spdx("originator"),
            Node::literal("NOASSERTION"),
        ));
        let graph = TripleGraph::new(triples);
        let mut parser = Parser::new(V2_3, &graph);
        parser.build_package(&node).unwrap();
        let package = &parser.packages["pkg"];
        match package.supplier.as_ref().unwrap() {
            ActorOrNoAssertion::Actor(actor) => {
                assert_eq!(actor.kind, ActorKind::Organization);
                assert_eq!(actor.name, "Acme Corp");
            }
            other => panic!("unexpected supplier {other:?}"),
        }
        assert_eq!(
            package.originator.as_ref().unwrap().to_string(),
            "NOASSERTION"
        );
    }

    #[test]
    fn test_unknown_predicate_is_error() {
        let node = pkg_node();
        let mut triples = base_triples(&node);
        triples.push(Triple::new(
            node.clone(),
            spdx("favoriteColor"),
            Node::literal("mauve"),
        ));
        let graph = TripleGraph::new(triples);
        let mut parser = Parser::new(V2_3, &graph);
        assert!(matches!(
            parser.build_package(&node),
            Err(ParseError::UnknownPredicate { .. })
        ));
    }

    #[test]
    fn test_revision_gated_predicate() {
        // attributionText arrived in 2.2; under 2.1 it is outside the
        // closed world.
        let node = pkg_node();
        let mut triples = base_triples(&node);
        triples.push(Triple::new(
            node.clone(),
            spdx("attributionText"),
            Node::literal("courtesy of acme"),
        ));
        let graph = TripleGraph::new(triples);

        let mut parser = Parser::new(V2_1, &graph);
        assert!(matches!(
            parser.build_package(&node),
            Err(ParseError::UnknownPredicate { .. })
        ));

        let mut parser = Parser::new(V2_2, &graph);
        parser.build_package(&node).unwrap();
        assert_eq!(
            parser.packages["pkg"].attribution_texts,
            vec!["courtesy of acme".to_string()]
        );
    }

    #[test]
    fn test_download_location_special_tokens() {
        assert_eq!(
            download_location_value(&Node::literal("NOASSERTION")).unwrap(),
            "NOASSERTION"
        );
        assert!(download_location_value(&Node::literal("somewhere out there")).is_err());
        assert_eq!(
            download_location_value(&Node::literal("https://example.com/acme.tar.gz")).unwrap(),
            "https://example.com/acme.tar.gz"
        );
    }

    #[test]
    fn test_missing_name_is_error() {
        let node = pkg_node();
        let graph = TripleGraph::new(vec![Triple::new(
            node.clone(),
            RDF_TYPE,
            Node::iri(spdx("Package")),
        )]);
        let mut parser = Parser::new(V2_3, &graph);
        assert!(matches!(
            parser.build_package(&node),
            Err(ParseError::MissingRequiredField { field: "name", .. })
        ));
    }

    #[test]
    fn test_malformed_identifier_is_error() {
        let node = Node::iri("http://example.com/doc#not-an-spdx-ref");
        let graph = TripleGraph::new(base_triples(&node));
        let mut parser = Parser::new(V2_3, &graph);
        assert!(parser.build_package(&node).is_err());
    }
}
