//! License-expression parsing exercised through whole-document parses.

use spdx_interchange::model::SpecRevision;
use spdx_interchange::rdf::{parse_document, Node, Triple};
use spdx_interchange::ParseError;

const SPDX: &str = "http://spdx.org/rdf/terms#";
const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
const NS: &str = "http://example.com/doc";

fn spdx(term: &str) -> String {
    format!("{SPDX}{term}")
}

fn listed(id: &str) -> Node {
    Node::iri(format!("http://spdx.org/licenses/{id}"))
}

/// A document whose single package concludes the license under test.
fn doc_with_concluded(license_triples: Vec<Triple>, concluded: Node) -> Vec<Triple> {
    let doc = Node::iri(format!("{NS}#SPDXRef-DOCUMENT"));
    let pkg = Node::iri(format!("{NS}#SPDXRef-pkg"));
    let mut triples = vec![
        Triple::new(doc.clone(), RDF_TYPE, Node::iri(spdx("SpdxDocument"))),
        Triple::new(doc.clone(), spdx("specVersion"), Node::literal("SPDX-2.3")),
        Triple::new(doc.clone(), spdx("dataLicense"), Node::literal("CC0-1.0")),
        Triple::new(doc, spdx("describesPackage"), pkg.clone()),
        Triple::new(pkg.clone(), RDF_TYPE, Node::iri(spdx("Package"))),
        Triple::new(pkg.clone(), spdx("name"), Node::literal("acme-lib")),
        Triple::new(pkg, spdx("licenseConcluded"), concluded),
    ];
    triples.extend(license_triples);
    triples
}

fn concluded_flattened(triples: Vec<Triple>) -> Result<String, ParseError> {
    let document = parse_document(SpecRevision::V2_3, triples)?;
    Ok(document
        .package("pkg")
        .expect("package should exist")
        .license_concluded
        .as_ref()
        .expect("license should be concluded")
        .flatten())
}

#[test]
fn test_nested_sets_flatten_in_encounter_order() {
    // (GPL-2.0-only OR MIT) AND Apache-2.0
    let outer = Node::blank("outer");
    let inner = Node::blank("inner");
    let license = vec![
        Triple::new(outer.clone(), RDF_TYPE, Node::iri(spdx("ConjunctiveLicenseSet"))),
        Triple::new(outer.clone(), spdx("member"), inner.clone()),
        Triple::new(outer.clone(), spdx("member"), listed("Apache-2.0")),
        Triple::new(inner.clone(), RDF_TYPE, Node::iri(spdx("DisjunctiveLicenseSet"))),
        Triple::new(inner.clone(), spdx("member"), listed("GPL-2.0-only")),
        Triple::new(inner, spdx("member"), listed("MIT")),
    ];
    let flattened = concluded_flattened(doc_with_concluded(license, outer)).unwrap();
    assert_eq!(flattened, "GPL-2.0-only OR MIT AND Apache-2.0");
}

#[test]
fn test_or_later_and_with_exception_render_member_only() {
    let with_exc = Node::blank("with");
    let or_later = Node::blank("orlater");
    let exc = Node::blank("exc");
    let license = vec![
        Triple::new(with_exc.clone(), RDF_TYPE, Node::iri(spdx("WithExceptionOperator"))),
        Triple::new(with_exc.clone(), spdx("member"), or_later.clone()),
        Triple::new(with_exc.clone(), spdx("licenseException"), exc.clone()),
        Triple::new(or_later.clone(), RDF_TYPE, Node::iri(spdx("OrLaterOperator"))),
        Triple::new(or_later, spdx("member"), listed("GPL-2.0-only")),
        Triple::new(
            exc,
            spdx("licenseExceptionId"),
            Node::literal("Classpath-exception-2.0"),
        ),
    ];
    let flattened = concluded_flattened(doc_with_concluded(license, with_exc)).unwrap();
    assert_eq!(flattened, "GPL-2.0-only");
}

#[test]
fn test_license_cycle_fails_the_whole_parse() {
    let a = Node::blank("a");
    let b = Node::blank("b");
    let license = vec![
        Triple::new(a.clone(), RDF_TYPE, Node::iri(spdx("ConjunctiveLicenseSet"))),
        Triple::new(a.clone(), spdx("member"), b.clone()),
        Triple::new(b.clone(), RDF_TYPE, Node::iri(spdx("DisjunctiveLicenseSet"))),
        Triple::new(b, spdx("member"), a.clone()),
    ];
    assert!(matches!(
        concluded_flattened(doc_with_concluded(license, a)),
        Err(ParseError::CyclicLicenseReference { .. })
    ));
}

#[test]
fn test_shared_license_node_is_memoized_not_cyclic() {
    // Two members referencing the same extracted license is sharing, not
    // a cycle.
    let set = Node::blank("set");
    let shared = Node::blank("shared");
    let license = vec![
        Triple::new(set.clone(), RDF_TYPE, Node::iri(spdx("ConjunctiveLicenseSet"))),
        Triple::new(set.clone(), spdx("member"), shared.clone()),
        Triple::new(set.clone(), spdx("member"), shared.clone()),
        Triple::new(shared.clone(), RDF_TYPE, Node::iri(spdx("ExtractedLicensingInfo"))),
        Triple::new(shared.clone(), spdx("licenseId"), Node::literal("LicenseRef-x")),
        Triple::new(shared, spdx("extractedText"), Node::literal("text")),
    ];
    let flattened = concluded_flattened(doc_with_concluded(license, set)).unwrap();
    assert_eq!(flattened, "LicenseRef-x AND LicenseRef-x");
}

#[test]
fn test_special_tokens_and_standard_ids_as_leaves() {
    let flattened =
        concluded_flattened(doc_with_concluded(Vec::new(), listed("BSD-3-Clause"))).unwrap();
    assert_eq!(flattened, "BSD-3-Clause");

    let flattened = concluded_flattened(doc_with_concluded(
        Vec::new(),
        Node::iri(format!("{SPDX}noassertion")),
    ))
    .unwrap();
    assert_eq!(flattened, "NOASSERTION");
}

#[test]
fn test_unrecognized_leaf_reference_is_error() {
    assert!(matches!(
        concluded_flattened(doc_with_concluded(Vec::new(), listed("Totally-Made-Up"))),
        Err(ParseError::UnresolvedReference { .. })
    ));
}
