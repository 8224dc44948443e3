//! Benchmarks for triple-graph ingestion.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use spdx_interchange::model::SpecRevision;
use spdx_interchange::rdf::{parse_document, Node, Triple};
use std::hint::black_box;

const SPDX: &str = "http://spdx.org/rdf/terms#";
const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
const NS: &str = "http://example.com/doc";

fn spdx(term: &str) -> String {
    format!("{SPDX}{term}")
}

/// One document with a single package owning `file_count` files, each
/// carrying a SHA1 checksum and a concluded license.
fn synthetic_document(file_count: usize) -> Vec<Triple> {
    let doc = Node::iri(format!("{NS}#SPDXRef-DOCUMENT"));
    let pkg = Node::iri(format!("{NS}#SPDXRef-pkg"));
    let mut triples = vec![
        Triple::new(doc.clone(), RDF_TYPE, Node::iri(spdx("SpdxDocument"))),
        Triple::new(doc.clone(), spdx("specVersion"), Node::literal("SPDX-2.3")),
        Triple::new(doc.clone(), spdx("dataLicense"), Node::literal("CC0-1.0")),
        Triple::new(doc, spdx("describesPackage"), pkg.clone()),
        Triple::new(pkg.clone(), RDF_TYPE, Node::iri(spdx("Package"))),
        Triple::new(pkg.clone(), spdx("name"), Node::literal("acme-lib")),
    ];
    for i in 0..file_count {
        let file = Node::iri(format!("{NS}#SPDXRef-file-{i}"));
        let cksum = Node::blank(format!("cksum-{i}"));
        triples.push(Triple::new(pkg.clone(), spdx("hasFile"), file.clone()));
        triples.push(Triple::new(file.clone(), RDF_TYPE, Node::iri(spdx("File"))));
        triples.push(Triple::new(
            file.clone(),
            spdx("fileName"),
            Node::literal(format!("src/module_{i}.rs")),
        ));
        triples.push(Triple::new(file.clone(), spdx("checksum"), cksum.clone()));
        triples.push(Triple::new(
            cksum.clone(),
            spdx("algorithm"),
            Node::iri(spdx("checksumAlgorithm_sha1")),
        ));
        triples.push(Triple::new(
            cksum,
            spdx("checksumValue"),
            Node::literal(format!("{i:040x}")),
        ));
        triples.push(Triple::new(
            file,
            spdx("licenseConcluded"),
            Node::iri("http://spdx.org/licenses/MIT"),
        ));
    }
    triples
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_document");
    for file_count in [10, 100, 1_000] {
        let triples = synthetic_document(file_count);
        group.bench_with_input(
            BenchmarkId::from_parameter(file_count),
            &triples,
            |b, triples| {
                b.iter(|| {
                    let document =
                        parse_document(SpecRevision::V2_3, black_box(triples.clone())).unwrap();
                    black_box(document);
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, benchmark_parse);
criterion_main!(benches);
