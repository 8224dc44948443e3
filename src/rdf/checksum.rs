//! Checksum node builder, shared by packages, files, and external
//! document refs.

use crate::error::{ParseError, Result};
use crate::model::{check_algorithm, Checksum, ChecksumAlgorithm, ChecksumContext};
use crate::rdf::graph::Node;
use crate::rdf::vocab::{classify, Term};
use crate::rdf::{literal_str, Parser};

/// The required prefix on algorithm URI suffixes.
const ALGORITHM_PREFIX: &str = "checksumAlgorithm_";

impl Parser<'_> {
    /// Build a checksum from its node, enforcing the per-(entity, revision)
    /// algorithm policy.
    pub(crate) fn build_checksum(
        &mut self,
        node: &Node,
        context: ChecksumContext,
    ) -> Result<Checksum> {
        let mut algorithm: Option<ChecksumAlgorithm> = None;
        let mut value: Option<String> = None;

        for &idx in self.graph.attached(node) {
            let triple = self.graph.triple(idx);
            match classify(&triple.predicate) {
                Term::Rdf("type") => {}
                Term::Spdx("algorithm") => {
                    let token = triple
                        .object
                        .suffix()
                        .strip_prefix(ALGORITHM_PREFIX)
                        .ok_or_else(|| {
                            ParseError::invalid_value(
                                "checksum algorithm",
                                triple.object.value.clone(),
                            )
                        })?;
                    algorithm = Some(ChecksumAlgorithm::from_uri_token(token)?);
                }
                Term::Spdx("checksumValue") => {
                    value = Some(literal_str(triple, "checksumValue")?.to_string());
                }
                _ => {
                    return Err(ParseError::unknown_predicate(
                        &triple.predicate,
                        "Checksum",
                        node.value.clone(),
                    ));
                }
            }
        }

        let algorithm =
            algorithm.ok_or_else(|| ParseError::missing_field("algorithm", node.value.clone()))?;
        let value =
            value.ok_or_else(|| ParseError::missing_field("checksumValue", node.value.clone()))?;
        check_algorithm(algorithm, context, self.revision)?;
        Ok(Checksum::new(algorithm, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SpecRevision;
    use crate::rdf::graph::{Triple, TripleGraph};
    use crate::rdf::vocab::SPDX_NS;

    fn spdx(term: &str) -> String {
        format!("{SPDX_NS}{term}")
    }

    fn checksum_graph(algorithm_token: &str) -> (TripleGraph, Node) {
        let node = Node::blank("cksum");
        let graph = TripleGraph::new(vec![
            Triple::new(
                node.clone(),
                spdx("algorithm"),
                Node::iri(spdx(&format!("checksumAlgorithm_{algorithm_token}"))),
            ),
            Triple::new(
                node.clone(),
                spdx("checksumValue"),
                Node::literal("d6a770ba38583ed4bb4525bd96e50461655d2758"),
            ),
        ]);
        (graph, node)
    }

    #[test]
    fn test_build_sha1_checksum() {
        let (graph, node) = checksum_graph("sha1");
        let mut parser = Parser::new(SpecRevision::V2_1, &graph);
        let checksum = parser.build_checksum(&node, ChecksumContext::File).unwrap();
        assert_eq!(checksum.algorithm, ChecksumAlgorithm::Sha1);
    }

    #[test]
    fn test_unknown_algorithm_token_is_error() {
        let (graph, node) = checksum_graph("sha999");
        let mut parser = Parser::new(SpecRevision::V2_3, &graph);
        assert!(matches!(
            parser.build_checksum(&node, ChecksumContext::File),
            Err(ParseError::InvalidEnumValue { .. })
        ));
    }

    #[test]
    fn test_algorithm_outside_entity_policy_is_error() {
        // SHA256 parses fine but is illegal for a 2.1 file.
        let (graph, node) = checksum_graph("sha256");
        let mut parser = Parser::new(SpecRevision::V2_1, &graph);
        assert!(parser.build_checksum(&node, ChecksumContext::File).is_err());
        let mut parser = Parser::new(SpecRevision::V2_1, &graph);
        assert!(parser
            .build_checksum(&node, ChecksumContext::Package)
            .is_ok());
    }

    #[test]
    fn test_missing_value_is_error() {
        let node = Node::blank("cksum");
        let graph = TripleGraph::new(vec![Triple::new(
            node.clone(),
            spdx("algorithm"),
            Node::iri(spdx("checksumAlgorithm_sha1")),
        )]);
        let mut parser = Parser::new(SpecRevision::V2_3, &graph);
        assert!(matches!(
            parser.build_checksum(&node, ChecksumContext::Package),
            Err(ParseError::MissingRequiredField { .. })
        ));
    }
}
