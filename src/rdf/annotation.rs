//! Annotation and review node builders.

use crate::error::{ParseError, Result};
use crate::ident::DocElementId;
use crate::model::{Actor, Annotation, AnnotationType, Review};
use crate::rdf::graph::Node;
use crate::rdf::vocab::{classify, Term};
use crate::rdf::{literal_datetime, literal_str, Parser};

/// Prefix on annotation-type URI suffixes.
const ANNOTATION_TYPE_PREFIX: &str = "annotationType_";

impl Parser<'_> {
    /// Build the annotation at `node`; `subject` names the element the
    /// annotation triple was found on.
    pub(crate) fn build_annotation(&mut self, subject: DocElementId, node: &Node) -> Result<()> {
        let mut annotator: Option<Actor> = None;
        let mut date = None;
        let mut annotation_type: Option<AnnotationType> = None;
        let mut comment: Option<String> = None;

        for &idx in self.graph.attached(node) {
            let triple = self.graph.triple(idx);
            match classify(&triple.predicate) {
                Term::Rdf("type") => {}
                Term::Spdx("annotator") => {
                    annotator = Some(Actor::parse(
                        literal_str(triple, "annotator")?,
                        "annotator",
                    )?);
                }
                Term::Spdx("annotationDate") => {
                    date = Some(literal_datetime(triple, "annotationDate")?);
                }
                Term::Spdx("annotationType") => {
                    let token = triple
                        .object
                        .suffix()
                        .strip_prefix(ANNOTATION_TYPE_PREFIX)
                        .ok_or_else(|| {
                            ParseError::invalid_value(
                                "annotationType",
                                triple.object.value.clone(),
                            )
                        })?;
                    annotation_type = Some(AnnotationType::from_uri_token(token).ok_or_else(
                        || ParseError::invalid_value("annotationType", token),
                    )?);
                }
                Term::Rdfs("comment") => {
                    comment = Some(literal_str(triple, "comment")?.to_string());
                }
                _ => {
                    return Err(ParseError::unknown_predicate(
                        &triple.predicate,
                        "Annotation",
                        node.value.clone(),
                    ));
                }
            }
        }

        self.annotations.push(Annotation {
            subject,
            annotator: annotator
                .ok_or_else(|| ParseError::missing_field("annotator", node.value.clone()))?,
            date: date
                .ok_or_else(|| ParseError::missing_field("annotationDate", node.value.clone()))?,
            annotation_type: annotation_type
                .ok_or_else(|| ParseError::missing_field("annotationType", node.value.clone()))?,
            comment: comment
                .ok_or_else(|| ParseError::missing_field("comment", node.value.clone()))?,
        });
        Ok(())
    }

    /// Build a (pre-2.3) review record.
    pub(crate) fn build_review(&mut self, node: &Node) -> Result<()> {
        let mut reviewer: Option<Actor> = None;
        let mut date = None;
        let mut comment: Option<String> = None;

        for &idx in self.graph.attached(node) {
            let triple = self.graph.triple(idx);
            match classify(&triple.predicate) {
                Term::Rdf("type") => {}
                Term::Spdx("reviewer") => {
                    reviewer = Some(Actor::parse(literal_str(triple, "reviewer")?, "reviewer")?);
                }
                Term::Spdx("reviewDate") => {
                    date = Some(literal_datetime(triple, "reviewDate")?);
                }
                Term::Rdfs("comment") => {
                    comment = Some(literal_str(triple, "comment")?.to_string());
                }
                _ => {
                    return Err(ParseError::unknown_predicate(
                        &triple.predicate,
                        "Review",
                        node.value.clone(),
                    ));
                }
            }
        }

        self.reviews.push(Review {
            reviewer: reviewer
                .ok_or_else(|| ParseError::missing_field("reviewer", node.value.clone()))?,
            date: date
                .ok_or_else(|| ParseError::missing_field("reviewDate", node.value.clone()))?,
            comment,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ident::ElementId;
    use crate::model::{ActorKind, SpecRevision};
    use crate::rdf::graph::{Triple, TripleGraph};
    use crate::rdf::vocab::{RDF_TYPE, SPDX_NS};

    fn spdx(term: &str) -> String {
        format!("{SPDX_NS}{term}")
    }

    fn subject() -> DocElementId {
        DocElementId::local(ElementId::parse("SPDXRef-DOCUMENT").unwrap())
    }

    #[test]
    fn test_build_annotation() {
        let node = Node::blank("ann");
        let graph = TripleGraph::new(vec![
            Triple::new(node.clone(), RDF_TYPE, Node::iri(spdx("Annotation"))),
            Triple::new(
                node.clone(),
                spdx("annotator"),
                Node::literal("Person: Jane Doe"),
            ),
            Triple::new(
                node.clone(),
                spdx("annotationDate"),
                Node::literal("2024-03-01T12:00:00Z"),
            ),
            Triple::new(
                node.clone(),
                spdx("annotationType"),
                Node::iri(spdx("annotationType_review")),
            ),
            Triple::new(
                node.clone(),
                format!("{}comment", crate::rdf::vocab::RDFS_NS),
                Node::literal("looks good"),
            ),
        ]);
        let mut parser = Parser::new(SpecRevision::V2_3, &graph);
        parser.build_annotation(subject(), &node).unwrap();
        let annotation = &parser.annotations[0];
        assert_eq!(annotation.annotator.kind, ActorKind::Person);
        assert_eq!(annotation.annotation_type, AnnotationType::Review);
        assert_eq!(annotation.comment, "looks good");
    }

    #[test]
    fn test_annotation_requires_comment() {
        let node = Node::blank("ann");
        let graph = TripleGraph::new(vec![
            Triple::new(
                node.clone(),
                spdx("annotator"),
                Node::literal("Tool: scanner-1.0"),
            ),
            Triple::new(
                node.clone(),
                spdx("annotationDate"),
                Node::literal("2024-03-01T12:00:00Z"),
            ),
            Triple::new(
                node.clone(),
                spdx("annotationType"),
                Node::iri(spdx("annotationType_other")),
            ),
        ]);
        let mut parser = Parser::new(SpecRevision::V2_3, &graph);
        assert!(matches!(
            parser.build_annotation(subject(), &node),
            Err(ParseError::MissingRequiredField { field: "comment", .. })
        ));
    }

    #[test]
    fn test_build_review() {
        let node = Node::blank("rev");
        let graph = TripleGraph::new(vec![
            Triple::new(
                node.clone(),
                spdx("reviewer"),
                Node::literal("Organization: Acme Corp"),
            ),
            Triple::new(
                node.clone(),
                spdx("reviewDate"),
                Node::literal("2021-06-01T09:30:00Z"),
            ),
        ]);
        let mut parser = Parser::new(SpecRevision::V2_1, &graph);
        parser.build_review(&node).unwrap();
        assert_eq!(parser.reviews[0].reviewer.kind, ActorKind::Organization);
        assert!(parser.reviews[0].comment.is_none());
    }
}
