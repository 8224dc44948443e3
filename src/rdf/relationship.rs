//! Relationship node builder and the related-element dispatcher.

use crate::error::{ParseError, Result};
use crate::ident::DocElementId;
use crate::model::{Relationship, RelationshipType};
use crate::rdf::graph::Node;
use crate::rdf::vocab::{classify, Term};
use crate::rdf::Parser;

/// The required prefix on relationship-type URI suffixes.
const REL_TYPE_PREFIX: &str = "relationshipType_";

impl Parser<'_> {
    /// Build the relationship at `node`, with `from` naming the element
    /// the relationship triple was attached to. The finished edge stores
    /// identifier keys only; endpoints resolve lazily through the arenas.
    pub(crate) fn build_relationship(&mut self, from: DocElementId, node: &Node) -> Result<()> {
        let mut rel_type: Option<RelationshipType> = None;
        let mut to: Option<DocElementId> = None;
        let mut comment: Option<String> = None;

        for &idx in self.graph.attached(node) {
            let triple = self.graph.triple(idx);
            let object = triple.object.clone();
            match classify(&triple.predicate) {
                Term::Rdf("type") => {}
                Term::Spdx("relationshipType") => {
                    let token = object.suffix().strip_prefix(REL_TYPE_PREFIX).ok_or_else(
                        || ParseError::invalid_value("relationshipType", object.value.clone()),
                    )?;
                    rel_type = Some(RelationshipType::from_uri_token(token).ok_or_else(
                        || ParseError::invalid_value("relationshipType", token),
                    )?);
                }
                Term::Spdx("relatedSpdxElement") => {
                    to = Some(self.resolve_related_element(&object)?);
                }
                Term::Rdfs("comment") => {
                    comment = Some(crate::rdf::literal_str(triple, "comment")?.to_string());
                }
                _ => {
                    return Err(ParseError::unknown_predicate(
                        &triple.predicate,
                        "Relationship",
                        node.value.clone(),
                    ));
                }
            }
        }

        let rel_type = rel_type
            .ok_or_else(|| ParseError::missing_field("relationshipType", node.value.clone()))?;
        let to = to
            .ok_or_else(|| ParseError::missing_field("relatedSpdxElement", node.value.clone()))?;
        self.relationships.push(Relationship {
            from,
            rel_type,
            to,
            comment,
        });
        Ok(())
    }

    /// The related element may be a nested File or Package definition, a
    /// nested Snippet, or a bare cross-reference marker. Nested entities
    /// are built (or shared, if already under construction) and the edge
    /// keeps only their identifier.
    fn resolve_related_element(&mut self, node: &Node) -> Result<DocElementId> {
        if node.is_literal() {
            return DocElementId::parse(&node.value);
        }
        if !self.graph.describes(node) {
            return DocElementId::parse(node.suffix());
        }
        let type_uri = self
            .graph
            .node_type(node)?
            .ok_or_else(|| ParseError::missing_field("rdf:type", node.value.clone()))?;
        match classify(&type_uri) {
            Term::Spdx("File") => {
                self.build_file(node)?;
                DocElementId::parse(node.suffix())
            }
            Term::Spdx("Package") => {
                self.build_package(node)?;
                DocElementId::parse(node.suffix())
            }
            Term::Spdx("Snippet") => {
                self.build_snippet(node)?;
                DocElementId::parse(node.suffix())
            }
            // A bare marker: carries its identity and nothing else.
            Term::Spdx("SpdxElement") => {
                for &idx in self.graph.attached(node) {
                    let triple = self.graph.triple(idx);
                    if classify(&triple.predicate) != Term::Rdf("type") {
                        return Err(ParseError::unknown_predicate(
                            &triple.predicate,
                            "SpdxElement",
                            node.value.clone(),
                        ));
                    }
                }
                DocElementId::parse(node.suffix())
            }
            _ => Err(ParseError::invalid_value(
                "related element type",
                type_uri,
            )),
        }
    }
}
