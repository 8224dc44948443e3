//! Snippet node builder, including the pointer-pair range grammar.

use crate::error::{ParseError, Result};
use crate::model::{RangePointer, Snippet, SnippetRange};
use crate::rdf::graph::Node;
use crate::rdf::vocab::{classify, Term};
use crate::rdf::walk::CyclePolicy;
use crate::rdf::{literal_str, literal_u64, EntityRef, Parser};

impl Parser<'_> {
    /// Build the snippet at `node`, returning its bare element id.
    ///
    /// The owning file resolves through the entity walker, so a file
    /// still under construction (Grey) is accepted; attaching the
    /// snippet id onto the file record happens in the assembler's wiring
    /// pass once every file is final.
    pub(crate) fn build_snippet(&mut self, node: &Node) -> Result<String> {
        match self.entities.check(&node.value, CyclePolicy::ShareExisting)? {
            Some(EntityRef::Snippet(id)) => return Ok(id),
            Some(other) => {
                return Err(ParseError::ambiguous(format!(
                    "node {node} is referenced as both a {} and a Snippet",
                    other.describe()
                )));
            }
            None => {}
        }

        let id = Self::element_id_of(node, "Snippet")?;
        let key = id.as_str().to_string();
        self.entities
            .begin(node.value.clone(), Some(EntityRef::Snippet(key.clone())));

        let mut file_id: Option<String> = None;
        let mut range: Option<SnippetRange> = None;
        let mut name = None;
        let mut license_concluded = None;
        let mut license_info = Vec::new();
        let mut license_comments = None;
        let mut copyright_text = None;
        let mut comment = None;

        for &idx in self.graph.attached(node) {
            let triple = self.graph.triple(idx);
            let object = triple.object.clone();
            match classify(&triple.predicate) {
                Term::Rdf("type") => {}
                Term::Spdx("snippetFromFile") => {
                    file_id = Some(self.build_file(&object)?);
                }
                Term::Spdx("range") => {
                    if range.is_some() {
                        return Err(ParseError::ambiguous(format!(
                            "snippet node {node} carries more than one range"
                        )));
                    }
                    range = Some(self.build_snippet_range(&object)?);
                }
                Term::Spdx("name") => {
                    name = Some(literal_str(triple, "name")?.to_string());
                }
                Term::Spdx("licenseConcluded") => {
                    license_concluded = Some(self.parse_license(&object)?);
                }
                Term::Spdx("licenseInfoInSnippet") => {
                    license_info.push(self.parse_license(&object)?);
                }
                Term::Spdx("licenseComments") => {
                    license_comments = Some(literal_str(triple, "licenseComments")?.to_string());
                }
                Term::Spdx("copyrightText") => {
                    copyright_text = Some(literal_str(triple, "copyrightText")?.to_string());
                }
                Term::Rdfs("comment") => {
                    comment = Some(literal_str(triple, "comment")?.to_string());
                }
                _ => {
                    return Err(ParseError::unknown_predicate(
                        &triple.predicate,
                        "Snippet",
                        node.value.clone(),
                    ));
                }
            }
        }

        let snippet = Snippet {
            spdx_id: key.clone(),
            file_id: file_id.ok_or_else(|| {
                ParseError::missing_field("snippetFromFile", node.value.clone())
            })?,
            range: range
                .ok_or_else(|| ParseError::missing_field("range", node.value.clone()))?,
            name,
            license_concluded,
            license_info_in_snippet: license_info,
            license_comments,
            copyright_text,
            comment,
        };
        self.snippets.insert(key.clone(), snippet);
        self.entities
            .complete(&node.value, EntityRef::Snippet(key.clone()));
        Ok(key)
    }

    /// A start/end pointer pair; both endpoints must be present and of
    /// the same kind.
    fn build_snippet_range(&mut self, node: &Node) -> Result<SnippetRange> {
        let mut start: Option<RangePointer> = None;
        let mut end: Option<RangePointer> = None;
        for &idx in self.graph.attached(node) {
            let triple = self.graph.triple(idx);
            let object = triple.object.clone();
            match classify(&triple.predicate) {
                Term::Rdf("type") => {}
                Term::Ptr("startPointer") => {
                    start = Some(self.build_range_pointer(&object)?);
                }
                Term::Ptr("endPointer") => {
                    end = Some(self.build_range_pointer(&object)?);
                }
                _ => {
                    return Err(ParseError::unknown_predicate(
                        &triple.predicate,
                        "StartEndPointer",
                        node.value.clone(),
                    ));
                }
            }
        }
        let start =
            start.ok_or_else(|| ParseError::missing_field("startPointer", node.value.clone()))?;
        let end =
            end.ok_or_else(|| ParseError::missing_field("endPointer", node.value.clone()))?;
        if !start.same_kind(end) {
            return Err(ParseError::ambiguous(format!(
                "range node {node} mixes byte and line pointers"
            )));
        }
        Ok(SnippetRange { start, end })
    }

    /// One pointer: a byte offset or a line number, decided by which
    /// predicate the node carries.
    fn build_range_pointer(&mut self, node: &Node) -> Result<RangePointer> {
        let mut pointer: Option<RangePointer> = None;
        for &idx in self.graph.attached(node) {
            let triple = self.graph.triple(idx);
            match classify(&triple.predicate) {
                Term::Rdf("type") => {}
                // The pointer's back-reference to the snippet's file.
                Term::Ptr("reference") => {}
                Term::Ptr("offset") => {
                    if pointer.is_some() {
                        return Err(ParseError::ambiguous(format!(
                            "pointer node {node} carries more than one position"
                        )));
                    }
                    pointer = Some(RangePointer::Byte(literal_u64(triple, "offset")?));
                }
                Term::Ptr("lineNumber") => {
                    if pointer.is_some() {
                        return Err(ParseError::ambiguous(format!(
                            "pointer node {node} carries more than one position"
                        )));
                    }
                    pointer = Some(RangePointer::Line(literal_u64(triple, "lineNumber")?));
                }
                _ => {
                    return Err(ParseError::unknown_predicate(
                        &triple.predicate,
                        "RangePointer",
                        node.value.clone(),
                    ));
                }
            }
        }
        pointer.ok_or_else(|| ParseError::missing_field("offset", node.value.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SpecRevision;
    use crate::rdf::graph::{Triple, TripleGraph};
    use crate::rdf::vocab::{PTR_NS, RDF_TYPE, SPDX_NS};

    fn spdx(term: &str) -> String {
        format!("{SPDX_NS}{term}")
    }

    fn ptr(term: &str) -> String {
        format!("{PTR_NS}{term}")
    }

    fn snippet_fixture(start: (&str, &str), end: (&str, &str)) -> (TripleGraph, Node) {
        let snippet = Node::iri("http://example.com/doc#SPDXRef-snip");
        let file = Node::iri("http://example.com/doc#SPDXRef-f1");
        let range = Node::blank("range");
        let start_node = Node::blank("start");
        let end_node = Node::blank("end");
        let triples = vec![
            Triple::new(snippet.clone(), RDF_TYPE, Node::iri(spdx("Snippet"))),
            Triple::new(snippet.clone(), spdx("snippetFromFile"), file.clone()),
            Triple::new(file.clone(), RDF_TYPE, Node::iri(spdx("File"))),
            Triple::new(file.clone(), spdx("fileName"), Node::literal("a.c")),
            Triple::new(snippet.clone(), spdx("range"), range.clone()),
            Triple::new(range.clone(), ptr("startPointer"), start_node.clone()),
            Triple::new(range.clone(), ptr("endPointer"), end_node.clone()),
            Triple::new(start_node, ptr(start.0), Node::literal(start.1)),
            Triple::new(end_node, ptr(end.0), Node::literal(end.1)),
        ];
        (TripleGraph::new(triples), snippet)
    }

    #[test]
    fn test_byte_range_snippet() {
        let (graph, node) = snippet_fixture(("offset", "310"), ("offset", "420"));
        let mut parser = Parser::new(SpecRevision::V2_3, &graph);
        let id = parser.build_snippet(&node).unwrap();
        let snippet = &parser.snippets[&id];
        assert_eq!(snippet.file_id, "f1");
        assert_eq!(snippet.range.start, RangePointer::Byte(310));
        assert_eq!(snippet.range.end, RangePointer::Byte(420));
    }

    #[test]
    fn test_mismatched_pointer_kinds_is_error() {
        let (graph, node) = snippet_fixture(("offset", "310"), ("lineNumber", "42"));
        let mut parser = Parser::new(SpecRevision::V2_3, &graph);
        assert!(matches!(
            parser.build_snippet(&node),
            Err(ParseError::AmbiguousStructure(_))
        ));
    }

    #[test]
    fn test_malformed_offset_is_error() {
        let (graph, node) = snippet_fixture(("offset", "three-hundred"), ("offset", "420"));
        let mut parser = Parser::new(SpecRevision::V2_3, &graph);
        assert!(matches!(
            parser.build_snippet(&node),
            Err(ParseError::InvalidEnumValue { .. })
        ));
    }

    #[test]
    fn test_missing_range_is_error() {
        let snippet = Node::iri("http://example.com/doc#SPDXRef-snip");
        let file = Node::iri("http://example.com/doc#SPDXRef-f1");
        let graph = TripleGraph::new(vec![
            Triple::new(snippet.clone(), RDF_TYPE, Node::iri(spdx("Snippet"))),
            Triple::new(snippet.clone(), spdx("snippetFromFile"), file.clone()),
            Triple::new(file.clone(), RDF_TYPE, Node::iri(spdx("File"))),
            Triple::new(file, spdx("fileName"), Node::literal("a.c")),
        ]);
        let mut parser = Parser::new(SpecRevision::V2_3, &graph);
        assert!(matches!(
            parser.build_snippet(&snippet),
            Err(ParseError::MissingRequiredField { field: "range", .. })
        ));
    }

    #[test]
    fn test_missing_endpoint_is_error() {
        let snippet = Node::iri("http://example.com/doc#SPDXRef-snip");
        let file = Node::iri("http://example.com/doc#SPDXRef-f1");
        let range = Node::blank("range");
        let start_node = Node::blank("start");
        let graph = TripleGraph::new(vec![
            Triple::new(snippet.clone(), RDF_TYPE, Node::iri(spdx("Snippet"))),
            Triple::new(snippet.clone(), spdx("snippetFromFile"), file.clone()),
            Triple::new(file.clone(), RDF_TYPE, Node::iri(spdx("File"))),
            Triple::new(file, spdx("fileName"), Node::literal("a.c")),
            Triple::new(snippet.clone(), spdx("range"), range.clone()),
            Triple::new(range, ptr("startPointer"), start_node.clone()),
            Triple::new(start_node, ptr("offset"), Node::literal("1")),
        ]);
        let mut parser = Parser::new(SpecRevision::V2_3, &graph);
        assert!(matches!(
            parser.build_snippet(&snippet),
            Err(ParseError::MissingRequiredField {
                field: "endPointer",
                ..
            })
        ));
    }
}
