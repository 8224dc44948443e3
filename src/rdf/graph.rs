//! The triple store: nodes, triples, and the by-subject index.

use crate::error::{ParseError, Result};
use crate::rdf::vocab::{self, RDF_TYPE};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// How a node is written in the source graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Iri,
    Blank,
    Literal,
}

/// An RDF node. Identity is value-based: two nodes with equal string form
/// denote the same entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    pub value: String,
}

impl Node {
    #[must_use]
    pub fn iri(value: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Iri,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn blank(label: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Blank,
            value: label.into(),
        }
    }

    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Literal,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.kind == NodeKind::Literal
    }

    /// The trailing URI segment for IRI nodes, the raw value otherwise.
    #[must_use]
    pub fn suffix(&self) -> &str {
        match self.kind {
            NodeKind::Iri => vocab::uri_suffix(&self.value),
            _ => &self.value,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NodeKind::Iri => write!(f, "<{}>", self.value),
            NodeKind::Blank => write!(f, "_:{}", self.value),
            NodeKind::Literal => write!(f, "{:?}", self.value),
        }
    }
}

/// One (subject, predicate, object) fact, as supplied by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Node,
    pub predicate: String,
    pub object: Node,
}

impl Triple {
    #[must_use]
    pub fn new(subject: Node, predicate: impl Into<String>, object: Node) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }
}

/// The flat triple list indexed by subject, so builders can ask "what
/// predicates/objects does node N have" without re-scanning.
#[derive(Debug)]
pub struct TripleGraph {
    triples: Vec<Triple>,
    by_subject: HashMap<String, Vec<usize>>,
    /// Values of non-literal nodes that appear in object position.
    object_values: HashSet<String>,
    /// First-appearance order of subject values.
    subject_order: Vec<String>,
}

impl TripleGraph {
    /// Index a triple list. Supplied order is preserved everywhere.
    #[must_use]
    pub fn new(triples: Vec<Triple>) -> Self {
        let mut by_subject: HashMap<String, Vec<usize>> = HashMap::new();
        let mut object_values = HashSet::new();
        let mut subject_order = Vec::new();

        for (idx, triple) in triples.iter().enumerate() {
            let key = triple.subject.value.clone();
            let entry = by_subject.entry(key.clone()).or_default();
            if entry.is_empty() {
                subject_order.push(key);
            }
            entry.push(idx);
            if !triple.object.is_literal() {
                object_values.insert(triple.object.value.clone());
            }
        }

        Self {
            triples,
            by_subject,
            object_values,
            subject_order,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Indices of the triples attached to a node, in supplied order.
    /// Empty for literals and for nodes the graph never mentions as a
    /// subject — never an error.
    #[must_use]
    pub fn attached(&self, node: &Node) -> &[usize] {
        if node.is_literal() {
            return &[];
        }
        self.by_subject
            .get(&node.value)
            .map_or(&[][..], Vec::as_slice)
    }

    #[must_use]
    pub fn triple(&self, idx: usize) -> &Triple {
        &self.triples[idx]
    }

    /// True when the node has at least one attached triple.
    #[must_use]
    pub fn describes(&self, node: &Node) -> bool {
        !self.attached(node).is_empty()
    }

    /// The node's unique `rdf:type` object URI. Zero type triples yield
    /// `None`; more than one is an ambiguous-structure error.
    pub fn node_type(&self, node: &Node) -> Result<Option<String>> {
        let mut found: Option<String> = None;
        for &idx in self.attached(node) {
            let t = &self.triples[idx];
            if t.predicate == RDF_TYPE {
                if found.is_some() {
                    return Err(ParseError::ambiguous(format!(
                        "node {node} declares more than one rdf:type"
                    )));
                }
                found = Some(t.object.value.clone());
            }
        }
        Ok(found)
    }

    /// True when the value never appears in object position, i.e. the node
    /// is a root of the graph.
    #[must_use]
    pub fn is_root(&self, value: &str) -> bool {
        !self.object_values.contains(value)
    }

    /// Subject nodes in first-appearance order.
    pub fn subjects(&self) -> impl Iterator<Item = &Node> {
        self.subject_order.iter().filter_map(|value| {
            self.by_subject
                .get(value)
                .and_then(|idxs| idxs.first())
                .map(|&idx| &self.triples[idx].subject)
        })
    }
}
