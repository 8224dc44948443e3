//! The three SPDX identifier string forms and their codec.
//!
//! | Form              | Pattern                              |
//! |-------------------|--------------------------------------|
//! | Element id        | `SPDXRef-<id>`                       |
//! | Cross-doc id      | `DocumentRef-<doc>:SPDXRef-<id>`     |
//! | Cross-doc, doc only | `DocumentRef-<doc>`                |
//! | Special           | `NONE` \| `NOASSERTION`              |
//!
//! Parsing and formatting are exact inverses; serde round-trips every
//! identifier through these string forms bit-exactly.

use crate::error::{ParseError, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Prefix carried by every element identifier.
pub const ELEMENT_PREFIX: &str = "SPDXRef-";
/// Prefix carried by every external-document identifier.
pub const DOC_REF_PREFIX: &str = "DocumentRef-";

/// The two special reference tokens that carry no document/element parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialRef {
    None,
    NoAssertion,
}

impl SpecialRef {
    fn from_token(s: &str) -> Option<Self> {
        match s {
            "NONE" => Some(Self::None),
            "NOASSERTION" => Some(Self::NoAssertion),
            _ => None,
        }
    }

    /// The literal token form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::NoAssertion => "NOASSERTION",
        }
    }
}

impl fmt::Display for SpecialRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bare element identifier, stored without its `SPDXRef-` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(String);

impl ElementId {
    /// Parse the `SPDXRef-<id>` form.
    pub fn parse(s: &str) -> Result<Self> {
        let Some(id) = s.strip_prefix(ELEMENT_PREFIX) else {
            return Err(ParseError::malformed_identifier(
                s,
                format!("missing required {ELEMENT_PREFIX} prefix"),
            ));
        };
        if id.is_empty() {
            return Err(ParseError::malformed_identifier(
                s,
                "empty id after prefix",
            ));
        }
        Ok(Self(id.to_string()))
    }

    /// The id without its prefix.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ELEMENT_PREFIX}{}", self.0)
    }
}

impl FromStr for ElementId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(D::Error::custom)
    }
}

/// A reference to an element in this document, in another document, or one
/// of the special tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocElementId {
    /// `SPDXRef-<id>` or `DocumentRef-<doc>:SPDXRef-<id>`.
    Element {
        /// External document ref, without its prefix; `None` for this document.
        doc_ref: Option<String>,
        id: ElementId,
    },
    /// `DocumentRef-<doc>` alone, the element part empty.
    DocRef(String),
    /// `NONE` or `NOASSERTION`.
    Special(SpecialRef),
}

impl DocElementId {
    /// Parse any of the identifier forms in the table above.
    pub fn parse(s: &str) -> Result<Self> {
        if let Some(special) = SpecialRef::from_token(s) {
            return Ok(Self::Special(special));
        }

        let mut parts = s.split(':');
        let first = parts.next().unwrap_or_default();
        let second = parts.next();
        if parts.next().is_some() {
            return Err(ParseError::malformed_identifier(
                s,
                "more than one separator colon",
            ));
        }

        match second {
            Some(elem) => {
                let Some(doc) = first.strip_prefix(DOC_REF_PREFIX) else {
                    return Err(ParseError::malformed_identifier(
                        s,
                        format!("document part must start with {DOC_REF_PREFIX}"),
                    ));
                };
                if doc.is_empty() {
                    return Err(ParseError::malformed_identifier(
                        s,
                        "empty document ref before colon",
                    ));
                }
                if !elem.starts_with(ELEMENT_PREFIX) {
                    return Err(ParseError::malformed_identifier(
                        s,
                        format!("element part after colon must start with {ELEMENT_PREFIX}"),
                    ));
                }
                Ok(Self::Element {
                    doc_ref: Some(doc.to_string()),
                    id: ElementId::parse(elem)?,
                })
            }
            None => {
                if let Some(doc) = first.strip_prefix(DOC_REF_PREFIX) {
                    if doc.is_empty() {
                        return Err(ParseError::malformed_identifier(
                            s,
                            "empty document ref after prefix",
                        ));
                    }
                    return Ok(Self::DocRef(doc.to_string()));
                }
                Ok(Self::Element {
                    doc_ref: None,
                    id: ElementId::parse(first)?,
                })
            }
        }
    }

    /// Build a same-document element reference.
    #[must_use]
    pub fn local(id: ElementId) -> Self {
        Self::Element { doc_ref: None, id }
    }

    /// The element id, when this reference names one.
    #[must_use]
    pub fn element_id(&self) -> Option<&ElementId> {
        match self {
            Self::Element { id, .. } => Some(id),
            _ => None,
        }
    }

    /// The external document part, when present.
    #[must_use]
    pub fn doc_ref(&self) -> Option<&str> {
        match self {
            Self::Element { doc_ref, .. } => doc_ref.as_deref(),
            Self::DocRef(doc) => Some(doc),
            Self::Special(_) => None,
        }
    }
}

impl fmt::Display for DocElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element {
                doc_ref: Some(doc),
                id,
            } => write!(f, "{DOC_REF_PREFIX}{doc}:{id}"),
            Self::Element { doc_ref: None, id } => write!(f, "{id}"),
            Self::DocRef(doc) => write!(f, "{DOC_REF_PREFIX}{doc}"),
            Self::Special(special) => write!(f, "{special}"),
        }
    }
}

impl FromStr for DocElementId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for DocElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DocElementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_id_roundtrip() {
        let id = ElementId::parse("SPDXRef-file1").unwrap();
        assert_eq!(id.as_str(), "file1");
        assert_eq!(id.to_string(), "SPDXRef-file1");
    }

    #[test]
    fn test_element_id_rejects_empty_and_unprefixed() {
        assert!(matches!(
            ElementId::parse("SPDXRef-"),
            Err(ParseError::MalformedIdentifier { .. })
        ));
        assert!(matches!(
            ElementId::parse("file1"),
            Err(ParseError::MalformedIdentifier { .. })
        ));
    }

    #[test]
    fn test_doc_element_id_bare_element() {
        let id = DocElementId::parse("SPDXRef-file1").unwrap();
        assert_eq!(id.doc_ref(), None);
        assert_eq!(id.element_id().unwrap().as_str(), "file1");
    }

    #[test]
    fn test_doc_element_id_cross_document() {
        let id = DocElementId::parse("DocumentRef-doc2:SPDXRef-file2").unwrap();
        assert_eq!(id.doc_ref(), Some("doc2"));
        assert_eq!(id.element_id().unwrap().as_str(), "file2");
        assert_eq!(id.to_string(), "DocumentRef-doc2:SPDXRef-file2");
    }

    #[test]
    fn test_doc_element_id_doc_only() {
        let id = DocElementId::parse("DocumentRef-doc2").unwrap();
        assert_eq!(id, DocElementId::DocRef("doc2".to_string()));
        assert_eq!(id.to_string(), "DocumentRef-doc2");
    }

    #[test]
    fn test_doc_element_id_two_colons_is_error() {
        assert!(matches!(
            DocElementId::parse("DocumentRef-doc2:SPDXRef-file1:file2"),
            Err(ParseError::MalformedIdentifier { .. })
        ));
    }

    #[test]
    fn test_doc_element_id_missing_element_prefix_after_colon() {
        assert!(matches!(
            DocElementId::parse("DocumentRef-doc2:file2"),
            Err(ParseError::MalformedIdentifier { .. })
        ));
    }

    #[test]
    fn test_special_tokens_short_circuit() {
        assert_eq!(
            DocElementId::parse("NONE").unwrap(),
            DocElementId::Special(SpecialRef::None)
        );
        assert_eq!(
            DocElementId::parse("NOASSERTION").unwrap(),
            DocElementId::Special(SpecialRef::NoAssertion)
        );
        // Case matters for the special tokens.
        assert!(DocElementId::parse("none").is_err());
    }

    #[test]
    fn test_serde_uses_string_forms() {
        let id = DocElementId::parse("DocumentRef-doc2:SPDXRef-file2").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"DocumentRef-doc2:SPDXRef-file2\"");
        let back: DocElementId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
