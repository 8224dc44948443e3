//! Unified error types for spdx-interchange.
//!
//! Every builder returns the first error it encounters and aborts that
//! node's construction; the document assembler performs no partial
//! recovery, so callers always receive a single error naming the failing
//! node/predicate context and never a half-populated document.

use thiserror::Error;

/// Errors produced while turning an RDF triple graph into a typed document.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseError {
    /// An SPDX identifier string did not match any of the defined forms.
    #[error("malformed identifier {value:?}: {reason}")]
    MalformedIdentifier { value: String, reason: String },

    /// A predicate outside the closed-world schema for this node kind.
    #[error("unknown predicate {predicate} on {node_kind} node {node}")]
    UnknownPredicate {
        predicate: String,
        node_kind: &'static str,
        node: String,
    },

    /// A field the schema requires was never supplied.
    #[error("missing required field {field} on node {node}")]
    MissingRequiredField { field: &'static str, node: String },

    /// Structure that admits more than one reading (e.g. two type triples).
    #[error("ambiguous structure: {0}")]
    AmbiguousStructure(String),

    /// A license expression referred back to one of its own ancestors.
    #[error("cyclic license dependency through node {node}")]
    CyclicLicenseReference { node: String },

    /// A value outside a fixed vocabulary (relationship type, checksum
    /// algorithm, boolean literal, ...).
    #[error("invalid value {value:?} for {field}")]
    InvalidEnumValue { field: &'static str, value: String },

    /// A reference to an entity the document never defines.
    #[error("unresolved reference to {reference}: {context}")]
    UnresolvedReference { reference: String, context: String },

    /// A field that must hold a URI held something else.
    #[error("invalid URI {uri:?}: {reason}")]
    InvalidUri { uri: String, reason: String },

    /// Wrapper adding the failing node/predicate context to an inner error.
    #[error("{context}")]
    Context {
        context: String,
        #[source]
        source: Box<ParseError>,
    },
}

/// Convenient Result type for spdx-interchange operations.
pub type Result<T> = std::result::Result<T, ParseError>;

impl ParseError {
    /// Create a malformed-identifier error.
    pub fn malformed_identifier(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedIdentifier {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown-predicate error.
    pub fn unknown_predicate(
        predicate: impl Into<String>,
        node_kind: &'static str,
        node: impl Into<String>,
    ) -> Self {
        Self::UnknownPredicate {
            predicate: predicate.into(),
            node_kind,
            node: node.into(),
        }
    }

    /// Create a missing-required-field error.
    pub fn missing_field(field: &'static str, node: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            field,
            node: node.into(),
        }
    }

    /// Create an ambiguous-structure error.
    pub fn ambiguous(message: impl Into<String>) -> Self {
        Self::AmbiguousStructure(message.into())
    }

    /// Create a cyclic-license error.
    pub fn cyclic_license(node: impl Into<String>) -> Self {
        Self::CyclicLicenseReference { node: node.into() }
    }

    /// Create an invalid-enum-value error.
    pub fn invalid_value(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidEnumValue {
            field,
            value: value.into(),
        }
    }

    /// Create an unresolved-reference error.
    pub fn unresolved(reference: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            reference: reference.into(),
            context: context.into(),
        }
    }

    /// Create an invalid-URI error.
    pub fn invalid_uri(uri: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUri {
            uri: uri.into(),
            reason: reason.into(),
        }
    }

    /// Wrap this error with additional context.
    #[must_use]
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding node/predicate context to results.
///
/// The context string is layered outside the existing error, so the chain
/// reads outermost-first when rendered through `std::error::Error::source`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (only evaluated on the error path).
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> ErrorContext<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(context))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| e.context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParseError::malformed_identifier("SPDXRef-", "empty id after prefix");
        assert!(err.to_string().contains("SPDXRef-"));

        let err = ParseError::unknown_predicate(
            "http://spdx.org/rdf/terms#bogus",
            "Package",
            "#SPDXRef-pkg",
        );
        assert!(err.to_string().contains("bogus"));
        assert!(err.to_string().contains("Package"));
    }

    #[test]
    fn test_context_wraps_source() {
        let inner: Result<()> = Err(ParseError::missing_field("name", "#SPDXRef-pkg"));
        let wrapped = inner.context("while building package SPDXRef-pkg");

        match wrapped {
            Err(ParseError::Context { context, source }) => {
                assert_eq!(context, "while building package SPDXRef-pkg");
                assert!(matches!(
                    *source,
                    ParseError::MissingRequiredField { field: "name", .. }
                ));
            }
            other => panic!("expected Context error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy() {
        let mut called = false;
        let ok: Result<i32> = Ok(7);
        let _ = ok.with_context(|| {
            called = true;
            "never"
        });
        assert!(!called, "closure must not run on the Ok path");
    }
}
