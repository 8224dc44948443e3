//! The RDF vocabulary: namespaces and URI helpers.

/// The SPDX terms namespace.
pub const SPDX_NS: &str = "http://spdx.org/rdf/terms#";
/// The RDF core namespace (`rdf:type` lives here).
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// The RDF Schema namespace (`rdfs:comment`, `rdfs:seeAlso`).
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
/// Description-of-a-Project namespace (`doap:homepage`).
pub const DOAP_NS: &str = "http://usefulinc.com/ns/doap#";
/// W3C pointers namespace used by snippet ranges.
pub const PTR_NS: &str = "http://www.w3.org/2009/pointers#";
/// Prefix of the standard license list URIs.
pub const LICENSE_LIST_NS: &str = "http://spdx.org/licenses/";

/// The full `rdf:type` predicate URI.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// A predicate or type URI classified by namespace, carrying its local name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term<'a> {
    Rdf(&'a str),
    Rdfs(&'a str),
    Spdx(&'a str),
    Doap(&'a str),
    Ptr(&'a str),
    /// Anything outside the namespaces above, carried whole.
    Other(&'a str),
}

/// Split a URI into its namespace classification and local name.
#[must_use]
pub fn classify(uri: &str) -> Term<'_> {
    if let Some(local) = uri.strip_prefix(SPDX_NS) {
        Term::Spdx(local)
    } else if let Some(local) = uri.strip_prefix(RDF_NS) {
        Term::Rdf(local)
    } else if let Some(local) = uri.strip_prefix(RDFS_NS) {
        Term::Rdfs(local)
    } else if let Some(local) = uri.strip_prefix(DOAP_NS) {
        Term::Doap(local)
    } else if let Some(local) = uri.strip_prefix(PTR_NS) {
        Term::Ptr(local)
    } else {
        Term::Other(uri)
    }
}

/// The trailing segment of a URI: after `#` when present, otherwise after
/// the last `/`, otherwise the whole string.
#[must_use]
pub fn uri_suffix(uri: &str) -> &str {
    if let Some(idx) = uri.rfind('#') {
        &uri[idx + 1..]
    } else if let Some(idx) = uri.rfind('/') {
        &uri[idx + 1..]
    } else {
        uri
    }
}

/// The part of a URI before its `#` fragment, when it has one.
#[must_use]
pub fn uri_base(uri: &str) -> Option<&str> {
    uri.rfind('#').map(|idx| &uri[..idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(
            classify("http://spdx.org/rdf/terms#name"),
            Term::Spdx("name")
        );
        assert_eq!(classify(RDF_TYPE), Term::Rdf("type"));
        assert_eq!(
            classify("http://www.w3.org/2000/01/rdf-schema#comment"),
            Term::Rdfs("comment")
        );
        assert_eq!(
            classify("http://example.org/custom"),
            Term::Other("http://example.org/custom")
        );
    }

    #[test]
    fn test_uri_suffix() {
        assert_eq!(uri_suffix("http://doc#SPDXRef-file1"), "SPDXRef-file1");
        assert_eq!(uri_suffix("http://spdx.org/licenses/MIT"), "MIT");
        assert_eq!(uri_suffix("plain"), "plain");
    }

    #[test]
    fn test_uri_base() {
        assert_eq!(uri_base("http://doc#SPDXRef-DOCUMENT"), Some("http://doc"));
        assert_eq!(uri_base("http://doc"), None);
    }
}
