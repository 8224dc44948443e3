//! Recursive-descent parser for the license-expression sub-grammar.
//!
//! Dispatches on a license node's declared type; leaves without fields
//! resolve through the special tokens or the standard license-identifier
//! registry. License expressions must be DAGs, so this walk runs the
//! fail-on-cycle policy.

use crate::error::{ParseError, Result};
use crate::model::{
    AnyLicenseInfo, ExtractedLicensingInfo, License, LicenseException, SimpleLicensingInfo,
    SpecialLicense,
};
use crate::rdf::graph::Node;
use crate::rdf::vocab::{classify, Term};
use crate::rdf::walk::CyclePolicy;
use crate::rdf::{literal_bool, literal_str, validate_uri, Parser};

impl Parser<'_> {
    /// Parse the license expression rooted at `node`.
    pub(crate) fn parse_license(&mut self, node: &Node) -> Result<AnyLicenseInfo> {
        if node.is_literal() {
            return resolve_leaf(node, &node.value);
        }
        if !self.graph.describes(node) {
            // No attached triples: a leaf reference by URI.
            return resolve_leaf(node, node.suffix());
        }

        if let Some(done) = self.licenses.check(&node.value, CyclePolicy::Fail)? {
            return Ok(done);
        }
        self.licenses.begin(node.value.clone(), None);

        let type_uri = self
            .graph
            .node_type(node)?
            .ok_or_else(|| ParseError::missing_field("rdf:type", node.value.clone()))?;
        let parsed = match classify(&type_uri) {
            Term::Spdx("ConjunctiveLicenseSet") => {
                AnyLicenseInfo::Conjunctive(self.parse_license_members(node, "ConjunctiveLicenseSet")?)
            }
            Term::Spdx("DisjunctiveLicenseSet") => {
                AnyLicenseInfo::Disjunctive(self.parse_license_members(node, "DisjunctiveLicenseSet")?)
            }
            Term::Spdx("OrLaterOperator") => {
                let member = self.parse_single_member(node, "OrLaterOperator")?;
                AnyLicenseInfo::OrLater(Box::new(member))
            }
            Term::Spdx("WithExceptionOperator") => self.parse_with_exception(node)?,
            Term::Spdx("ExtractedLicensingInfo") => {
                AnyLicenseInfo::Extracted(self.parse_extracted_licensing(node)?)
            }
            Term::Spdx("SimpleLicensingInfo") => {
                AnyLicenseInfo::Simple(self.parse_simple_licensing(node)?)
            }
            Term::Spdx("License") => {
                AnyLicenseInfo::License(Box::new(self.parse_license_record(node, "License")?))
            }
            Term::Spdx("ListedLicense") => {
                AnyLicenseInfo::Listed(Box::new(self.parse_license_record(node, "ListedLicense")?))
            }
            _ => {
                return Err(ParseError::invalid_value("license node type", type_uri));
            }
        };

        self.licenses.complete(&node.value, parsed.clone());
        Ok(parsed)
    }

    /// The `member` triples of a license set, parsed in encounter order.
    fn parse_license_members(
        &mut self,
        node: &Node,
        node_kind: &'static str,
    ) -> Result<Vec<AnyLicenseInfo>> {
        let mut members = Vec::new();
        for &idx in self.graph.attached(node) {
            let triple = self.graph.triple(idx);
            match classify(&triple.predicate) {
                Term::Rdf("type") => {}
                Term::Spdx("member") => {
                    let object = triple.object.clone();
                    members.push(self.parse_license(&object)?);
                }
                _ => {
                    return Err(ParseError::unknown_predicate(
                        &triple.predicate,
                        node_kind,
                        node.value.clone(),
                    ));
                }
            }
        }
        Ok(members)
    }

    /// Exactly one member; zero or several is a structural error.
    fn parse_single_member(
        &mut self,
        node: &Node,
        node_kind: &'static str,
    ) -> Result<AnyLicenseInfo> {
        let mut members = self.parse_license_members(node, node_kind)?;
        match members.len() {
            1 => Ok(members.remove(0)),
            0 => Err(ParseError::missing_field("member", node.value.clone())),
            n => Err(ParseError::ambiguous(format!(
                "{node_kind} node {node} carries {n} members, expected exactly one"
            ))),
        }
    }

    fn parse_with_exception(&mut self, node: &Node) -> Result<AnyLicenseInfo> {
        let mut member: Option<AnyLicenseInfo> = None;
        let mut exception: Option<LicenseException> = None;
        for &idx in self.graph.attached(node) {
            let triple = self.graph.triple(idx);
            match classify(&triple.predicate) {
                Term::Rdf("type") => {}
                Term::Spdx("member") => {
                    if member.is_some() {
                        return Err(ParseError::ambiguous(format!(
                            "WithExceptionOperator node {node} carries more than one member"
                        )));
                    }
                    let object = triple.object.clone();
                    member = Some(self.parse_license(&object)?);
                }
                Term::Spdx("licenseException") => {
                    if exception.is_some() {
                        return Err(ParseError::ambiguous(format!(
                            "WithExceptionOperator node {node} carries more than one exception"
                        )));
                    }
                    let object = triple.object.clone();
                    exception = Some(self.parse_license_exception(&object)?);
                }
                _ => {
                    return Err(ParseError::unknown_predicate(
                        &triple.predicate,
                        "WithExceptionOperator",
                        node.value.clone(),
                    ));
                }
            }
        }
        let license = member
            .ok_or_else(|| ParseError::missing_field("member", node.value.clone()))?;
        let exception = exception
            .ok_or_else(|| ParseError::missing_field("licenseException", node.value.clone()))?;
        Ok(AnyLicenseInfo::WithException {
            license: Box::new(license),
            exception,
        })
    }

    fn parse_license_exception(&mut self, node: &Node) -> Result<LicenseException> {
        let mut exception = LicenseException::default();
        for &idx in self.graph.attached(node) {
            let triple = self.graph.triple(idx);
            match classify(&triple.predicate) {
                Term::Rdf("type") => {}
                Term::Spdx("licenseExceptionId") => {
                    exception.license_exception_id =
                        literal_str(triple, "licenseExceptionId")?.to_string();
                }
                Term::Spdx("licenseExceptionText") => {
                    exception.license_exception_text =
                        Some(literal_str(triple, "licenseExceptionText")?.to_string());
                }
                Term::Spdx("name") => {
                    exception.name = Some(literal_str(triple, "name")?.to_string());
                }
                Term::Rdfs("comment") => {
                    exception.comment = Some(literal_str(triple, "comment")?.to_string());
                }
                Term::Rdfs("seeAlso") => {
                    let uri = see_also_value(triple)?;
                    validate_uri(&uri, "seeAlso")?;
                    exception.see_also.push(uri);
                }
                Term::Spdx("example") => {
                    exception.example = Some(literal_str(triple, "example")?.to_string());
                }
                _ => {
                    return Err(ParseError::unknown_predicate(
                        &triple.predicate,
                        "LicenseException",
                        node.value.clone(),
                    ));
                }
            }
        }
        if exception.license_exception_id.is_empty() {
            return Err(ParseError::missing_field(
                "licenseExceptionId",
                node.value.clone(),
            ));
        }
        Ok(exception)
    }

    pub(crate) fn parse_extracted_licensing(
        &mut self,
        node: &Node,
    ) -> Result<ExtractedLicensingInfo> {
        let mut info = ExtractedLicensingInfo::default();
        for &idx in self.graph.attached(node) {
            let triple = self.graph.triple(idx);
            match classify(&triple.predicate) {
                Term::Rdf("type") => {}
                Term::Spdx("licenseId") => {
                    info.license_id = literal_str(triple, "licenseId")?.to_string();
                }
                Term::Spdx("extractedText") => {
                    info.extracted_text = Some(literal_str(triple, "extractedText")?.to_string());
                }
                Term::Spdx("name") => {
                    info.name = Some(literal_str(triple, "name")?.to_string());
                }
                Term::Rdfs("comment") => {
                    info.comment = Some(literal_str(triple, "comment")?.to_string());
                }
                Term::Rdfs("seeAlso") => {
                    info.see_also.push(see_also_value(triple)?);
                }
                Term::Spdx("example") => {
                    info.example = Some(literal_str(triple, "example")?.to_string());
                }
                _ => {
                    return Err(ParseError::unknown_predicate(
                        &triple.predicate,
                        "ExtractedLicensingInfo",
                        node.value.clone(),
                    ));
                }
            }
        }
        if info.license_id.is_empty() {
            return Err(ParseError::missing_field("licenseId", node.value.clone()));
        }
        Ok(info)
    }

    fn parse_simple_licensing(&mut self, node: &Node) -> Result<SimpleLicensingInfo> {
        let mut info = SimpleLicensingInfo::default();
        for &idx in self.graph.attached(node) {
            let triple = self.graph.triple(idx);
            match classify(&triple.predicate) {
                Term::Rdf("type") => {}
                Term::Spdx("licenseId") => {
                    info.license_id = literal_str(triple, "licenseId")?.to_string();
                }
                Term::Spdx("name") => {
                    info.name = Some(literal_str(triple, "name")?.to_string());
                }
                Term::Rdfs("comment") => {
                    info.comment = Some(literal_str(triple, "comment")?.to_string());
                }
                Term::Rdfs("seeAlso") => {
                    info.see_also.push(see_also_value(triple)?);
                }
                Term::Spdx("example") => {
                    info.example = Some(literal_str(triple, "example")?.to_string());
                }
                _ => {
                    return Err(ParseError::unknown_predicate(
                        &triple.predicate,
                        "SimpleLicensingInfo",
                        node.value.clone(),
                    ));
                }
            }
        }
        if info.license_id.is_empty() {
            return Err(ParseError::missing_field("licenseId", node.value.clone()));
        }
        Ok(info)
    }

    fn parse_license_record(&mut self, node: &Node, node_kind: &'static str) -> Result<License> {
        let mut license = License::default();
        for &idx in self.graph.attached(node) {
            let triple = self.graph.triple(idx);
            match classify(&triple.predicate) {
                Term::Rdf("type") => {}
                Term::Spdx("licenseId") => {
                    license.license_id = literal_str(triple, "licenseId")?.to_string();
                }
                Term::Spdx("name") => {
                    license.name = Some(literal_str(triple, "name")?.to_string());
                }
                Term::Rdfs("comment") => {
                    license.comment = Some(literal_str(triple, "comment")?.to_string());
                }
                Term::Rdfs("seeAlso") => {
                    license.see_also.push(see_also_value(triple)?);
                }
                Term::Spdx("example") => {
                    license.example = Some(literal_str(triple, "example")?.to_string());
                }
                Term::Spdx("isOsiApproved") => {
                    license.is_osi_approved = Some(literal_bool(triple, "isOsiApproved")?);
                }
                Term::Spdx("isDeprecatedLicenseId") => {
                    license.is_deprecated_license_id =
                        Some(literal_bool(triple, "isDeprecatedLicenseId")?);
                }
                Term::Spdx("isFsfLibre") => {
                    license.is_fsf_libre = Some(literal_bool(triple, "isFsfLibre")?);
                }
                Term::Spdx("licenseText") => {
                    license.license_text = Some(literal_str(triple, "licenseText")?.to_string());
                }
                Term::Spdx("standardLicenseHeader") => {
                    license.standard_license_header =
                        Some(literal_str(triple, "standardLicenseHeader")?.to_string());
                }
                Term::Spdx("standardLicenseTemplate") => {
                    license.standard_license_template =
                        Some(literal_str(triple, "standardLicenseTemplate")?.to_string());
                }
                _ => {
                    return Err(ParseError::unknown_predicate(
                        &triple.predicate,
                        node_kind,
                        node.value.clone(),
                    ));
                }
            }
        }
        if license.license_id.is_empty() {
            return Err(ParseError::missing_field("licenseId", node.value.clone()));
        }
        Ok(license)
    }
}

/// A `seeAlso` object: either a literal or a plain IRI, stored as written.
fn see_also_value(triple: &crate::rdf::graph::Triple) -> Result<String> {
    Ok(triple.object.value.clone())
}

/// Resolve a field-less license reference: the special tokens
/// (case-insensitive on the trailing URI segment) or a standard license
/// identifier from the registry.
fn resolve_leaf(node: &Node, token: &str) -> Result<AnyLicenseInfo> {
    if token.eq_ignore_ascii_case("none") {
        return Ok(AnyLicenseInfo::Special(SpecialLicense::None));
    }
    if token.eq_ignore_ascii_case("noassertion") {
        return Ok(AnyLicenseInfo::Special(SpecialLicense::NoAssertion));
    }
    if let Some(id) = spdx::license_id(token) {
        return Ok(AnyLicenseInfo::Special(SpecialLicense::LicenseId(
            id.name.to_string(),
        )));
    }
    Err(ParseError::unresolved(
        node.value.clone(),
        "license reference without fields matches no special token or standard license id",
    ))
}
