//! The license-expression sub-grammar: a tagged union over license sets,
//! operators, and leaf license records.
//!
//! A license expression is acyclic by specification; the RDF layer rejects
//! cycles before any of these values are constructed. Flattening produces
//! the canonical string form consumed by the rest of the document model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A leaf reference that carries no fields of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialLicense {
    None,
    NoAssertion,
    /// One of the standard license identifiers from the SPDX license list.
    LicenseId(String),
}

/// Scalar license info without the full license-list fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleLicensingInfo {
    pub license_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub see_also: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// A full license record, as found on `License` and `ListedLicense` nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub license_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub see_also: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_osi_approved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deprecated_license_id: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_fsf_libre: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_license_header: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_license_template: Option<String>,
}

/// A license extracted from the analyzed material rather than the list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedLicensingInfo {
    pub license_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub see_also: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// The exception block of a with-exception operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseException {
    pub license_exception_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_exception_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub see_also: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// Any license expression: leaves, full records, sets, and operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnyLicenseInfo {
    Special(SpecialLicense),
    Simple(SimpleLicensingInfo),
    License(Box<License>),
    Listed(Box<License>),
    Extracted(ExtractedLicensingInfo),
    /// All members apply; flattens to `" AND "`-joined members.
    Conjunctive(Vec<AnyLicenseInfo>),
    /// Any member may be chosen; flattens to `" OR "`-joined members.
    Disjunctive(Vec<AnyLicenseInfo>),
    /// The member version or any later one.
    OrLater(Box<AnyLicenseInfo>),
    /// The member combined with a named exception.
    WithException {
        license: Box<AnyLicenseInfo>,
        exception: LicenseException,
    },
}

impl AnyLicenseInfo {
    /// The canonical string form used by the rest of the document model.
    ///
    /// Set members join in encounter order with no extra parenthesization;
    /// the or-later and with-exception operators are transparent at this
    /// layer and render only their member.
    #[must_use]
    pub fn flatten(&self) -> String {
        match self {
            Self::Special(SpecialLicense::None) => "NONE".to_string(),
            Self::Special(SpecialLicense::NoAssertion) => "NOASSERTION".to_string(),
            Self::Special(SpecialLicense::LicenseId(id)) => id.clone(),
            Self::Simple(info) => info.license_id.clone(),
            Self::License(lic) | Self::Listed(lic) => lic.license_id.clone(),
            Self::Extracted(info) => info.license_id.clone(),
            Self::Conjunctive(members) => join_members(members, " AND "),
            Self::Disjunctive(members) => join_members(members, " OR "),
            Self::OrLater(member) => member.flatten(),
            Self::WithException { license, .. } => license.flatten(),
        }
    }
}

fn join_members(members: &[AnyLicenseInfo], separator: &str) -> String {
    members
        .iter()
        .map(AnyLicenseInfo::flatten)
        .collect::<Vec<_>>()
        .join(separator)
}

impl fmt::Display for AnyLicenseInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listed(id: &str) -> AnyLicenseInfo {
        AnyLicenseInfo::Special(SpecialLicense::LicenseId(id.to_string()))
    }

    #[test]
    fn test_flatten_special_tokens() {
        assert_eq!(
            AnyLicenseInfo::Special(SpecialLicense::None).flatten(),
            "NONE"
        );
        assert_eq!(
            AnyLicenseInfo::Special(SpecialLicense::NoAssertion).flatten(),
            "NOASSERTION"
        );
        assert_eq!(listed("MIT").flatten(), "MIT");
    }

    #[test]
    fn test_flatten_sets_preserve_encounter_order() {
        let conj = AnyLicenseInfo::Conjunctive(vec![listed("MIT"), listed("Apache-2.0")]);
        assert_eq!(conj.flatten(), "MIT AND Apache-2.0");

        let disj = AnyLicenseInfo::Disjunctive(vec![listed("GPL-2.0-only"), listed("MIT")]);
        assert_eq!(disj.flatten(), "GPL-2.0-only OR MIT");
    }

    #[test]
    fn test_flatten_nested_sets_recursively() {
        let inner = AnyLicenseInfo::Disjunctive(vec![listed("MIT"), listed("ISC")]);
        let outer = AnyLicenseInfo::Conjunctive(vec![inner, listed("Apache-2.0")]);
        assert_eq!(outer.flatten(), "MIT OR ISC AND Apache-2.0");
    }

    #[test]
    fn test_operators_render_member_only() {
        let or_later = AnyLicenseInfo::OrLater(Box::new(listed("GPL-2.0-only")));
        assert_eq!(or_later.flatten(), "GPL-2.0-only");

        let with_exc = AnyLicenseInfo::WithException {
            license: Box::new(listed("GPL-2.0-only")),
            exception: LicenseException {
                license_exception_id: "Classpath-exception-2.0".to_string(),
                ..Default::default()
            },
        };
        assert_eq!(with_exc.flatten(), "GPL-2.0-only");
    }

    #[test]
    fn test_extracted_flattens_to_its_id() {
        let extracted = AnyLicenseInfo::Extracted(ExtractedLicensingInfo {
            license_id: "LicenseRef-custom-1".to_string(),
            ..Default::default()
        });
        assert_eq!(extracted.flatten(), "LicenseRef-custom-1");
    }
}
