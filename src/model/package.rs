//! Packages and their attached records.

use crate::model::{ActorOrNoAssertion, AnyLicenseInfo, Checksum};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One package element. References to files are stored as bare element-id
/// keys into the document's file arena, never as direct references.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    #[serde(rename = "SPDXID")]
    pub spdx_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<ActorOrNoAssertion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub originator: Option<ActorOrNoAssertion>,
    /// A URI, or the literal `NONE` / `NOASSERTION`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files_analyzed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_code: Option<PackageVerificationCode>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub checksums: Vec<Checksum>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_concluded: Option<AnyLicenseInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_declared: Option<AnyLicenseInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub license_info_from_files: Vec<AnyLicenseInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub external_refs: Vec<ExternalRef>,
    /// Revision 2.2 and later.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub attribution_texts: Vec<String>,
    /// Revision 2.3 and later.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_purpose: Option<PackagePurpose>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub built_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until_date: Option<DateTime<Utc>>,
    /// Bare element ids of the files this package owns, in encounter order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub file_ids: Vec<String>,
}

impl Package {
    /// A new package with the given bare element id.
    #[must_use]
    pub fn new(spdx_id: impl Into<String>) -> Self {
        Self {
            spdx_id: spdx_id.into(),
            ..Self::default()
        }
    }
}

/// A hash over a package's constituent file hashes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageVerificationCode {
    pub value: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub excluded_files: Vec<String>,
}

/// External reference categories fixed by the spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExternalRefCategory {
    Security,
    PackageManager,
    PersistentId,
    Other,
}

impl ExternalRefCategory {
    /// Parse the suffix after `referenceCategory_`, as found in the RDF
    /// vocabulary (`packageManager`, `security`, ...).
    #[must_use]
    pub fn from_uri_token(token: &str) -> Option<Self> {
        match token {
            "security" => Some(Self::Security),
            "packageManager" => Some(Self::PackageManager),
            "persistentId" => Some(Self::PersistentId),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for ExternalRefCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Security => "SECURITY",
            Self::PackageManager => "PACKAGE-MANAGER",
            Self::PersistentId => "PERSISTENT-ID",
            Self::Other => "OTHER",
        };
        f.write_str(s)
    }
}

/// A reference to an external source of information about a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalRef {
    pub category: ExternalRefCategory,
    pub ref_type: String,
    pub locator: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Primary package purpose, introduced in revision 2.3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackagePurpose {
    Application,
    Framework,
    Library,
    Container,
    OperatingSystem,
    Device,
    Firmware,
    Source,
    Archive,
    File,
    Install,
    Other,
}

impl PackagePurpose {
    /// Parse the suffix after `purpose_`.
    #[must_use]
    pub fn from_uri_token(token: &str) -> Option<Self> {
        match token {
            "application" => Some(Self::Application),
            "framework" => Some(Self::Framework),
            "library" => Some(Self::Library),
            "container" => Some(Self::Container),
            "operatingSystem" => Some(Self::OperatingSystem),
            "device" => Some(Self::Device),
            "firmware" => Some(Self::Firmware),
            "source" => Some(Self::Source),
            "archive" => Some(Self::Archive),
            "file" => Some(Self::File),
            "install" => Some(Self::Install),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}
