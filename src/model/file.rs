//! Files and file-level records.

use crate::model::{AnyLicenseInfo, Checksum};
use serde::{Deserialize, Serialize};

/// One file element. A file is owned by at most one package through a
/// has-file edge; files no package owns are listed on the document itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    #[serde(rename = "SPDXID")]
    pub spdx_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub file_types: Vec<FileType>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub checksums: Vec<Checksum>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_concluded: Option<AnyLicenseInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub license_info_in_files: Vec<AnyLicenseInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice_text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub contributors: Vec<String>,
    /// Revision 2.2 and later.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub attribution_texts: Vec<String>,
    /// Bare element ids of files this file depends on. A co-reference,
    /// not ownership.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub dependency_ids: Vec<String>,
    /// Bare element ids of snippets carved out of this file.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub snippet_ids: Vec<String>,
    /// Revisions 2.1 and 2.2 only.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub artifact_of: Vec<ArtifactOf>,
}

impl File {
    /// A new file with the given bare element id.
    #[must_use]
    pub fn new(spdx_id: impl Into<String>) -> Self {
        Self {
            spdx_id: spdx_id.into(),
            ..Self::default()
        }
    }
}

/// The fixed file-type vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileType {
    Source,
    Binary,
    Archive,
    Application,
    Audio,
    Image,
    Text,
    Video,
    Documentation,
    Spdx,
    Other,
}

impl FileType {
    /// Parse the suffix after `fileType_`.
    #[must_use]
    pub fn from_uri_token(token: &str) -> Option<Self> {
        match token {
            "source" => Some(Self::Source),
            "binary" => Some(Self::Binary),
            "archive" => Some(Self::Archive),
            "application" => Some(Self::Application),
            "audio" => Some(Self::Audio),
            "image" => Some(Self::Image),
            "text" => Some(Self::Text),
            "video" => Some(Self::Video),
            "documentation" => Some(Self::Documentation),
            "spdx" => Some(Self::Spdx),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Project provenance for a file, dropped from the vocabulary in 2.3.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactOf {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_page: Option<String>,
}
