//! Snippets: ranges carved out of a file.

use crate::model::AnyLicenseInfo;
use serde::{Deserialize, Serialize};

/// One snippet element, always anchored to an owning file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    #[serde(rename = "SPDXID")]
    pub spdx_id: String,
    /// Bare element id of the file this snippet is carved from.
    pub file_id: String,
    pub range: SnippetRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_concluded: Option<AnyLicenseInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub license_info_in_snippet: Vec<AnyLicenseInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// One endpoint of a snippet range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RangePointer {
    /// A byte offset into the file.
    Byte(u64),
    /// A one-based line number.
    Line(u64),
}

impl RangePointer {
    /// True when both pointers are the same kind, the invariant every
    /// range must satisfy.
    #[must_use]
    pub fn same_kind(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Byte(_), Self::Byte(_)) | (Self::Line(_), Self::Line(_))
        )
    }
}

/// A pair of pointers of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetRange {
    pub start: RangePointer,
    pub end: RangePointer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_kind_matching() {
        assert!(RangePointer::Byte(0).same_kind(RangePointer::Byte(100)));
        assert!(RangePointer::Line(1).same_kind(RangePointer::Line(12)));
        assert!(!RangePointer::Byte(0).same_kind(RangePointer::Line(1)));
    }
}
