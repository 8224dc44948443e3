//! Spec revisions and revision-gated behavior.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three supported SPDX specification revisions.
///
/// Revision differences (field availability, checksum algorithm policy)
/// are expressed as data keyed by this enum rather than duplicated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpecRevision {
    V2_1,
    V2_2,
    V2_3,
}

impl SpecRevision {
    /// Parse a `specVersion` value, accepting both `SPDX-2.2` and `2.2`.
    #[must_use]
    pub fn from_spec_version(s: &str) -> Option<Self> {
        match s.strip_prefix("SPDX-").unwrap_or(s) {
            "2.1" => Some(Self::V2_1),
            "2.2" => Some(Self::V2_2),
            "2.3" => Some(Self::V2_3),
            _ => None,
        }
    }

    /// The `SPDX-x.y` form used by the `specVersion` field.
    #[must_use]
    pub const fn spec_version(self) -> &'static str {
        match self {
            Self::V2_1 => "SPDX-2.1",
            Self::V2_2 => "SPDX-2.2",
            Self::V2_3 => "SPDX-2.3",
        }
    }

    /// True when this revision is `other` or later.
    #[must_use]
    pub fn at_least(self, other: Self) -> bool {
        self >= other
    }
}

impl fmt::Display for SpecRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::V2_1 => "2.1",
            Self::V2_2 => "2.2",
            Self::V2_3 => "2.3",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_spec_version() {
        assert_eq!(
            SpecRevision::from_spec_version("SPDX-2.1"),
            Some(SpecRevision::V2_1)
        );
        assert_eq!(
            SpecRevision::from_spec_version("2.3"),
            Some(SpecRevision::V2_3)
        );
        assert_eq!(SpecRevision::from_spec_version("SPDX-3.0"), None);
    }

    #[test]
    fn test_ordering() {
        assert!(SpecRevision::V2_3.at_least(SpecRevision::V2_1));
        assert!(!SpecRevision::V2_1.at_least(SpecRevision::V2_2));
    }
}
