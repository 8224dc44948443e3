//! Annotations and (pre-2.3) reviews.

use crate::ident::DocElementId;
use crate::model::Actor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The annotation type vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnnotationType {
    Review,
    Other,
}

impl AnnotationType {
    /// Parse the suffix after `annotationType_`.
    #[must_use]
    pub fn from_uri_token(token: &str) -> Option<Self> {
        match token {
            "review" => Some(Self::Review),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// A dated remark attached to some document element.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    /// The element the annotation was found on.
    pub subject: DocElementId,
    pub annotator: Actor,
    #[serde(rename = "annotationDate")]
    pub date: DateTime<Utc>,
    #[serde(rename = "annotationType")]
    pub annotation_type: AnnotationType,
    pub comment: String,
}

/// A document review record. Deprecated in favor of annotations and absent
/// from the 2.3 vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub reviewer: Actor,
    #[serde(rename = "reviewDate")]
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_type_tokens() {
        assert_eq!(
            AnnotationType::from_uri_token("review"),
            Some(AnnotationType::Review)
        );
        assert_eq!(AnnotationType::from_uri_token("REVIEW"), None);
    }
}
