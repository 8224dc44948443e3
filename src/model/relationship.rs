//! Relationships between document elements.

use crate::ident::DocElementId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A directed edge between two elements. Both endpoints are identifier
/// references, resolved through the document arenas; the target may name
/// an element in another document or one of the special tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub from: DocElementId,
    #[serde(rename = "relationshipType")]
    pub rel_type: RelationshipType,
    pub to: DocElementId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

macro_rules! relationship_types {
    ($( $variant:ident => $token:literal, $tag:literal; )+) => {
        /// The fixed relationship vocabulary.
        ///
        /// Parsed from the URI suffix after the required
        /// `relationshipType_` prefix; anything else is rejected.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum RelationshipType {
            $( $variant, )+
        }

        impl RelationshipType {
            /// Parse the lowerCamel URI token (`dependsOn`, `describes`, ...).
            #[must_use]
            pub fn from_uri_token(token: &str) -> Option<Self> {
                match token {
                    $( $token => Some(Self::$variant), )+
                    _ => None,
                }
            }

            /// The tag-value spelling (`DEPENDS_ON`, `DESCRIBES`, ...).
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $tag, )+
                }
            }
        }
    };
}

relationship_types! {
    Describes => "describes", "DESCRIBES";
    DescribedBy => "describedBy", "DESCRIBED_BY";
    Contains => "contains", "CONTAINS";
    ContainedBy => "containedBy", "CONTAINED_BY";
    DependsOn => "dependsOn", "DEPENDS_ON";
    DependencyOf => "dependencyOf", "DEPENDENCY_OF";
    DependencyManifestOf => "dependencyManifestOf", "DEPENDENCY_MANIFEST_OF";
    BuildDependencyOf => "buildDependencyOf", "BUILD_DEPENDENCY_OF";
    DevDependencyOf => "devDependencyOf", "DEV_DEPENDENCY_OF";
    OptionalDependencyOf => "optionalDependencyOf", "OPTIONAL_DEPENDENCY_OF";
    ProvidedDependencyOf => "providedDependencyOf", "PROVIDED_DEPENDENCY_OF";
    TestDependencyOf => "testDependencyOf", "TEST_DEPENDENCY_OF";
    RuntimeDependencyOf => "runtimeDependencyOf", "RUNTIME_DEPENDENCY_OF";
    ExampleOf => "exampleOf", "EXAMPLE_OF";
    Generates => "generates", "GENERATES";
    GeneratedFrom => "generatedFrom", "GENERATED_FROM";
    AncestorOf => "ancestorOf", "ANCESTOR_OF";
    DescendantOf => "descendantOf", "DESCENDANT_OF";
    VariantOf => "variantOf", "VARIANT_OF";
    DistributionArtifact => "distributionArtifact", "DISTRIBUTION_ARTIFACT";
    PatchFor => "patchFor", "PATCH_FOR";
    PatchApplied => "patchApplied", "PATCH_APPLIED";
    CopyOf => "copyOf", "COPY_OF";
    FileAdded => "fileAdded", "FILE_ADDED";
    FileDeleted => "fileDeleted", "FILE_DELETED";
    FileModified => "fileModified", "FILE_MODIFIED";
    ExpandedFromArchive => "expandedFromArchive", "EXPANDED_FROM_ARCHIVE";
    DynamicLink => "dynamicLink", "DYNAMIC_LINK";
    StaticLink => "staticLink", "STATIC_LINK";
    DataFileOf => "dataFileOf", "DATA_FILE_OF";
    TestCaseOf => "testCaseOf", "TEST_CASE_OF";
    BuildToolOf => "buildToolOf", "BUILD_TOOL_OF";
    DevToolOf => "devToolOf", "DEV_TOOL_OF";
    TestOf => "testOf", "TEST_OF";
    TestToolOf => "testToolOf", "TEST_TOOL_OF";
    DocumentationOf => "documentationOf", "DOCUMENTATION_OF";
    OptionalComponentOf => "optionalComponentOf", "OPTIONAL_COMPONENT_OF";
    MetafileOf => "metafileOf", "METAFILE_OF";
    PackageOf => "packageOf", "PACKAGE_OF";
    Amends => "amends", "AMENDS";
    PrerequisiteFor => "prerequisiteFor", "PREREQUISITE_FOR";
    HasPrerequisite => "hasPrerequisite", "HAS_PREREQUISITE";
    RequirementDescriptionFor => "requirementDescriptionFor", "REQUIREMENT_DESCRIPTION_FOR";
    SpecificationFor => "specificationFor", "SPECIFICATION_FOR";
    Other => "other", "OTHER";
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_token_parsing() {
        assert_eq!(
            RelationshipType::from_uri_token("dependsOn"),
            Some(RelationshipType::DependsOn)
        );
        assert_eq!(
            RelationshipType::from_uri_token("describes"),
            Some(RelationshipType::Describes)
        );
        assert_eq!(RelationshipType::from_uri_token("DEPENDS_ON"), None);
        assert_eq!(RelationshipType::from_uri_token("friendOf"), None);
    }

    #[test]
    fn test_tag_value_spelling() {
        assert_eq!(RelationshipType::DependsOn.as_str(), "DEPENDS_ON");
        assert_eq!(
            RelationshipType::ExpandedFromArchive.as_str(),
            "EXPANDED_FROM_ARCHIVE"
        );
    }
}
