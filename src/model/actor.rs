//! Actors: the `"<Type>: <value>"` compound scalar convention shared by
//! creators, suppliers, originators, annotators, and reviewers.

use crate::error::{ParseError, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The fixed set of actor types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    Person,
    Organization,
    Tool,
}

impl ActorKind {
    /// All actor kinds, for contexts that accept any of them.
    pub const ALL: &'static [Self] = &[Self::Person, Self::Organization, Self::Tool];
    /// Suppliers and originators never name tools.
    pub const NO_TOOL: &'static [Self] = &[Self::Person, Self::Organization];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Person => "Person",
            Self::Organization => "Organization",
            Self::Tool => "Tool",
        }
    }

    fn from_token(s: &str) -> Option<Self> {
        match s {
            "Person" => Some(Self::Person),
            "Organization" => Some(Self::Organization),
            "Tool" => Some(Self::Tool),
            _ => None,
        }
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed actor, serialized as `"<Type>: <value>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Actor {
    pub kind: ActorKind,
    pub name: String,
}

impl Actor {
    /// Split on the first colon, trim both halves, and validate the type
    /// against `allowed`. An unrecognized or disallowed type is an error,
    /// as is a value with no type prefix at all.
    pub fn parse_with(s: &str, field: &'static str, allowed: &[ActorKind]) -> Result<Self> {
        let Some((kind, name)) = s.split_once(':') else {
            return Err(ParseError::invalid_value(field, s));
        };
        let Some(kind) = ActorKind::from_token(kind.trim()) else {
            return Err(ParseError::invalid_value(field, s));
        };
        if !allowed.contains(&kind) {
            return Err(ParseError::invalid_value(field, s));
        }
        Ok(Self {
            kind,
            name: name.trim().to_string(),
        })
    }

    /// Parse accepting any actor kind.
    pub fn parse(s: &str, field: &'static str) -> Result<Self> {
        Self::parse_with(s, field, ActorKind::ALL)
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.name)
    }
}

impl Serialize for Actor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Actor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s, "actor").map_err(D::Error::custom)
    }
}

/// A supplier/originator field: a typed actor or the literal `NOASSERTION`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActorOrNoAssertion {
    Actor(Actor),
    NoAssertion(NoAssertionToken),
}

/// Marker that serializes as the literal `NOASSERTION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoAssertionToken;

impl Serialize for NoAssertionToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str("NOASSERTION")
    }
}

impl<'de> Deserialize<'de> for NoAssertionToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s == "NOASSERTION" {
            Ok(Self)
        } else {
            Err(D::Error::custom("expected NOASSERTION"))
        }
    }
}

impl ActorOrNoAssertion {
    /// Parse a supplier/originator value: `NOASSERTION` or `"<Type>: <value>"`
    /// with Person/Organization types only.
    pub fn parse(s: &str, field: &'static str) -> Result<Self> {
        if s == "NOASSERTION" {
            return Ok(Self::NoAssertion(NoAssertionToken));
        }
        Actor::parse_with(s, field, ActorKind::NO_TOOL).map(Self::Actor)
    }
}

impl fmt::Display for ActorOrNoAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actor(a) => write!(f, "{a}"),
            Self::NoAssertion(_) => f.write_str("NOASSERTION"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_person() {
        let actor = Actor::parse("Person: Jane Doe", "creator").unwrap();
        assert_eq!(actor.kind, ActorKind::Person);
        assert_eq!(actor.name, "Jane Doe");
        assert_eq!(actor.to_string(), "Person: Jane Doe");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let actor = Actor::parse("Organization:   Acme Corp  ", "creator").unwrap();
        assert_eq!(actor.name, "Acme Corp");
    }

    #[test]
    fn test_missing_type_prefix_is_error() {
        assert!(matches!(
            Actor::parse("John Doe", "supplier"),
            Err(ParseError::InvalidEnumValue { .. })
        ));
    }

    #[test]
    fn test_unknown_type_is_error() {
        assert!(Actor::parse("Robot: R2D2", "creator").is_err());
    }

    #[test]
    fn test_supplier_rejects_tool() {
        assert!(ActorOrNoAssertion::parse("Tool: acme-scanner", "supplier").is_err());
        assert!(ActorOrNoAssertion::parse("Person: Jane Doe", "supplier").is_ok());
    }

    #[test]
    fn test_supplier_noassertion() {
        let v = ActorOrNoAssertion::parse("NOASSERTION", "supplier").unwrap();
        assert_eq!(v.to_string(), "NOASSERTION");
    }
}
