//! Enum types for the suds system.
//!
//! Each enum serializes as its wire string (the spelling the original data
//! files use), and has `as_str()`, `Display`, and `FromStr` impls.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Which alkali a recipe is saponified with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LyeType {
    /// Sodium hydroxide -- solid soap.
    #[default]
    NaOh,
    /// Potassium hydroxide -- liquid soap.
    Koh,
    /// A blend of both, split by `Recipe::ratio_koh`.
    Mixed,
}

impl LyeType {
    /// Returns the wire string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NaOh => "NaOH",
            Self::Koh => "KOH",
            Self::Mixed => "Mixed",
        }
    }

    /// Returns `true` if this is the default variant.
    pub fn is_default(&self) -> bool {
        *self == Self::NaOh
    }
}

impl fmt::Display for LyeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LyeType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NaOH" => Ok(Self::NaOh),
            "KOH" => Ok(Self::Koh),
            "Mixed" => Ok(Self::Mixed),
            other => Err(ParseEnumError {
                kind: "lye type",
                value: other.to_owned(),
                expected: "NaOH, KOH, Mixed",
            }),
        }
    }
}

impl Serialize for LyeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LyeType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Kind of scent added to a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FragranceKind {
    /// No scent.
    #[default]
    None,
    /// Essential oil.
    Essential,
    /// Synthetic fragrance oil.
    FragranceOil,
}

impl FragranceKind {
    /// Returns the wire string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Essential => "essential",
            Self::FragranceOil => "fragrance_oil",
        }
    }

    /// Returns `true` if this is the default variant (no scent).
    pub fn is_default(&self) -> bool {
        *self == Self::None
    }
}

impl fmt::Display for FragranceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FragranceKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "essential" => Ok(Self::Essential),
            "fragrance_oil" => Ok(Self::FragranceOil),
            other => Err(ParseEnumError {
                kind: "fragrance kind",
                value: other.to_owned(),
                expected: "none, essential, fragrance_oil",
            }),
        }
    }
}

impl Serialize for FragranceKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FragranceKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error returned when parsing an enum from its wire string fails.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lye_type_roundtrips_through_wire_strings() {
        for lye in [LyeType::NaOh, LyeType::Koh, LyeType::Mixed] {
            let json = serde_json::to_string(&lye).unwrap();
            let back: LyeType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, lye);
        }
    }

    #[test]
    fn lye_type_wire_spelling() {
        assert_eq!(serde_json::to_string(&LyeType::NaOh).unwrap(), "\"NaOH\"");
        assert_eq!(serde_json::to_string(&LyeType::Koh).unwrap(), "\"KOH\"");
        assert_eq!(serde_json::to_string(&LyeType::Mixed).unwrap(), "\"Mixed\"");
    }

    #[test]
    fn lye_type_rejects_unknown() {
        let result: Result<LyeType, _> = serde_json::from_str("\"lithium\"");
        assert!(result.is_err());
    }

    #[test]
    fn fragrance_kind_wire_spelling() {
        assert_eq!(
            serde_json::to_string(&FragranceKind::FragranceOil).unwrap(),
            "\"fragrance_oil\""
        );
    }

    #[test]
    fn parse_error_message_names_value() {
        let err = "soda".parse::<LyeType>().unwrap_err();
        assert!(err.to_string().contains("soda"));
    }
}
