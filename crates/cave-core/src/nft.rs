//! Non-fungible local id variants.
//!
//! The Gateway encodes non-fungible local ids in one of four
//! representations, each with a delimited canonical text form:
//! `#123#` (integer), `<name>` (string), `[deadbeef]` (bytes, hex),
//! `{...-...-...-...}` (RUID). Two ids are the same id exactly when
//! their canonical text matches, regardless of how they were built.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A non-fungible local id.
#[derive(Debug, Clone)]
pub enum NftId {
    /// Integer id, canonical form `#n#`.
    Integer(i64),
    /// String id, canonical form `<s>`.
    Str(String),
    /// Bytes id carrying its hex text, canonical form `[hex]`.
    Bytes(String),
    /// RUID id, canonical form `{ruid}`.
    Ruid(String),
}

impl NftId {
    /// Parse a canonical text form into its variant.
    ///
    /// Text without a recognized delimiter pair is kept as a string id,
    /// so malformed ids still round-trip rather than being dropped.
    pub fn parse(raw: &str) -> Self {
        let inner = |s: &str| s[1..s.len() - 1].to_string();
        if raw.len() >= 2 {
            if raw.starts_with('#') && raw.ends_with('#') {
                if let Ok(n) = raw[1..raw.len() - 1].parse::<i64>() {
                    return Self::Integer(n);
                }
            } else if raw.starts_with('<') && raw.ends_with('>') {
                return Self::Str(inner(raw));
            } else if raw.starts_with('[') && raw.ends_with(']') {
                return Self::Bytes(inner(raw));
            } else if raw.starts_with('{') && raw.ends_with('}') {
                return Self::Ruid(inner(raw));
            }
        }
        Self::Str(raw.to_string())
    }

    /// The delimited canonical text form.
    pub fn canonical(&self) -> String {
        match self {
            Self::Integer(n) => format!("#{n}#"),
            Self::Str(s) => format!("<{s}>"),
            Self::Bytes(hex) => format!("[{hex}]"),
            Self::Ruid(ruid) => format!("{{{ruid}}}"),
        }
    }
}

impl PartialEq for NftId {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for NftId {}

impl Hash for NftId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl fmt::Display for NftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl Serialize for NftId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical())
    }
}

impl<'de> Deserialize<'de> for NftId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variants() {
        assert_eq!(NftId::parse("#42#"), NftId::Integer(42));
        assert_eq!(NftId::parse("<hero_7>"), NftId::Str("hero_7".to_string()));
        assert_eq!(NftId::parse("[deadbeef]"), NftId::Bytes("deadbeef".to_string()));
        assert!(matches!(NftId::parse("{aa-bb-cc-dd}"), NftId::Ruid(_)));
    }

    #[test]
    fn test_unrecognized_form_kept_as_string() {
        let id = NftId::parse("plain");
        assert_eq!(id, NftId::Str("plain".to_string()));
    }

    #[test]
    fn test_equality_is_by_canonical_text() {
        // Same canonical text, equal.
        assert_eq!(NftId::parse("#7#"), NftId::Integer(7));
        // Same inner text, different kind -> different canonical text.
        assert_ne!(NftId::Str("7".to_string()), NftId::Integer(7));
    }

    #[test]
    fn test_serde_round_trip() {
        let id = NftId::Integer(99);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r##""#99#""##);
        let back: NftId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
