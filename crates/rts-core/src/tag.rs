//! Trigger tags
//!
//! A tag is either a plain number or a string. String tags are reduced to a
//! 32-bit hash for matching, with the original text kept for diagnostics.
//! The two forms live in separate namespaces: a numeric tag `5` never matches
//! a string tag whose hash happens to be `5`.

use serde::{Deserialize, Serialize};
use std::fmt;

const FNV_OFFSET: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Hash a tag name (case-insensitive FNV-1a)
pub fn hash_name(name: &str) -> u32 {
    let mut h = FNV_OFFSET;
    for b in name.bytes() {
        h ^= b.to_ascii_uppercase() as u32;
        h = h.wrapping_mul(FNV_PRIME);
    }
    h
}

/// Tag attached to a script definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tag {
    /// Purely numeric tag
    Numeric(u32),
    /// String tag, matched by hash
    Hashed { hash: u32, name: String },
}

impl Tag {
    /// Parse tag text: purely numeric text is a numeric tag, anything else is hashed
    pub fn parse(text: &str) -> Self {
        match parse_numeric(text) {
            Some(n) => Tag::Numeric(n),
            None => Tag::Hashed {
                hash: hash_name(text),
                name: text.to_string(),
            },
        }
    }

    /// The key used to match this tag at runtime
    pub fn key(&self) -> TagKey {
        match self {
            Tag::Numeric(n) => TagKey::Numeric(*n),
            Tag::Hashed { hash, .. } => TagKey::Hashed(*hash),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Numeric(n) => write!(f, "{}", n),
            Tag::Hashed { hash, name } => write!(f, "{} (#{:08x})", name, hash),
        }
    }
}

/// Match key for a tag; numeric and hashed keys never compare equal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagKey {
    Numeric(u32),
    Hashed(u32),
}

impl TagKey {
    /// Parse tag text into a match key
    pub fn parse(text: &str) -> Self {
        Tag::parse(text).key()
    }
}

impl From<u32> for TagKey {
    fn from(n: u32) -> Self {
        TagKey::Numeric(n)
    }
}

fn parse_numeric(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric() {
        assert_eq!(Tag::parse("42"), Tag::Numeric(42));
        assert_eq!(Tag::parse("42").key(), TagKey::Numeric(42));
    }

    #[test]
    fn test_parse_hashed() {
        let tag = Tag::parse("door_group");
        match &tag {
            Tag::Hashed { hash, name } => {
                assert_eq!(*hash, hash_name("door_group"));
                assert_eq!(name, "door_group");
            }
            other => panic!("expected hashed tag, got {:?}", other),
        }
        // Signs and mixed text are not purely numeric
        assert!(matches!(Tag::parse("-5"), Tag::Hashed { .. }));
        assert!(matches!(Tag::parse("5a"), Tag::Hashed { .. }));
    }

    #[test]
    fn test_hash_case_insensitive() {
        assert_eq!(hash_name("Lift"), hash_name("LIFT"));
        assert_ne!(hash_name("LIFT"), hash_name("LIFTS"));
    }

    #[test]
    fn test_namespaces_disjoint() {
        let hashed = Tag::parse("some_name");
        let TagKey::Hashed(h) = hashed.key() else {
            panic!("expected hashed key");
        };
        // A numeric tag with the identical bit pattern is still a different key
        assert_ne!(TagKey::Numeric(h), hashed.key());
    }

    #[test]
    fn test_display() {
        assert_eq!(Tag::Numeric(7).to_string(), "7");
        assert!(Tag::parse("gate").to_string().starts_with("gate (#"));
    }
}
