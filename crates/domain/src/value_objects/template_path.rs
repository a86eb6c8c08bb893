//! Template identity.
//!
//! Templates are addressed by path (`object/building/player/player_house_small.iff`).
//! Lookups go through a hashed [`TemplateId`]; the path itself is only consulted
//! when a named category has to be matched.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable hash of a template path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TemplateId(u32);

impl TemplateId {
    /// Hashes a path with the polynomial string hash (`h = 31 * h + byte`).
    pub const fn of(path: &str) -> Self {
        let bytes = path.as_bytes();
        let mut hash: u32 = 0;
        let mut i = 0;
        while i < bytes.len() {
            hash = hash.wrapping_mul(31).wrapping_add(bytes[i] as u32);
            i += 1;
        }
        Self(hash)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// A template path together with its precomputed id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TemplatePath {
    path: String,
    id: TemplateId,
}

impl TemplatePath {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let id = TemplateId::of(&path);
        Self { path, id }
    }

    pub fn id(&self) -> TemplateId {
        self.id
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Whether the path belongs to a named category (e.g. `faction_perk`).
    pub fn is_in_category(&self, marker: &str) -> bool {
        self.path.contains(marker)
    }
}

impl fmt::Display for TemplatePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

impl From<String> for TemplatePath {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl From<&str> for TemplatePath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<TemplatePath> for String {
    fn from(path: TemplatePath) -> String {
        path.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_stable_for_equal_paths() {
        let a = TemplatePath::new("object/building/player/player_house_small.iff");
        let b = TemplatePath::new(String::from(
            "object/building/player/player_house_small.iff",
        ));
        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), TemplateId::of("object/active_area.iff"));
    }

    #[test]
    fn hash_matches_polynomial_definition() {
        // "ab" = 97 * 31 + 98
        assert_eq!(TemplateId::of("ab").as_u32(), 97 * 31 + 98);
        assert_eq!(TemplateId::of("").as_u32(), 0);
    }

    #[test]
    fn category_match_is_by_substring() {
        let path = TemplatePath::new("object/building/faction_perk/hq/hq_s01.iff");
        assert!(path.is_in_category("faction_perk"));
        assert!(!TemplatePath::new("object/building/player/house.iff").is_in_category("faction_perk"));
    }

    #[test]
    fn serializes_as_plain_path() {
        let path = TemplatePath::new("object/tangible/deed.iff");
        let json = serde_json::to_string(&path).expect("serialize");
        assert_eq!(json, "\"object/tangible/deed.iff\"");
        let back: TemplatePath = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.id(), path.id());
    }
}
