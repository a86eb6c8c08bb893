//! Validated name newtypes for domain entities
//!
//! These newtypes ensure that names are valid by construction:
//! - Non-empty
//! - Within length limits
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for an actor's given name
const MAX_NAME_LENGTH: usize = 200;

// ============================================================================
// ActorName
// ============================================================================

/// A validated given name (non-empty, <=200 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActorName(String);

impl ActorName {
    /// Create a new validated actor name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is empty after trimming
    /// - The name exceeds 200 characters after trimming
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Actor name cannot be empty"));
        }
        if trimmed.len() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Actor name cannot exceed {} characters",
                MAX_NAME_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Possessive form used for personal house signs ("Ana's House").
    pub fn house_name(&self) -> String {
        format!("{}'s House", self.0)
    }
}

impl fmt::Display for ActorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ActorName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ActorName> for String {
    fn from(name: ActorName) -> String {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        let name = ActorName::new("  Ana  ").expect("valid name");
        assert_eq!(name.as_str(), "Ana");
    }

    #[test]
    fn rejects_empty() {
        assert!(ActorName::new("   ").is_err());
    }

    #[test]
    fn rejects_too_long() {
        assert!(ActorName::new("a".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn house_name_is_possessive() {
        let name = ActorName::new("Ana").expect("valid name");
        assert_eq!(name.house_name(), "Ana's House");
    }

    #[test]
    fn deserializes_through_validation() {
        let bad: Result<ActorName, _> = serde_json::from_str("\"\"");
        assert!(bad.is_err());
        let good: ActorName = serde_json::from_str("\"Ana\"").expect("valid json");
        assert_eq!(good.as_str(), "Ana");
    }
}
