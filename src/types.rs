//! types
//!
//! Strong types for graph identity.
//!
//! # Types
//!
//! - [`VertexName`] - Validated vertex name
//!
//! # Validation
//!
//! [`VertexName`] enforces validity at construction time, so an invalid
//! name cannot appear in a graph or in a cycle diagnostic.
//!
//! # Examples
//!
//! ```
//! use strata::types::VertexName;
//!
//! let name = VertexName::new("persistence-store").unwrap();
//! assert_eq!(name.as_str(), "persistence-store");
//!
//! assert!(VertexName::new("").is_err());
//! assert!(VertexName::new("has space").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid vertex name: {0}")]
    InvalidVertexName(String),
}

/// A validated vertex name.
///
/// Names identify vertices within a verification batch and appear verbatim
/// in cycle-path diagnostics, so they must be:
/// - Non-empty
/// - Free of whitespace
/// - Free of ASCII control characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VertexName(String);

impl VertexName {
    /// Create a new validated vertex name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidVertexName` if the name is empty or
    /// contains whitespace or control characters.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidVertexName(
                "vertex name cannot be empty".into(),
            ));
        }

        if name.chars().any(|c| c.is_whitespace()) {
            return Err(TypeError::InvalidVertexName(format!(
                "vertex name cannot contain whitespace: '{}'",
                name
            )));
        }

        if name.chars().any(|c| c.is_ascii_control()) {
            return Err(TypeError::InvalidVertexName(
                "vertex name cannot contain control characters".into(),
            ));
        }

        Ok(())
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VertexName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VertexName> for String {
    fn from(name: VertexName) -> Self {
        name.0
    }
}

impl AsRef<str> for VertexName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VertexName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names_accepted() {
        for name in ["store", "tx-manager", "dot.vm/core", "A"] {
            assert!(VertexName::new(name).is_ok(), "rejected: {}", name);
        }
    }

    #[test]
    fn empty_name_rejected() {
        assert_eq!(
            VertexName::new(""),
            Err(TypeError::InvalidVertexName(
                "vertex name cannot be empty".into()
            ))
        );
    }

    #[test]
    fn whitespace_rejected() {
        assert!(VertexName::new("two words").is_err());
        assert!(VertexName::new("tab\there").is_err());
        assert!(VertexName::new("trailing ").is_err());
    }

    #[test]
    fn control_characters_rejected() {
        assert!(VertexName::new("nul\0byte").is_err());
    }

    #[test]
    fn serde_round_trip() {
        let name = VertexName::new("scheduler").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"scheduler\"");
        let back: VertexName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
    }

    #[test]
    fn serde_rejects_invalid() {
        let result: Result<VertexName, _> = serde_json::from_str("\"has space\"");
        assert!(result.is_err());
    }

    #[test]
    fn display_matches_as_str() {
        let name = VertexName::new("engine").unwrap();
        assert_eq!(name.to_string(), name.as_str());
    }
}
