//! Model value object representing an LLM model

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of an LLM model (Value Object)
///
/// Model catalogs on OpenRouter-style providers are open-ended, so this is a
/// validated wrapper around the provider's identifier string, typically of
/// the form `vendor/name` or `vendor/name:variant`
/// (e.g. `google/gemini-2.0-pro-exp-02-05:free`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Model(String);

impl Model {
    /// Create a new model identifier
    ///
    /// # Panics
    /// Panics if the identifier is empty or only whitespace
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        assert!(!id.trim().is_empty(), "Model identifier cannot be empty");
        Self(id)
    }

    /// Try to create a new model identifier, returning None if invalid
    pub fn try_new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() { None } else { Some(Self(id)) }
    }

    /// Get the identifier string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The vendor prefix, if the identifier carries one (`google/...`)
    pub fn vendor(&self) -> Option<&str> {
        self.0.split_once('/').map(|(vendor, _)| vendor)
    }

    /// Whether this identifier names a zero-cost catalog variant
    pub fn is_free_variant(&self) -> bool {
        self.0.ends_with(":free")
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Model {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Model::try_new(s).ok_or_else(|| DomainError::InvalidModel(s.to_string()))
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        let model = Model::new("google/gemini-2.0-pro-exp-02-05:free");
        let parsed: Model = model.as_str().parse().unwrap();
        assert_eq!(model, parsed);
    }

    #[test]
    fn test_vendor_prefix() {
        let model = Model::new("meta-llama/llama-3.3-70b-instruct:free");
        assert_eq!(model.vendor(), Some("meta-llama"));
        assert!(model.is_free_variant());

        let bare = Model::new("local-model");
        assert_eq!(bare.vendor(), None);
        assert!(!bare.is_free_variant());
    }

    #[test]
    fn test_empty_identifier_rejected() {
        assert!(Model::try_new("").is_none());
        assert!(Model::try_new("   ").is_none());
        assert!("".parse::<Model>().is_err());
    }

    #[test]
    #[should_panic]
    fn test_empty_identifier_panics() {
        Model::new("");
    }
}
