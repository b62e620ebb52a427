//! Case-normalised project key.

use super::ProjectDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Short project key, always stored upper-cased.
///
/// Two keys that differ only in case normalise to the same value, which is
/// what makes the registry's uniqueness rule case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectKey(String);

impl ProjectKey {
    /// Creates a validated, upper-cased project key.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyProjectKey`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProjectDomainError::EmptyProjectKey);
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
