//! Identifier type for directory members.

use super::MemberDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a member.
///
/// Tasks hold member identifiers as weak references: the member may be
/// deleted while tasks still point at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(Uuid);

impl MemberId {
    /// Creates a new random member identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a member identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parses a member identifier supplied as text.
    ///
    /// # Errors
    ///
    /// Returns [`MemberDomainError::EmptyMemberId`] when the value is blank,
    /// or [`MemberDomainError::InvalidMemberId`] when it is not a UUID.
    pub fn parse(value: &str) -> Result<Self, MemberDomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(MemberDomainError::EmptyMemberId);
        }
        Uuid::parse_str(trimmed)
            .map(Self)
            .map_err(|_| MemberDomainError::InvalidMemberId(value.to_owned()))
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for MemberId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for MemberId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
