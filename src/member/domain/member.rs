//! Member aggregate and validated member name.

use super::{MemberDomainError, MemberId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role assigned to members created without an explicit role.
pub const DEFAULT_MEMBER_ROLE: &str = "member";

/// Display label for tasks that have no assignee.
pub const UNASSIGNED_LABEL: &str = "Unassigned";

/// Display label for assignee references whose member no longer exists.
pub const UNKNOWN_MEMBER_LABEL: &str = "Unknown";

/// Non-empty, trimmed member display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberName(String);

impl MemberName {
    /// Creates a validated member name.
    ///
    /// # Errors
    ///
    /// Returns [`MemberDomainError::EmptyMemberName`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, MemberDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MemberDomainError::EmptyMemberName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for MemberName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for MemberName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A person tasks can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    id: MemberId,
    name: MemberName,
    role: String,
    email: Option<String>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedMemberData {
    /// Persisted member identifier.
    pub id: MemberId,
    /// Persisted display name.
    pub name: MemberName,
    /// Persisted free-text role.
    pub role: String,
    /// Persisted e-mail address, if any.
    pub email: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Member {
    /// Creates a member with the default role and no e-mail address.
    #[must_use]
    pub fn new(name: MemberName, clock: &impl Clock) -> Self {
        Self {
            id: MemberId::new(),
            name,
            role: DEFAULT_MEMBER_ROLE.to_owned(),
            email: None,
            created_at: clock.utc(),
        }
    }

    /// Sets the member role. Blank roles keep the default.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        let raw = role.into();
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            self.role = trimmed.to_owned();
        }
        self
    }

    /// Sets the member e-mail address. Blank addresses are ignored.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        let raw = email.into();
        let trimmed = raw.trim();
        self.email = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    /// Reconstructs a member from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedMemberData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            role: data.role,
            email: data.email,
            created_at: data.created_at,
        }
    }

    /// Returns the member identifier.
    #[must_use]
    pub const fn id(&self) -> MemberId {
        self.id
    }

    /// Returns the member display name.
    #[must_use]
    pub const fn name(&self) -> &MemberName {
        &self.name
    }

    /// Returns the free-text role.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Returns the e-mail address, if any.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
