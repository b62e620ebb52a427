//! Error classification shared by every service boundary.
//!
//! Each service keeps its own `thiserror` enum so callers can match on the
//! precise failure. [`ErrorKind`] collapses those enums onto the small
//! taxonomy an inbound transport needs to pick a response.

use std::fmt;

/// Coarse classification of service failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required field is missing or a value failed validation.
    Validation,
    /// The target identifier does not resolve.
    NotFound,
    /// Admission was refused because the member is at capacity.
    CapacityExceeded,
    /// A uniqueness rule was violated.
    DuplicateKey,
    /// The underlying persistence call failed.
    Storage,
}

impl ErrorKind {
    /// Returns a stable snake-case label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::CapacityExceeded => "capacity_exceeded",
            Self::DuplicateKey => "duplicate_key",
            Self::Storage => "storage",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
