//! Error types for member domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing member domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MemberDomainError {
    /// The member name is empty after trimming.
    #[error("member name must not be empty")]
    EmptyMemberName,

    /// A member identifier was required but the value was empty.
    #[error("member identifier must not be empty")]
    EmptyMemberId,

    /// The member identifier is not a valid UUID.
    #[error("invalid member identifier: {0}")]
    InvalidMemberId(String),
}
