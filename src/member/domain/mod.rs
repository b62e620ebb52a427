//! Domain model for the member directory.

mod error;
mod ids;
mod member;

pub use error::MemberDomainError;
pub use ids::MemberId;
pub use member::{
    DEFAULT_MEMBER_ROLE, Member, MemberName, PersistedMemberData, UNASSIGNED_LABEL,
    UNKNOWN_MEMBER_LABEL,
};
