//! Port contracts for the member directory.

pub mod repository;

pub use repository::{MemberRepository, MemberRepositoryError, MemberRepositoryResult};
