//! Application services for the member directory.

mod directory;

pub use directory::{
    CreateMemberRequest, MemberDirectoryError, MemberDirectoryResult, MemberDirectoryService,
};
