//! In-memory repository for the member directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::member::{
    domain::{Member, MemberId},
    ports::{MemberRepository, MemberRepositoryError, MemberRepositoryResult},
};

/// Thread-safe in-memory member repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMemberRepository {
    state: Arc<RwLock<HashMap<MemberId, Member>>>,
}

impl InMemoryMemberRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> MemberRepositoryError {
    MemberRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn store(&self, member: &Member) -> MemberRepositoryResult<()> {
        let mut members = self.state.write().map_err(lock_error)?;
        if members.contains_key(&member.id()) {
            return Err(MemberRepositoryError::DuplicateMember(member.id()));
        }
        members.insert(member.id(), member.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: MemberId) -> MemberRepositoryResult<Option<Member>> {
        let members = self.state.read().map_err(lock_error)?;
        Ok(members.get(&id).cloned())
    }

    async fn list_all(&self) -> MemberRepositoryResult<Vec<Member>> {
        let members = self.state.read().map_err(lock_error)?;
        let mut listed: Vec<Member> = members.values().cloned().collect();
        listed.sort_by(|left, right| {
            left.name()
                .cmp(right.name())
                .then_with(|| left.created_at().cmp(&right.created_at()))
        });
        Ok(listed)
    }

    async fn delete(&self, id: MemberId) -> MemberRepositoryResult<bool> {
        let mut members = self.state.write().map_err(lock_error)?;
        Ok(members.remove(&id).is_some())
    }
}
