//! `PostgreSQL` repository implementation for the member directory.

use super::{
    models::{MemberRow, NewMemberRow},
    schema::members,
};
use crate::member::{
    domain::{Member, MemberId, MemberName, PersistedMemberData},
    ports::{MemberRepository, MemberRepositoryError, MemberRepositoryResult},
};
use crate::postgres::{PgPool, run_blocking};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed member repository.
#[derive(Debug, Clone)]
pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn store(&self, member: &Member) -> MemberRepositoryResult<()> {
        let member_id = member.id();
        let new_row = to_new_row(member);
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(members::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        MemberRepositoryError::DuplicateMember(member_id)
                    }
                    _ => MemberRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: MemberId) -> MemberRepositoryResult<Option<Member>> {
        run_blocking(&self.pool, move |connection| {
            let row = members::table
                .find(id.into_inner())
                .select(MemberRow::as_select())
                .first::<MemberRow>(connection)
                .optional()
                .map_err(MemberRepositoryError::persistence)?;
            row.map(row_to_member).transpose()
        })
        .await
    }

    async fn list_all(&self) -> MemberRepositoryResult<Vec<Member>> {
        run_blocking(&self.pool, |connection| {
            let rows = members::table
                .order((members::name.asc(), members::created_at.asc()))
                .select(MemberRow::as_select())
                .load::<MemberRow>(connection)
                .map_err(MemberRepositoryError::persistence)?;
            rows.into_iter().map(row_to_member).collect()
        })
        .await
    }

    async fn delete(&self, id: MemberId) -> MemberRepositoryResult<bool> {
        run_blocking(&self.pool, move |connection| {
            let removed = diesel::delete(members::table.find(id.into_inner()))
                .execute(connection)
                .map_err(MemberRepositoryError::persistence)?;
            Ok(removed > 0)
        })
        .await
    }
}

fn to_new_row(member: &Member) -> NewMemberRow {
    NewMemberRow {
        id: member.id().into_inner(),
        name: member.name().as_str().to_owned(),
        role: member.role().to_owned(),
        email: member.email().map(str::to_owned),
        created_at: member.created_at(),
    }
}

fn row_to_member(row: MemberRow) -> MemberRepositoryResult<Member> {
    let MemberRow {
        id,
        name: persisted_name,
        role,
        email,
        created_at,
    } = row;

    let name = MemberName::new(persisted_name)
        .map_err(MemberRepositoryError::invalid_persisted_data)?;

    Ok(Member::from_persisted(PersistedMemberData {
        id: MemberId::from_uuid(id),
        name,
        role,
        email,
        created_at,
    }))
}
