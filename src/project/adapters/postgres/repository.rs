//! `PostgreSQL` repository implementation for the project registry.

use super::{
    models::{NewProjectRow, ProjectRow},
    schema::projects,
};
use crate::postgres::{PgPool, run_blocking};
use crate::project::{
    domain::{PersistedProjectData, Project, ProjectId, ProjectKey, ProjectName},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let key = project.key().clone();
        let new_row = to_new_row(project);

        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(projects::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_key_unique_violation(info.as_ref()) =>
                    {
                        ProjectRepositoryError::DuplicateKey(key.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProjectRepositoryError::DuplicateProject(project_id)
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        run_blocking(&self.pool, move |connection| {
            let row = projects::table
                .find(id.into_inner())
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn find_by_key(&self, key: &ProjectKey) -> ProjectRepositoryResult<Option<Project>> {
        let lookup_key = key.as_str().to_owned();
        run_blocking(&self.pool, move |connection| {
            let row = projects::table
                .filter(projects::key.eq(lookup_key))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        run_blocking(&self.pool, |connection| {
            let rows = projects::table
                .order(projects::created_at.desc())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            rows.into_iter().map(row_to_project).collect()
        })
        .await
    }
}

fn to_new_row(project: &Project) -> NewProjectRow {
    NewProjectRow {
        id: project.id().into_inner(),
        name: project.name().as_str().to_owned(),
        key: project.key().as_str().to_owned(),
        description: project.description().map(str::to_owned),
        created_at: project.created_at(),
    }
}

fn row_to_project(row: ProjectRow) -> ProjectRepositoryResult<Project> {
    let ProjectRow {
        id,
        name: persisted_name,
        key: persisted_key,
        description,
        created_at,
    } = row;

    let name =
        ProjectName::new(persisted_name).map_err(ProjectRepositoryError::invalid_persisted_data)?;
    let key =
        ProjectKey::new(persisted_key).map_err(ProjectRepositoryError::invalid_persisted_data)?;

    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(id),
        name,
        key,
        description,
        created_at,
    }))
}

fn is_key_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_projects_key_unique")
}

#[cfg(test)]
mod tests {
    use super::{ProjectRow, row_to_project};
    use rstest::rstest;

    #[rstest]
    fn persisted_lower_case_key_is_normalised_on_read() {
        let row = ProjectRow {
            id: uuid::Uuid::new_v4(),
            name: "Platform".to_owned(),
            key: "plat".to_owned(),
            description: None,
            created_at: chrono::Utc::now(),
        };

        let project = row_to_project(row).expect("row should convert");

        assert_eq!(project.key().as_str(), "PLAT");
    }
}
