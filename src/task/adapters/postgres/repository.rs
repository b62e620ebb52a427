//! `PostgreSQL` repository implementation for the task workflow engine.

use super::{
    models::{NewTaskRow, TaskChangesetRow, TaskRow},
    schema::tasks,
};
use crate::member::domain::MemberId;
use crate::postgres::{PgPool, run_blocking};
use crate::project::domain::ProjectId;
use crate::task::{
    domain::{
        AssigneeChange, PersistedTaskData, Task, TaskChanges, TaskFilter, TaskId, TaskPriority,
        TaskStatus, TaskTags, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = full_changeset(task);

        run_blocking(&self.pool, move |connection| {
            let affected = diesel::update(tasks::table.find(task_id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn update_fields(&self, id: TaskId, changes: &TaskChanges) -> TaskRepositoryResult<Task> {
        let changeset = partial_changeset(changes);

        run_blocking(&self.pool, move |connection| {
            let row = diesel::update(tasks::table.find(id.into_inner()))
                .set(&changeset)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map_or_else(|| Err(TaskRepositoryError::NotFound(id)), row_to_task)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        run_blocking(&self.pool, move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        run_blocking(&self.pool, move |connection| {
            let affected = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(affected > 0)
        })
        .await
    }

    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let criteria = filter.clone();

        run_blocking(&self.pool, move |connection| {
            let mut query = tasks::table.select(TaskRow::as_select()).into_boxed();
            if let Some(status) = criteria.status() {
                query = query.filter(tasks::status.eq(status.as_str()));
            }
            if let Some(assignee_id) = criteria.assignee_id() {
                query = query.filter(tasks::assignee_id.eq(assignee_id.into_inner()));
            }
            if let Some(tag) = criteria.tag() {
                query = query.filter(tasks::tags.contains(vec![tag.to_owned()]));
            }
            if let Some(priority) = criteria.priority() {
                query = query.filter(tasks::priority.eq(priority.as_str()));
            }
            if let Some(project_id) = criteria.project_id() {
                query = query.filter(tasks::project_id.eq(project_id.into_inner()));
            }
            if let Some(from) = criteria.created_from() {
                query = query.filter(tasks::created_at.ge(from));
            }
            if let Some(until) = criteria.created_until() {
                query = query.filter(tasks::created_at.le(until));
            }

            let rows = query
                .order(tasks::created_at.desc())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn count_in_progress_for(&self, member_id: MemberId) -> TaskRepositoryResult<u64> {
        run_blocking(&self.pool, move |connection| {
            let count = tasks::table
                .filter(tasks::assignee_id.eq(member_id.into_inner()))
                .filter(tasks::status.eq(TaskStatus::InProgress.as_str()))
                .count()
                .get_result::<i64>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            u64::try_from(count).map_err(TaskRepositoryError::invalid_persisted_data)
        })
        .await
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        assignee_id: task.assignee_id().map(MemberId::into_inner),
        tags: task.tags().as_slice().to_vec(),
        project_id: task.project_id().map(ProjectId::into_inner),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn full_changeset(task: &Task) -> TaskChangesetRow {
    TaskChangesetRow {
        title: Some(task.title().as_str().to_owned()),
        description: Some(task.description().map(str::to_owned)),
        status: Some(task.status().as_str().to_owned()),
        priority: Some(task.priority().as_str().to_owned()),
        assignee_id: Some(task.assignee_id().map(MemberId::into_inner)),
        tags: Some(task.tags().as_slice().to_vec()),
        project_id: task.project_id().map(ProjectId::into_inner),
        updated_at: task.updated_at(),
    }
}

fn partial_changeset(changes: &TaskChanges) -> TaskChangesetRow {
    let assignee_id = match changes.assignee() {
        AssigneeChange::Keep => None,
        AssigneeChange::Set(member_id) => Some(Some(member_id.into_inner())),
        AssigneeChange::Clear => Some(None),
    };
    let description = changes.description().map(|text| {
        if text.trim().is_empty() {
            None
        } else {
            Some(text.to_owned())
        }
    });

    TaskChangesetRow {
        title: changes.title().map(|title| title.as_str().to_owned()),
        description,
        status: changes.status().map(|status| status.as_str().to_owned()),
        priority: changes.priority().map(|priority| priority.as_str().to_owned()),
        assignee_id,
        tags: changes.tags().map(|tags| tags.as_slice().to_vec()),
        project_id: changes.project_id().map(ProjectId::into_inner),
        updated_at: changes.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title: persisted_title,
        description,
        status: persisted_status,
        priority: persisted_priority,
        assignee_id,
        tags,
        project_id,
        created_at,
        updated_at,
    } = row;

    let title =
        TaskTitle::new(persisted_title).map_err(TaskRepositoryError::invalid_persisted_data)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::invalid_persisted_data)?;
    let priority = TaskPriority::try_from(persisted_priority.as_str())
        .map_err(TaskRepositoryError::invalid_persisted_data)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        status,
        priority,
        assignee_id: assignee_id.map(MemberId::from_uuid),
        tags: TaskTags::new(tags),
        project_id: project_id.map(ProjectId::from_uuid),
        created_at,
        updated_at,
    }))
}
