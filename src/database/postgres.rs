use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, warn};

use crate::authorization::ProjectRole;
use crate::database::manager::DatabaseManager;
use crate::database::models::Column;
use crate::database::repository::{
    position_in_range, reordered_positions, ColumnRepository, ProjectRoleStore, RepositoryError,
};
use crate::types::{ColumnId, ProjectId, UserId};

const COLUMN_FIELDS: &str = "id, title, position, project_id, task_limit, description";

/// Column repository backed by the `columns` table
pub struct PgColumnRepository {
    pool: PgPool,
}

impl PgColumnRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Serialize position changes within a project. Returns false when the
    /// project row does not exist.
    async fn lock_project(tx: &mut Transaction<'_, Postgres>, project_id: ProjectId) -> Result<bool, sqlx::Error> {
        let row: Option<(ProjectId,)> = sqlx::query_as("SELECT id FROM projects WHERE id = $1 FOR UPDATE")
            .bind(project_id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(row.is_some())
    }

    /// Renumber a project's columns to 1..=n keeping their current order
    async fn compact_positions(tx: &mut Transaction<'_, Postgres>, project_id: ProjectId) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE columns c
            SET position = ranked.rn::int
            FROM (
                SELECT id, ROW_NUMBER() OVER (ORDER BY position ASC, id ASC) AS rn
                FROM columns
                WHERE project_id = $1
            ) ranked
            WHERE c.id = ranked.id AND c.position <> ranked.rn
            "#,
        )
        .bind(project_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}

/// Translate constraint violations into repository errors
fn map_constraint_error(err: sqlx::Error, context: &str) -> RepositoryError {
    let code = err
        .as_database_error()
        .and_then(|db_err| db_err.code())
        .map(|code| code.into_owned());

    match code.as_deref() {
        // unique_violation
        Some("23505") => RepositoryError::Conflict(format!("{}: column title already exists in this project", context)),
        // foreign_key_violation
        Some("23503") => RepositoryError::NotFound(format!("{}: project does not exist", context)),
        _ => RepositoryError::Sqlx(err),
    }
}

#[async_trait]
impl ColumnRepository for PgColumnRepository {
    async fn get_all(&self, project_id: ProjectId) -> Result<Vec<Column>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM columns WHERE project_id = $1 ORDER BY position ASC",
            COLUMN_FIELDS
        );
        let columns = sqlx::query_as::<_, Column>(&sql)
            .bind(project_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(columns)
    }

    async fn get_by_id(&self, column_id: ColumnId) -> Result<Option<Column>, RepositoryError> {
        let sql = format!("SELECT {} FROM columns WHERE id = $1", COLUMN_FIELDS);
        let column = sqlx::query_as::<_, Column>(&sql)
            .bind(column_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(column)
    }

    async fn project_id(&self, column_id: ColumnId) -> Result<Option<ProjectId>, RepositoryError> {
        let project_id = sqlx::query_scalar::<_, ProjectId>("SELECT project_id FROM columns WHERE id = $1")
            .bind(column_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(project_id)
    }

    async fn update(
        &self,
        column_id: ColumnId,
        title: &str,
        task_limit: i32,
        description: &str,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE columns SET title = $1, task_limit = $2, description = $3 WHERE id = $4")
            .bind(title)
            .bind(task_limit)
            .bind(description)
            .bind(column_id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_constraint_error(e, "update column"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn create(
        &self,
        project_id: ProjectId,
        title: &str,
        task_limit: i32,
        description: &str,
    ) -> Result<ColumnId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if !Self::lock_project(&mut tx, project_id).await? {
            return Err(RepositoryError::NotFound(format!("project {} does not exist", project_id)));
        }

        let last_position: i32 =
            sqlx::query_scalar("SELECT COALESCE(MAX(position), 0) FROM columns WHERE project_id = $1")
                .bind(project_id)
                .fetch_one(&mut *tx)
                .await?;

        let column_id: ColumnId = sqlx::query_scalar(
            r#"
            INSERT INTO columns (title, position, project_id, task_limit, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(title)
        .bind(last_position + 1)
        .bind(project_id)
        .bind(task_limit)
        .bind(description)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_constraint_error(e, "create column"))?;

        tx.commit().await?;
        debug!("Created column {} in project {}", column_id, project_id);
        Ok(column_id)
    }

    async fn remove(&self, column_id: ColumnId) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let project_id: Option<ProjectId> = sqlx::query_scalar("SELECT project_id FROM columns WHERE id = $1")
            .bind(column_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(project_id) = project_id else {
            return Ok(false);
        };

        Self::lock_project(&mut tx, project_id).await?;

        // Tasks go with the column through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM columns WHERE id = $1")
            .bind(column_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        Self::compact_positions(&mut tx, project_id).await?;
        tx.commit().await?;

        debug!("Removed column {} from project {}", column_id, project_id);
        Ok(true)
    }

    async fn change_position(
        &self,
        project_id: ProjectId,
        column_id: ColumnId,
        position: i32,
    ) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if !Self::lock_project(&mut tx, project_id).await? {
            return Ok(false);
        }

        let ids: Vec<ColumnId> =
            sqlx::query_scalar("SELECT id FROM columns WHERE project_id = $1 ORDER BY position ASC")
                .bind(project_id)
                .fetch_all(&mut *tx)
                .await?;

        if !position_in_range(position, ids.len()) || !ids.contains(&column_id) {
            return Ok(false);
        }

        let others: Vec<ColumnId> = ids.into_iter().filter(|id| *id != column_id).collect();
        for (id, new_position) in reordered_positions(&others, column_id, position) {
            sqlx::query("UPDATE columns SET position = $1 WHERE id = $2")
                .bind(new_position)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        DatabaseManager::health_check(&self.pool).await?;
        Ok(())
    }
}

/// Project membership lookups backed by `project_has_users`
pub struct PgProjectRoleStore {
    pool: PgPool,
}

impl PgProjectRoleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRoleStore for PgProjectRoleStore {
    async fn user_role(&self, project_id: ProjectId, user_id: UserId) -> Result<Option<ProjectRole>, RepositoryError> {
        let role: Option<String> =
            sqlx::query_scalar("SELECT role FROM project_has_users WHERE project_id = $1 AND user_id = $2")
                .bind(project_id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(role.and_then(|name| match name.parse::<ProjectRole>() {
            Ok(role) => Some(role),
            Err(_) => {
                warn!("Ignoring unknown role '{}' for user {} in project {}", name, user_id, project_id);
                None
            }
        }))
    }
}
