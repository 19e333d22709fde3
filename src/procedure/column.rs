use std::sync::Arc;
use tracing::info;

use super::{ColumnAction, ProcedureError};
use crate::auth::Caller;
use crate::authorization::Authorizer;
use crate::database::{Column, ColumnRepository};
use crate::types::{ColumnId, ProjectId};

/// Column management exposed as remote procedures.
///
/// Every method runs the permission check first and only touches the
/// repository once it has passed. Repository results are returned as-is.
pub struct ColumnProcedure {
    project_auth: Arc<dyn Authorizer>,
    column_auth: Arc<dyn Authorizer>,
    columns: Arc<dyn ColumnRepository>,
}

impl ColumnProcedure {
    pub fn new(
        project_auth: Arc<dyn Authorizer>,
        column_auth: Arc<dyn Authorizer>,
        columns: Arc<dyn ColumnRepository>,
    ) -> Self {
        Self {
            project_auth,
            column_auth,
            columns,
        }
    }

    /// All columns of a project sorted by position
    pub async fn get_columns(&self, caller: &Caller, project_id: ProjectId) -> Result<Vec<Column>, ProcedureError> {
        self.project_auth
            .check(caller, ColumnAction::GetColumns.as_str(), project_id)
            .await?;

        Ok(self.columns.get_all(project_id).await?)
    }

    pub async fn get_column(&self, caller: &Caller, column_id: ColumnId) -> Result<Option<Column>, ProcedureError> {
        self.column_auth
            .check(caller, ColumnAction::GetColumn.as_str(), column_id)
            .await?;

        Ok(self.columns.get_by_id(column_id).await?)
    }

    pub async fn update_column(
        &self,
        caller: &Caller,
        column_id: ColumnId,
        title: &str,
        task_limit: i32,
        description: &str,
    ) -> Result<bool, ProcedureError> {
        self.column_auth
            .check(caller, ColumnAction::UpdateColumn.as_str(), column_id)
            .await?;

        let updated = self.columns.update(column_id, title, task_limit, description).await?;
        info!(user = %caller.username, column_id, updated, "updateColumn");
        Ok(updated)
    }

    /// Returns the id of the new column
    pub async fn add_column(
        &self,
        caller: &Caller,
        project_id: ProjectId,
        title: &str,
        task_limit: i32,
        description: &str,
    ) -> Result<ColumnId, ProcedureError> {
        self.project_auth
            .check(caller, ColumnAction::AddColumn.as_str(), project_id)
            .await?;

        let column_id = self.columns.create(project_id, title, task_limit, description).await?;
        info!(user = %caller.username, project_id, column_id, "addColumn");
        Ok(column_id)
    }

    /// Removes the column and every task in it
    pub async fn remove_column(&self, caller: &Caller, column_id: ColumnId) -> Result<bool, ProcedureError> {
        self.column_auth
            .check(caller, ColumnAction::RemoveColumn.as_str(), column_id)
            .await?;

        let removed = self.columns.remove(column_id).await?;
        info!(user = %caller.username, column_id, removed, "removeColumn");
        Ok(removed)
    }

    pub async fn change_column_position(
        &self,
        caller: &Caller,
        project_id: ProjectId,
        column_id: ColumnId,
        position: i32,
    ) -> Result<bool, ProcedureError> {
        self.project_auth
            .check(caller, ColumnAction::ChangeColumnPosition.as_str(), project_id)
            .await?;

        let moved = self.columns.change_position(project_id, column_id, position).await?;
        info!(user = %caller.username, project_id, column_id, position, moved, "changeColumnPosition");
        Ok(moved)
    }
}
