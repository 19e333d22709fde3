use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::authorization::ProjectRole;
use crate::database::models::{Column, Task};
use crate::database::repository::{
    position_in_range, reordered_positions, ColumnRepository, ProjectRoleStore, RepositoryError,
};
use crate::types::{ColumnId, ProjectId, TaskId, UserId};

/// Columns created for a project seeded by [`MemoryStore::with_default_project`]
pub const DEFAULT_BOARD_COLUMNS: &[&str] = &["Backlog", "Ready", "Work in progress", "Done"];

#[derive(Debug, Default)]
struct MemoryState {
    projects: BTreeMap<ProjectId, String>,
    columns: BTreeMap<ColumnId, Column>,
    tasks: BTreeMap<TaskId, Task>,
    roles: HashMap<(ProjectId, UserId), ProjectRole>,
    next_project_id: ProjectId,
    next_column_id: ColumnId,
    next_task_id: TaskId,
}

impl MemoryState {
    fn project_columns(&self, project_id: ProjectId) -> Vec<&Column> {
        let mut columns: Vec<&Column> = self
            .columns
            .values()
            .filter(|c| c.project_id == project_id)
            .collect();
        columns.sort_by_key(|c| (c.position, c.id));
        columns
    }

    fn compact_positions(&mut self, project_id: ProjectId) {
        let ids: Vec<ColumnId> = self.project_columns(project_id).iter().map(|c| c.id).collect();
        for (index, id) in ids.into_iter().enumerate() {
            if let Some(column) = self.columns.get_mut(&id) {
                column.position = index as i32 + 1;
            }
        }
    }

    fn title_taken(&self, project_id: ProjectId, title: &str, except: Option<ColumnId>) -> bool {
        self.columns
            .values()
            .any(|c| c.project_id == project_id && c.title == title && Some(c.id) != except)
    }
}

/// Process-local store implementing both the column repository and the
/// membership lookup. Used when no database is configured and by tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding one project with the standard board columns
    pub async fn with_default_project() -> Result<(Self, ProjectId), RepositoryError> {
        let store = Self::new();
        let project_id = store.add_project("Default project").await;
        for title in DEFAULT_BOARD_COLUMNS {
            store.create(project_id, title, 0, "").await?;
        }
        Ok((store, project_id))
    }

    pub async fn add_project(&self, name: impl Into<String>) -> ProjectId {
        let mut state = self.state.write().await;
        state.next_project_id += 1;
        let id = state.next_project_id;
        state.projects.insert(id, name.into());
        id
    }

    pub async fn set_role(&self, project_id: ProjectId, user_id: UserId, role: ProjectRole) {
        self.state.write().await.roles.insert((project_id, user_id), role);
    }

    /// Returns None when the column does not exist
    pub async fn add_task(&self, column_id: ColumnId, title: impl Into<String>) -> Option<TaskId> {
        let mut state = self.state.write().await;
        let project_id = state.columns.get(&column_id)?.project_id;
        state.next_task_id += 1;
        let id = state.next_task_id;
        state.tasks.insert(
            id,
            Task {
                id,
                title: title.into(),
                project_id,
                column_id,
            },
        );
        Some(id)
    }

    pub async fn tasks_in_column(&self, column_id: ColumnId) -> Vec<Task> {
        self.state
            .read()
            .await
            .tasks
            .values()
            .filter(|t| t.column_id == column_id)
            .cloned()
            .collect()
    }

    pub async fn task_count(&self) -> usize {
        self.state.read().await.tasks.len()
    }
}

#[async_trait]
impl ColumnRepository for MemoryStore {
    async fn get_all(&self, project_id: ProjectId) -> Result<Vec<Column>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.project_columns(project_id).into_iter().cloned().collect())
    }

    async fn get_by_id(&self, column_id: ColumnId) -> Result<Option<Column>, RepositoryError> {
        Ok(self.state.read().await.columns.get(&column_id).cloned())
    }

    async fn project_id(&self, column_id: ColumnId) -> Result<Option<ProjectId>, RepositoryError> {
        Ok(self.state.read().await.columns.get(&column_id).map(|c| c.project_id))
    }

    async fn update(
        &self,
        column_id: ColumnId,
        title: &str,
        task_limit: i32,
        description: &str,
    ) -> Result<bool, RepositoryError> {
        let mut state = self.state.write().await;

        let Some(project_id) = state.columns.get(&column_id).map(|c| c.project_id) else {
            return Ok(false);
        };
        if state.title_taken(project_id, title, Some(column_id)) {
            return Err(RepositoryError::Conflict(format!(
                "update column: column title '{}' already exists in this project",
                title
            )));
        }

        if let Some(column) = state.columns.get_mut(&column_id) {
            column.title = title.to_string();
            column.task_limit = task_limit;
            column.description = description.to_string();
        }
        Ok(true)
    }

    async fn create(
        &self,
        project_id: ProjectId,
        title: &str,
        task_limit: i32,
        description: &str,
    ) -> Result<ColumnId, RepositoryError> {
        let mut state = self.state.write().await;

        if !state.projects.contains_key(&project_id) {
            return Err(RepositoryError::NotFound(format!("project {} does not exist", project_id)));
        }
        if state.title_taken(project_id, title, None) {
            return Err(RepositoryError::Conflict(format!(
                "create column: column title '{}' already exists in this project",
                title
            )));
        }

        let position = state
            .project_columns(project_id)
            .last()
            .map(|c| c.position)
            .unwrap_or(0)
            + 1;

        state.next_column_id += 1;
        let id = state.next_column_id;
        state.columns.insert(
            id,
            Column {
                id,
                title: title.to_string(),
                position,
                project_id,
                task_limit,
                description: description.to_string(),
            },
        );
        Ok(id)
    }

    async fn remove(&self, column_id: ColumnId) -> Result<bool, RepositoryError> {
        let mut state = self.state.write().await;

        let Some(column) = state.columns.remove(&column_id) else {
            return Ok(false);
        };
        state.tasks.retain(|_, task| task.column_id != column_id);
        state.compact_positions(column.project_id);
        Ok(true)
    }

    async fn change_position(
        &self,
        project_id: ProjectId,
        column_id: ColumnId,
        position: i32,
    ) -> Result<bool, RepositoryError> {
        let mut state = self.state.write().await;

        let ids: Vec<ColumnId> = state.project_columns(project_id).iter().map(|c| c.id).collect();
        if !position_in_range(position, ids.len()) || !ids.contains(&column_id) {
            return Ok(false);
        }

        let others: Vec<ColumnId> = ids.into_iter().filter(|id| *id != column_id).collect();
        for (id, new_position) in reordered_positions(&others, column_id, position) {
            if let Some(column) = state.columns.get_mut(&id) {
                column.position = new_position;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl ProjectRoleStore for MemoryStore {
    async fn user_role(&self, project_id: ProjectId, user_id: UserId) -> Result<Option<ProjectRole>, RepositoryError> {
        Ok(self.state.read().await.roles.get(&(project_id, user_id)).copied())
    }
}
