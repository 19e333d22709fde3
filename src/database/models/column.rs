use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::types::{ColumnId, ProjectId};

/// A board stage. `position` is 1-based and contiguous within a project;
/// a `task_limit` of 0 means unlimited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub position: i32,
    pub project_id: ProjectId,
    pub task_limit: i32,
    pub description: String,
}
