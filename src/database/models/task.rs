use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::types::{ColumnId, ProjectId, TaskId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub project_id: ProjectId,
    pub column_id: ColumnId,
}
