use async_trait::async_trait;
use thiserror::Error;

use crate::authorization::ProjectRole;
use crate::database::models::Column;
use crate::types::{ColumnId, ProjectId, UserId};

/// Errors surfaced by column and membership stores
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Column persistence scoped to a project.
///
/// Implementations keep positions unique and contiguous (1..=n) within each
/// project across create, remove and change_position.
#[async_trait]
pub trait ColumnRepository: Send + Sync {
    /// All columns of a project ordered by position
    async fn get_all(&self, project_id: ProjectId) -> Result<Vec<Column>, RepositoryError>;

    async fn get_by_id(&self, column_id: ColumnId) -> Result<Option<Column>, RepositoryError>;

    /// Owning project of a column, used to authorize column-scoped calls
    async fn project_id(&self, column_id: ColumnId) -> Result<Option<ProjectId>, RepositoryError>;

    /// Returns false when the column does not exist
    async fn update(
        &self,
        column_id: ColumnId,
        title: &str,
        task_limit: i32,
        description: &str,
    ) -> Result<bool, RepositoryError>;

    /// Appends a column after the last one and returns its id
    async fn create(
        &self,
        project_id: ProjectId,
        title: &str,
        task_limit: i32,
        description: &str,
    ) -> Result<ColumnId, RepositoryError>;

    /// Removes the column together with its tasks
    async fn remove(&self, column_id: ColumnId) -> Result<bool, RepositoryError>;

    /// Returns false when the position is out of range or the column is not
    /// part of the project
    async fn change_position(
        &self,
        project_id: ProjectId,
        column_id: ColumnId,
        position: i32,
    ) -> Result<bool, RepositoryError>;

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

/// Lookup of a user's role inside a project
#[async_trait]
pub trait ProjectRoleStore: Send + Sync {
    async fn user_role(&self, project_id: ProjectId, user_id: UserId) -> Result<Option<ProjectRole>, RepositoryError>;
}

/// Assign new positions after moving `column_id` to `position`.
///
/// `others` holds the remaining column ids of the project in their current
/// order. The moved column takes `position`, the others fill the free slots
/// without changing their relative order. Caller guarantees
/// `1 <= position <= others.len() + 1`.
pub(crate) fn reordered_positions(others: &[ColumnId], column_id: ColumnId, position: i32) -> Vec<(ColumnId, i32)> {
    let mut offset = 1;
    let mut positions = Vec::with_capacity(others.len() + 1);

    for &id in others {
        if offset == position {
            offset += 1;
        }
        positions.push((id, offset));
        offset += 1;
    }

    positions.push((column_id, position));
    positions
}

/// Checks a requested position against the number of columns in the project
pub(crate) fn position_in_range(position: i32, column_count: usize) -> bool {
    position >= 1 && (position as usize) <= column_count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut positions: Vec<(ColumnId, i32)>) -> Vec<ColumnId> {
        positions.sort_by_key(|(_, p)| *p);
        positions.into_iter().map(|(id, _)| id).collect()
    }

    #[test]
    fn moves_column_to_front() {
        let positions = reordered_positions(&[10, 20, 30], 40, 1);
        assert_eq!(sorted(positions), vec![40, 10, 20, 30]);
    }

    #[test]
    fn moves_column_to_middle() {
        // Original order 10, 20, 30, 40; 10 moves to position 3
        let positions = reordered_positions(&[20, 30, 40], 10, 3);
        assert_eq!(positions, vec![(20, 1), (30, 2), (40, 4), (10, 3)]);
        assert_eq!(sorted(positions), vec![20, 30, 10, 40]);
    }

    #[test]
    fn moves_column_to_end() {
        let positions = reordered_positions(&[10, 30], 20, 3);
        assert_eq!(sorted(positions), vec![10, 30, 20]);
    }

    #[test]
    fn range_is_one_based_and_inclusive() {
        assert!(!position_in_range(0, 3));
        assert!(position_in_range(1, 3));
        assert!(position_in_range(3, 3));
        assert!(!position_in_range(4, 3));
        assert!(!position_in_range(-1, 3));
        assert!(!position_in_range(1, 0));
    }
}
