/// Shared identifier types used across the codebase

/// Projects own columns; ids are assigned by the store.
pub type ProjectId = i64;

/// Column ids are unique across all projects.
pub type ColumnId = i64;

pub type TaskId = i64;

pub type UserId = i64;
