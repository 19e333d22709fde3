pub mod column;

use thiserror::Error;

use crate::authorization::AccessDenied;
use crate::database::RepositoryError;

pub use column::ColumnProcedure;

/// Failure of a procedure call: either the permission check refused it or
/// the repository reported an error, passed through untouched.
#[derive(Debug, Error)]
pub enum ProcedureError {
    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Remote-callable column operations. The wire method name doubles as the
/// action name handed to the authorizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnAction {
    GetColumns,
    GetColumn,
    UpdateColumn,
    AddColumn,
    RemoveColumn,
    ChangeColumnPosition,
}

impl ColumnAction {
    pub const ALL: [ColumnAction; 6] = [
        ColumnAction::GetColumns,
        ColumnAction::GetColumn,
        ColumnAction::UpdateColumn,
        ColumnAction::AddColumn,
        ColumnAction::RemoveColumn,
        ColumnAction::ChangeColumnPosition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnAction::GetColumns => "getColumns",
            ColumnAction::GetColumn => "getColumn",
            ColumnAction::UpdateColumn => "updateColumn",
            ColumnAction::AddColumn => "addColumn",
            ColumnAction::RemoveColumn => "removeColumn",
            ColumnAction::ChangeColumnPosition => "changeColumnPosition",
        }
    }

    pub fn is_mutation(&self) -> bool {
        !matches!(self, ColumnAction::GetColumns | ColumnAction::GetColumn)
    }
}

impl std::str::FromStr for ColumnAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnAction::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| format!("unknown procedure '{}'", s))
    }
}
