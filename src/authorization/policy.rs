use serde::{Deserialize, Serialize};

use crate::procedure::ColumnAction;

/// Role of a user inside one project. Ordered from least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProjectRole {
    #[serde(rename = "project-viewer")]
    Viewer,
    #[serde(rename = "project-member")]
    Member,
    #[serde(rename = "project-manager")]
    Manager,
}

impl ProjectRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectRole::Viewer => "project-viewer",
            ProjectRole::Member => "project-member",
            ProjectRole::Manager => "project-manager",
        }
    }
}

impl std::str::FromStr for ProjectRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "project-viewer" => Ok(ProjectRole::Viewer),
            "project-member" => Ok(ProjectRole::Member),
            "project-manager" => Ok(ProjectRole::Manager),
            other => Err(format!("unknown project role '{}'", other)),
        }
    }
}

impl std::fmt::Display for ProjectRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum project role needed for an action; None for unknown actions
pub fn required_role(action: &str) -> Option<ProjectRole> {
    let action = action.parse::<ColumnAction>().ok()?;

    Some(match action {
        ColumnAction::GetColumns | ColumnAction::GetColumn => ProjectRole::Viewer,
        ColumnAction::UpdateColumn
        | ColumnAction::AddColumn
        | ColumnAction::RemoveColumn
        | ColumnAction::ChangeColumnPosition => ProjectRole::Manager,
    })
}

pub fn is_allowed(action: &str, role: ProjectRole) -> bool {
    required_role(action).is_some_and(|required| role >= required)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewers_can_only_read() {
        assert!(is_allowed("getColumns", ProjectRole::Viewer));
        assert!(is_allowed("getColumn", ProjectRole::Viewer));
        assert!(!is_allowed("addColumn", ProjectRole::Viewer));
        assert!(!is_allowed("removeColumn", ProjectRole::Viewer));
    }

    #[test]
    fn members_cannot_reshape_the_board() {
        assert!(is_allowed("getColumns", ProjectRole::Member));
        assert!(!is_allowed("updateColumn", ProjectRole::Member));
        assert!(!is_allowed("changeColumnPosition", ProjectRole::Member));
    }

    #[test]
    fn managers_can_do_everything() {
        for action in ColumnAction::ALL {
            assert!(is_allowed(action.as_str(), ProjectRole::Manager), "{}", action.as_str());
        }
    }

    #[test]
    fn unknown_actions_are_never_allowed() {
        assert_eq!(required_role("removeProject"), None);
        assert!(!is_allowed("removeProject", ProjectRole::Manager));
    }

    #[test]
    fn role_names_round_trip() {
        for role in [ProjectRole::Viewer, ProjectRole::Member, ProjectRole::Manager] {
            assert_eq!(role.as_str().parse::<ProjectRole>(), Ok(role));
        }
        assert!("owner".parse::<ProjectRole>().is_err());
    }
}
