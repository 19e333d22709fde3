use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, warn};

use super::{policy, AccessDenied, Authorizer};
use crate::auth::Caller;
use crate::database::ProjectRoleStore;
use crate::types::ProjectId;

/// Checks an action against the caller's role in a project
pub struct ProjectAuthorization {
    roles: Arc<dyn ProjectRoleStore>,
}

impl ProjectAuthorization {
    pub fn new(roles: Arc<dyn ProjectRoleStore>) -> Self {
        Self { roles }
    }

    /// Shared by the column authorizer once it has resolved the owning
    /// project. `target_id` is only used for reporting.
    pub(crate) async fn check_project_permission(
        &self,
        caller: &Caller,
        action: &str,
        project_id: Option<ProjectId>,
        target_id: i64,
    ) -> Result<(), AccessDenied> {
        if caller.bypasses_project_roles() {
            return Ok(());
        }

        let denied = |reason: &str| {
            warn!(
                user = %caller.username,
                user_id = caller.user_id,
                action,
                target_id,
                "Access denied: {}",
                reason
            );
            AccessDenied::new(action, target_id, reason)
        };

        let Some(project_id) = project_id.filter(|id| *id > 0) else {
            return Err(denied("project not found"));
        };

        let Some(required) = policy::required_role(action) else {
            return Err(denied("unknown action"));
        };

        let role = match self.roles.user_role(project_id, caller.user_id).await {
            Ok(role) => role,
            Err(e) => {
                error!("Failed to load role of user {} in project {}: {}", caller.user_id, project_id, e);
                return Err(denied("unable to verify project membership"));
            }
        };

        match role {
            Some(role) if role >= required => Ok(()),
            Some(_) => Err(denied("insufficient project role")),
            None => Err(denied("not a project member")),
        }
    }
}

#[async_trait]
impl Authorizer for ProjectAuthorization {
    async fn check(&self, caller: &Caller, action: &str, project_id: i64) -> Result<(), AccessDenied> {
        self.check_project_permission(caller, action, Some(project_id), project_id)
            .await
    }
}
