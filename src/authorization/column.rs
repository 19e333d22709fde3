use async_trait::async_trait;
use std::sync::Arc;
use tracing::error;

use super::{AccessDenied, Authorizer, ProjectAuthorization};
use crate::auth::Caller;
use crate::database::ColumnRepository;

/// Resolves the column's owning project, then applies the project check
pub struct ColumnAuthorization {
    projects: Arc<ProjectAuthorization>,
    columns: Arc<dyn ColumnRepository>,
}

impl ColumnAuthorization {
    pub fn new(projects: Arc<ProjectAuthorization>, columns: Arc<dyn ColumnRepository>) -> Self {
        Self { projects, columns }
    }
}

#[async_trait]
impl Authorizer for ColumnAuthorization {
    async fn check(&self, caller: &Caller, action: &str, column_id: i64) -> Result<(), AccessDenied> {
        if caller.bypasses_project_roles() {
            return Ok(());
        }

        let project_id = match self.columns.project_id(column_id).await {
            Ok(project_id) => project_id,
            Err(e) => {
                error!("Failed to resolve project of column {}: {}", column_id, e);
                return Err(AccessDenied::new(action, column_id, "unable to resolve column project"));
            }
        };

        self.projects
            .check_project_permission(caller, action, project_id, column_id)
            .await
    }
}
