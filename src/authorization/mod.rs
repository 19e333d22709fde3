//! Per-call permission checks for the column procedures.
//!
//! Both authorizers implement [`Authorizer`] and are injected into
//! [`crate::procedure::ColumnProcedure`]. A failed check is always reported
//! as [`AccessDenied`], including when the membership store cannot answer.

mod column;
mod policy;
mod project;

use async_trait::async_trait;
use thiserror::Error;

use crate::auth::Caller;

pub use column::ColumnAuthorization;
pub use policy::{is_allowed, required_role, ProjectRole};
pub use project::ProjectAuthorization;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("access denied for '{action}' on {target_id}: {reason}")]
pub struct AccessDenied {
    pub action: String,
    pub target_id: i64,
    pub reason: String,
}

impl AccessDenied {
    pub fn new(action: &str, target_id: i64, reason: impl Into<String>) -> Self {
        Self {
            action: action.to_string(),
            target_id,
            reason: reason.into(),
        }
    }
}

#[async_trait]
pub trait Authorizer: Send + Sync {
    /// Returns normally when `caller` may perform `action` on `target_id`
    async fn check(&self, caller: &Caller, action: &str, target_id: i64) -> Result<(), AccessDenied>;
}
