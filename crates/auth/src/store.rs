//! Read-only port over the grant store.
//!
//! The engine never talks to a concrete database: it is handed a store
//! implementation by reference, constructed once per process (no implicit
//! globals). Adapters live in `vertex-infra`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use vertex_core::{RoleId, TenantId, UserId};

use crate::grants::{PermissionGrant, PrivilegeRecord};

/// Failure at the storage boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("query failed: {0}")]
    Query(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("query timed out after {0:?}")]
    Timeout(Duration),
}

impl StoreError {
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

/// Read-only accessor over the three grant collections.
///
/// Contracts (all reads, no side effects):
/// - `role_for_user`: the single active role assignment for a user within a
///   tenant, or `None` when the user holds no role there.
/// - `grants_for_role`: raw (role, action, subject) rows; an existing role
///   with no stored grants returns an empty vec, not an error.
/// - `privileges_for_user`: raw override rows for the (user, tenant) pair in
///   ascending `created_at` order; zero rows is an empty vec, not an error.
#[async_trait]
pub trait GrantStore: Send + Sync {
    async fn role_for_user(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
    ) -> Result<Option<RoleId>, StoreError>;

    async fn grants_for_role(&self, role_id: RoleId) -> Result<Vec<PermissionGrant>, StoreError>;

    async fn privileges_for_user(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
    ) -> Result<Vec<PrivilegeRecord>, StoreError>;
}

#[async_trait]
impl<S> GrantStore for Arc<S>
where
    S: GrantStore + ?Sized,
{
    async fn role_for_user(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
    ) -> Result<Option<RoleId>, StoreError> {
        (**self).role_for_user(tenant_id, user_id).await
    }

    async fn grants_for_role(&self, role_id: RoleId) -> Result<Vec<PermissionGrant>, StoreError> {
        (**self).grants_for_role(role_id).await
    }

    async fn privileges_for_user(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
    ) -> Result<Vec<PrivilegeRecord>, StoreError> {
        (**self).privileges_for_user(tenant_id, user_id).await
    }
}
