//! Postgres-backed grant store.
//!
//! Query contracts mirror the in-memory adapter: role assignments are unique
//! per (tenant, user), privilege rows come back in `created_at` order, and
//! every query filters on the tenant where the table carries one, so
//! cross-tenant reads are structurally impossible.
//!
//! Expected schema: `role_assignments(tenant_id, user_id, role_id)`,
//! `role_permissions(role_id, action, subject)`,
//! `user_privileges(tenant_id, user_id, subject, can_read .. can_import,
//! created_at)` with a unique index on `(tenant_id, user_id, subject)`.

use chrono::{DateTime, Utc};
use tracing::instrument;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Row};

use vertex_auth::{Action, GrantStore, PermissionGrant, PrivilegeRecord, StoreError, Subject};
use vertex_core::{RoleId, TenantId, UserId};

/// Grant store over a SQLx connection pool.
///
/// The pool is constructed once per process and shared; cloning the store
/// clones the pool handle, not the connections.
#[derive(Debug, Clone)]
pub struct PostgresGrantStore {
    pool: PgPool,
}

impl PostgresGrantStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut => {
            StoreError::unavailable(format!("{operation}: connection pool timed out"))
        }
        sqlx::Error::Io(e) => StoreError::unavailable(format!("{operation}: {e}")),
        other => StoreError::query(format!("{operation}: {other}")),
    }
}

struct PrivilegeRow {
    user_id: uuid::Uuid,
    tenant_id: uuid::Uuid,
    subject: String,
    can_read: Option<bool>,
    can_create: Option<bool>,
    can_update: Option<bool>,
    can_delete: Option<bool>,
    can_approve: Option<bool>,
    can_post: Option<bool>,
    can_export: Option<bool>,
    can_import: Option<bool>,
    created_at: DateTime<Utc>,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for PrivilegeRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(PrivilegeRow {
            user_id: row.try_get("user_id")?,
            tenant_id: row.try_get("tenant_id")?,
            subject: row.try_get("subject")?,
            can_read: row.try_get("can_read")?,
            can_create: row.try_get("can_create")?,
            can_update: row.try_get("can_update")?,
            can_delete: row.try_get("can_delete")?,
            can_approve: row.try_get("can_approve")?,
            can_post: row.try_get("can_post")?,
            can_export: row.try_get("can_export")?,
            can_import: row.try_get("can_import")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl From<PrivilegeRow> for PrivilegeRecord {
    fn from(row: PrivilegeRow) -> Self {
        PrivilegeRecord {
            user_id: UserId::from_uuid(row.user_id),
            tenant_id: TenantId::from_uuid(row.tenant_id),
            subject: Subject::new(row.subject),
            can_read: row.can_read,
            can_create: row.can_create,
            can_update: row.can_update,
            can_delete: row.can_delete,
            can_approve: row.can_approve,
            can_post: row.can_post,
            can_export: row.can_export,
            can_import: row.can_import,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl GrantStore for PostgresGrantStore {
    #[instrument(skip(self), fields(tenant_id = %tenant_id, user_id = %user_id))]
    async fn role_for_user(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
    ) -> Result<Option<RoleId>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT role_id
            FROM role_assignments
            WHERE tenant_id = $1 AND user_id = $2
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("role_for_user", e))?;

        row.map(|row| {
            let role_id: uuid::Uuid = row
                .try_get("role_id")
                .map_err(|e| StoreError::query(format!("role_for_user: {e}")))?;
            Ok(RoleId::from_uuid(role_id))
        })
        .transpose()
    }

    #[instrument(skip(self), fields(role_id = %role_id))]
    async fn grants_for_role(&self, role_id: RoleId) -> Result<Vec<PermissionGrant>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT action, subject
            FROM role_permissions
            WHERE role_id = $1
            "#,
        )
        .bind(role_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("grants_for_role", e))?;

        let mut grants = Vec::with_capacity(rows.len());
        for row in rows {
            let action: String = row
                .try_get("action")
                .map_err(|e| StoreError::query(format!("grants_for_role: {e}")))?;
            let subject: String = row
                .try_get("subject")
                .map_err(|e| StoreError::query(format!("grants_for_role: {e}")))?;
            let action: Action = action
                .parse()
                .map_err(|e| StoreError::query(format!("grants_for_role: {e}")))?;
            grants.push(PermissionGrant::new(role_id, action, subject));
        }
        Ok(grants)
    }

    #[instrument(skip(self), fields(tenant_id = %tenant_id, user_id = %user_id))]
    async fn privileges_for_user(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
    ) -> Result<Vec<PrivilegeRecord>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT
                user_id,
                tenant_id,
                subject,
                can_read,
                can_create,
                can_update,
                can_delete,
                can_approve,
                can_post,
                can_export,
                can_import,
                created_at
            FROM user_privileges
            WHERE tenant_id = $1 AND user_id = $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("privileges_for_user", e))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let parsed = PrivilegeRow::from_row(&row)
                .map_err(|e| StoreError::query(format!("privileges_for_user: bad row: {e}")))?;
            records.push(parsed.into());
        }
        Ok(records)
    }
}
