//! In-memory grant store.
//!
//! Intended for tests/dev. Not optimized for performance.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use vertex_auth::{GrantStore, PermissionGrant, PrivilegeRecord, StoreError};
use vertex_core::{RoleId, TenantId, UserId};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
struct MembershipKey {
    tenant_id: TenantId,
    user_id: UserId,
}

/// In-memory implementation of the three grant collections.
///
/// Write helpers enforce the invariants the relational schema is expected to
/// carry: one role assignment per (tenant, user), and one privilege record
/// per (tenant, user, subject). Upserts replace, so the merger never sees
/// two records for the same subject.
#[derive(Debug, Default)]
pub struct InMemoryGrantStore {
    assignments: RwLock<HashMap<MembershipKey, RoleId>>,
    grants: RwLock<HashMap<RoleId, Vec<PermissionGrant>>>,
    privileges: RwLock<HashMap<MembershipKey, Vec<PrivilegeRecord>>>,
}

impl InMemoryGrantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `role_id` to the user within the tenant, replacing any
    /// previous assignment (no role stacking).
    pub fn assign_role(&self, tenant_id: TenantId, user_id: UserId, role_id: RoleId) {
        if let Ok(mut map) = self.assignments.write() {
            map.insert(MembershipKey { tenant_id, user_id }, role_id);
        }
    }

    /// Append a role-level grant row. Duplicates are kept as stored; the
    /// loader is responsible for collapsing them.
    pub fn add_grant(&self, grant: PermissionGrant) {
        if let Ok(mut map) = self.grants.write() {
            map.entry(grant.role_id).or_default().push(grant);
        }
    }

    /// Insert or replace the privilege record for the record's
    /// (tenant, user, subject).
    pub fn upsert_privilege(&self, record: PrivilegeRecord) {
        let key = MembershipKey {
            tenant_id: record.tenant_id,
            user_id: record.user_id,
        };
        if let Ok(mut map) = self.privileges.write() {
            let records = map.entry(key).or_default();
            records.retain(|r| r.subject != record.subject);
            records.push(record);
        }
    }
}

#[async_trait]
impl GrantStore for InMemoryGrantStore {
    async fn role_for_user(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
    ) -> Result<Option<RoleId>, StoreError> {
        let map = self
            .assignments
            .read()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        Ok(map.get(&MembershipKey { tenant_id, user_id }).copied())
    }

    async fn grants_for_role(&self, role_id: RoleId) -> Result<Vec<PermissionGrant>, StoreError> {
        let map = self
            .grants
            .read()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        Ok(map.get(&role_id).cloned().unwrap_or_default())
    }

    async fn privileges_for_user(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
    ) -> Result<Vec<PrivilegeRecord>, StoreError> {
        let map = self
            .privileges
            .read()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        let mut records = map
            .get(&MembershipKey { tenant_id, user_id })
            .cloned()
            .unwrap_or_default();
        records.sort_by_key(|r| r.created_at);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use vertex_auth::Action;

    #[tokio::test]
    async fn role_assignment_is_replaced_not_stacked() {
        let store = InMemoryGrantStore::new();
        let tenant_id = TenantId::new();
        let user_id = UserId::new();
        let first = RoleId::new();
        let second = RoleId::new();

        store.assign_role(tenant_id, user_id, first);
        store.assign_role(tenant_id, user_id, second);

        let role = store.role_for_user(tenant_id, user_id).await.unwrap();
        assert_eq!(role, Some(second));
    }

    #[tokio::test]
    async fn unknown_user_has_no_role() {
        let store = InMemoryGrantStore::new();
        let role = store.role_for_user(TenantId::new(), UserId::new()).await.unwrap();
        assert_eq!(role, None);
    }

    #[tokio::test]
    async fn privilege_upsert_replaces_same_subject_record() {
        let store = InMemoryGrantStore::new();
        let tenant_id = TenantId::new();
        let user_id = UserId::new();

        let mut first = PrivilegeRecord::unset(user_id, tenant_id, "Sales", Utc::now());
        first.can_delete = Some(true);
        store.upsert_privilege(first);

        let mut second = PrivilegeRecord::unset(user_id, tenant_id, "Sales", Utc::now());
        second.can_delete = Some(false);
        store.upsert_privilege(second);

        let records = store.privileges_for_user(tenant_id, user_id).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].can_delete, Some(false));
    }

    #[tokio::test]
    async fn privileges_come_back_in_created_at_order() {
        let store = InMemoryGrantStore::new();
        let tenant_id = TenantId::new();
        let user_id = UserId::new();
        let now = Utc::now();

        let newer = PrivilegeRecord::unset(user_id, tenant_id, "Invoices", now);
        let older = PrivilegeRecord::unset(
            user_id,
            tenant_id,
            "Sales",
            now - chrono::Duration::minutes(5),
        );
        store.upsert_privilege(newer);
        store.upsert_privilege(older);

        let records = store.privileges_for_user(tenant_id, user_id).await.unwrap();
        assert_eq!(records[0].subject.as_str(), "Sales");
        assert_eq!(records[1].subject.as_str(), "Invoices");
    }

    #[tokio::test]
    async fn grants_are_tenant_agnostic_and_role_scoped() {
        let store = InMemoryGrantStore::new();
        let role_id = RoleId::new();
        store.add_grant(PermissionGrant::new(role_id, Action::Read, "all"));

        let rows = store.grants_for_role(role_id).await.unwrap();
        assert_eq!(rows.len(), 1);

        let other = store.grants_for_role(RoleId::new()).await.unwrap();
        assert!(other.is_empty());
    }
}
