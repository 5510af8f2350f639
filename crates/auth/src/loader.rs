//! Permission and privilege loaders.
//!
//! Both loaders bound their store call with a timeout and surface failures as
//! typed errors; the fail-closed policy (degrading to an empty result) is
//! applied by the caller, not here, so a caller that wants a different policy
//! still sees the distinct error kind.

use std::time::Duration;

use vertex_core::{RoleId, TenantId, UserId};

use crate::error::AbilityError;
use crate::grants::PrivilegeTuple;
use crate::rule::{AbilityRule, RuleSet};
use crate::store::{GrantStore, StoreError};

async fn bounded<T>(
    duration: Duration,
    fut: impl core::future::Future<Output = Result<T, StoreError>>,
) -> Result<T, StoreError> {
    match tokio::time::timeout(duration, fut).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout(duration)),
    }
}

/// Load the deduplicated role-level rule set for a role.
///
/// Dedup key is `action-subject`; the first occurrence wins and later
/// duplicates are dropped. A role with no stored grants yields an empty set.
pub async fn load_role_rules<S: GrantStore>(
    store: &S,
    role_id: RoleId,
    timeout: Duration,
) -> Result<RuleSet, AbilityError> {
    let grants = bounded(timeout, store.grants_for_role(role_id))
        .await
        .map_err(AbilityError::GrantLoadFailed)?;

    let mut rules = RuleSet::new();
    for grant in grants {
        rules.insert(AbilityRule::new(grant.action, grant.subject));
    }
    Ok(rules)
}

/// Load and expand the privilege overrides for a (user, tenant) pair.
///
/// Records are processed in ascending `created_at` order regardless of
/// storage return order, so the merge outcome is deterministic even if two
/// records ever target the same subject. Each record contributes one tuple
/// per non-null flag.
pub async fn load_privilege_tuples<S: GrantStore>(
    store: &S,
    tenant_id: TenantId,
    user_id: UserId,
    timeout: Duration,
) -> Result<Vec<PrivilegeTuple>, AbilityError> {
    let mut records = bounded(timeout, store.privileges_for_user(tenant_id, user_id))
        .await
        .map_err(AbilityError::PrivilegeLoadFailed)?;

    records.sort_by_key(|r| r.created_at);

    Ok(records.iter().flat_map(|r| r.expand()).collect())
}
