//! Ability resolution: the authentication-time entry point.
//!
//! `resolve` runs once per login, before the session is considered
//! established. The two loads are independent and run concurrently, each
//! bounded by the configured timeout; a failed or expired load degrades to an
//! empty result with a warning (fail closed) instead of aborting the login.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use vertex_core::RoleId;

use crate::error::AbilityError;
use crate::identity::Identity;
use crate::loader::{load_privilege_tuples, load_role_rules};
use crate::merge::merge_rules;
use crate::rule::{AbilityRule, RuleSet};
use crate::store::GrantStore;
use crate::{Action, Subject};

/// Baseline rule set for a non-superuser with no role in the tenant:
/// the authentication screens themselves, nothing else.
pub fn baseline_rules() -> RuleSet {
    [AbilityRule::new(Action::Read, "Auth")].into_iter().collect()
}

/// Blanket rule set attached to superuser sessions: `manage` on `all`.
///
/// The capability evaluator short-circuits on the superuser flag anyway;
/// carrying the blanket rule keeps the serialized session payload meaningful
/// for downstream consumers that only see the rule array.
pub fn superuser_rules() -> RuleSet {
    [AbilityRule::new(Action::Manage, Subject::all())]
        .into_iter()
        .collect()
}

#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Upper bound on each individual store call. On expiry the affected
    /// load fails closed; the authentication flow is never held indefinitely.
    pub load_timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            load_timeout: Duration::from_secs(5),
        }
    }
}

/// Resolves the effective rule set for an authenticated identity.
///
/// Holds an explicitly passed store handle, constructed once per process and
/// shared by reference, never an implicit global. Concurrent resolutions
/// for different users are fully independent; each session owns the rule set
/// it receives.
pub struct AbilityResolver<S> {
    store: Arc<S>,
    config: ResolverConfig,
}

impl<S: GrantStore> AbilityResolver<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, ResolverConfig::default())
    }

    pub fn with_config(store: Arc<S>, config: ResolverConfig) -> Self {
        Self { store, config }
    }

    /// Resolve the effective rule set, looking the role assignment up in the
    /// store.
    ///
    /// Hard error only on an invalid identity (nil user or tenant id). Every
    /// storage-side failure degrades: role lookup failure and missing role
    /// both yield the baseline, loader failures yield the affected side as
    /// empty.
    pub async fn resolve(&self, identity: &Identity) -> Result<RuleSet, AbilityError> {
        identity.validate()?;

        if identity.is_super_admin {
            return Ok(superuser_rules());
        }

        let role_lookup = tokio::time::timeout(
            self.config.load_timeout,
            self.store.role_for_user(identity.tenant_id, identity.user_id),
        )
        .await;

        let role_id = match role_lookup {
            Ok(Ok(role_id)) => role_id,
            Ok(Err(err)) => {
                warn!(
                    user_id = %identity.user_id,
                    tenant_id = %identity.tenant_id,
                    error = %err,
                    "role lookup failed, falling back to baseline rules"
                );
                None
            }
            Err(_) => {
                warn!(
                    user_id = %identity.user_id,
                    tenant_id = %identity.tenant_id,
                    "role lookup timed out, falling back to baseline rules"
                );
                None
            }
        };

        self.resolve_with_role(identity, role_id).await
    }

    /// Resolve with a role assignment the caller already holds.
    ///
    /// `None` means the user has no role in the tenant; for a non-superuser
    /// that yields the baseline rule set rather than aborting the login.
    pub async fn resolve_with_role(
        &self,
        identity: &Identity,
        role_id: Option<RoleId>,
    ) -> Result<RuleSet, AbilityError> {
        identity.validate()?;

        if identity.is_super_admin {
            return Ok(superuser_rules());
        }

        let Some(role_id) = role_id else {
            warn!(
                user_id = %identity.user_id,
                tenant_id = %identity.tenant_id,
                error = %AbilityError::RoleNotAssigned,
                "granting baseline rules only"
            );
            return Ok(baseline_rules());
        };

        let timeout = self.config.load_timeout;
        let (role_rules, privilege_tuples) = tokio::join!(
            load_role_rules(&self.store, role_id, timeout),
            load_privilege_tuples(&self.store, identity.tenant_id, identity.user_id, timeout),
        );

        let role_rules = role_rules.unwrap_or_else(|err| {
            warn!(
                user_id = %identity.user_id,
                role_id = %role_id,
                error = %err,
                "role grant load failed, treating role as granting nothing"
            );
            RuleSet::new()
        });

        let privilege_tuples = privilege_tuples.unwrap_or_else(|err| {
            warn!(
                user_id = %identity.user_id,
                tenant_id = %identity.tenant_id,
                error = %err,
                "privilege load failed, role grants stand unmodified"
            );
            Vec::new()
        });

        Ok(merge_rules(role_rules, &privilege_tuples))
    }
}
