use serde::{Deserialize, Serialize};

use vertex_core::{TenantId, UserId};

use crate::error::AbilityError;

/// The authenticated actor the engine resolves abilities for.
///
/// `is_super_admin` is read once at authentication time and is immutable for
/// the lifetime of the session; a superuser bypasses all rule evaluation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub tenant_id: TenantId,
    pub is_super_admin: bool,
}

impl Identity {
    pub fn new(user_id: UserId, tenant_id: TenantId) -> Self {
        Self {
            user_id,
            tenant_id,
            is_super_admin: false,
        }
    }

    pub fn super_admin(user_id: UserId, tenant_id: TenantId) -> Self {
        Self {
            user_id,
            tenant_id,
            is_super_admin: true,
        }
    }

    /// Contract check on the engine boundary.
    ///
    /// A nil user or tenant identifier is a programming error in the caller,
    /// surfaced as a hard [`AbilityError::InvalidIdentity`], never silently
    /// defaulted.
    pub fn validate(&self) -> Result<(), AbilityError> {
        if self.user_id.is_nil() {
            return Err(AbilityError::invalid_identity("user id is nil"));
        }
        if self.tenant_id.is_nil() {
            return Err(AbilityError::invalid_identity("tenant id is nil"));
        }
        Ok(())
    }
}
