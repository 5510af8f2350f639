use thiserror::Error;

use crate::store::StoreError;

/// Ability-resolution error taxonomy.
///
/// Loader failures (`GrantLoadFailed`, `PrivilegeLoadFailed`) are degradable:
/// the resolver catches them at the loader boundary and fails closed to an
/// empty result with a logged warning. `RoleNotAssigned` degrades to the
/// baseline rule set. `InvalidIdentity` is a contract violation and is always
/// surfaced to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AbilityError {
    #[error("failed to load role grants: {0}")]
    GrantLoadFailed(#[source] StoreError),

    #[error("failed to load user privileges: {0}")]
    PrivilegeLoadFailed(#[source] StoreError),

    #[error("user has no role assigned in tenant")]
    RoleNotAssigned,

    #[error("invalid identity: {0}")]
    InvalidIdentity(String),
}

impl AbilityError {
    pub fn invalid_identity(msg: impl Into<String>) -> Self {
        Self::InvalidIdentity(msg.into())
    }
}
