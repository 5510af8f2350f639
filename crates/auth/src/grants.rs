//! Stored grant and override row models.
//!
//! These are the shapes the grant store hands back. Privilege rows are
//! expanded into explicit tuples at the loader boundary; the raw row shape
//! never reaches the merger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vertex_core::{RoleId, TenantId, UserId};

use crate::{Action, Subject};

/// A role-level permission grant row: (role, action, subject).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGrant {
    pub role_id: RoleId,
    pub action: Action,
    pub subject: Subject,
}

impl PermissionGrant {
    pub fn new(role_id: RoleId, action: Action, subject: impl Into<Subject>) -> Self {
        Self {
            role_id,
            action,
            subject: subject.into(),
        }
    }
}

/// A user-level privilege override row, scoped to exactly one subject.
///
/// Each of the eight flags is tri-state: `Some(true)` is an explicit grant,
/// `Some(false)` an explicit revocation, `None` means "no opinion" (defer to
/// the role). There is no flag for `manage`; the blanket verb is only ever
/// role-derived.
///
/// `created_at` is the deterministic order the merger processes records in,
/// so the effective set does not depend on storage return order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivilegeRecord {
    pub user_id: UserId,
    pub tenant_id: TenantId,
    pub subject: Subject,
    pub can_read: Option<bool>,
    pub can_create: Option<bool>,
    pub can_update: Option<bool>,
    pub can_delete: Option<bool>,
    pub can_approve: Option<bool>,
    pub can_post: Option<bool>,
    pub can_export: Option<bool>,
    pub can_import: Option<bool>,
    pub created_at: DateTime<Utc>,
}

impl PrivilegeRecord {
    /// A record with every flag unset ("no opinion" on all actions).
    pub fn unset(
        user_id: UserId,
        tenant_id: TenantId,
        subject: impl Into<Subject>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            tenant_id,
            subject: subject.into(),
            can_read: None,
            can_create: None,
            can_update: None,
            can_delete: None,
            can_approve: None,
            can_post: None,
            can_export: None,
            can_import: None,
            created_at,
        }
    }

    /// The flag column for an action, or `None` for `manage`.
    pub fn flag(&self, action: Action) -> Option<bool> {
        match action {
            Action::Read => self.can_read,
            Action::Create => self.can_create,
            Action::Update => self.can_update,
            Action::Delete => self.can_delete,
            Action::Approve => self.can_approve,
            Action::Post => self.can_post,
            Action::Export => self.can_export,
            Action::Import => self.can_import,
            Action::Manage => None,
        }
    }

    pub fn set_flag(&mut self, action: Action, value: Option<bool>) {
        match action {
            Action::Read => self.can_read = value,
            Action::Create => self.can_create = value,
            Action::Update => self.can_update = value,
            Action::Delete => self.can_delete = value,
            Action::Approve => self.can_approve = value,
            Action::Post => self.can_post = value,
            Action::Export => self.can_export = value,
            Action::Import => self.can_import = value,
            Action::Manage => {}
        }
    }

    /// Expand the row into explicit tuples, one per non-null flag.
    ///
    /// A record contributes zero to eight tuples. Flag order follows
    /// [`Action::OVERRIDABLE`].
    pub fn expand(&self) -> Vec<PrivilegeTuple> {
        Action::OVERRIDABLE
            .into_iter()
            .filter_map(|action| {
                self.flag(action).map(|granted| PrivilegeTuple {
                    action,
                    subject: self.subject.clone(),
                    granted,
                })
            })
            .collect()
    }
}

/// One expanded override decision: grant or revoke an (action, subject).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivilegeTuple {
    pub action: Action,
    pub subject: Subject,
    pub granted: bool,
}

impl PrivilegeTuple {
    pub fn grant(action: Action, subject: impl Into<Subject>) -> Self {
        Self {
            action,
            subject: subject.into(),
            granted: true,
        }
    }

    pub fn revoke(action: Action, subject: impl Into<Subject>) -> Self {
        Self {
            action,
            subject: subject.into(),
            granted: false,
        }
    }
}
