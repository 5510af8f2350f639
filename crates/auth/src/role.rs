use serde::{Deserialize, Serialize};

use vertex_core::{RoleId, TenantId};

/// A named permission bundle assignable to users within a tenant.
///
/// `code` is the symbolic identifier grants are keyed by in seed data and
/// admin tooling (e.g. "ADMIN", "GERENTE"); `display_name` is presentational.
/// A role with no `tenant_id` is global (system-level).
///
/// A user holds at most one role per tenant; assignments are replaced by
/// administrative action, never stacked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub code: String,
    pub display_name: String,
    pub tenant_id: Option<TenantId>,
}

impl Role {
    pub fn new(id: RoleId, code: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            display_name: display_name.into(),
            tenant_id: None,
        }
    }

    pub fn scoped_to(mut self, tenant_id: TenantId) -> Self {
        self.tenant_id = Some(tenant_id);
        self
    }

    pub fn is_global(&self) -> bool {
        self.tenant_id.is_none()
    }
}
