//! Default role-to-grant mapping.
//!
//! This mirrors the seed data shipped with the application; production
//! tenants manage grants through the admin surface and the engine only ever
//! sees what the store returns. Used to populate dev/test stores, never
//! consulted implicitly during resolution.

use vertex_auth::{Action, PermissionGrant, Role, Subject};
use vertex_core::RoleId;

use crate::grant_store::InMemoryGrantStore;

/// Grants for a built-in role code.
///
/// Unknown codes fall back to the authentication baseline only.
pub fn default_role_grants(code: &str) -> Vec<(Action, Subject)> {
    match code {
        "ADMIN" => vec![(Action::Manage, Subject::all())],
        // "GERENTE" is the legacy seed name for the manager role.
        "MANAGER" | "GERENTE" => vec![
            (Action::Read, Subject::all()),
            (Action::Create, Subject::all()),
            (Action::Update, Subject::all()),
        ],
        "VENDEDOR" => vec![
            (Action::Read, Subject::all()),
            (Action::Create, Subject::new("Sales")),
            (Action::Update, Subject::new("Sales")),
        ],
        "USER" => vec![(Action::Read, Subject::all())],
        _ => vec![(Action::Read, Subject::new("Auth"))],
    }
}

/// Display name for a built-in role code.
pub fn default_role_name(code: &str) -> &str {
    match code {
        "ADMIN" => "Administrator",
        "MANAGER" | "GERENTE" => "Manager",
        "VENDEDOR" => "Sales Representative",
        "USER" => "Standard User",
        other => other,
    }
}

/// Seed a global role with its default grants into an in-memory store.
pub fn seed_role(store: &InMemoryGrantStore, code: &str) -> Role {
    let role = Role::new(RoleId::new(), code, default_role_name(code));
    for (action, subject) in default_role_grants(code) {
        store.add_grant(PermissionGrant::new(role.id, action, subject));
    }
    role
}
