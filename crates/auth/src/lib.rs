//! `vertex-auth` — ability-resolution engine (authorization boundary).
//!
//! Turns stored grants into the effective rule set that gates every
//! protected operation: role-level grants overlaid with per-user, per-form
//! privilege overrides, evaluated against a fixed action vocabulary with a
//! superuser short-circuit and an `all`-subject wildcard.
//!
//! This crate is intentionally decoupled from HTTP and storage; it reaches
//! the grant collections only through the [`GrantStore`] port.

pub mod action;
pub mod error;
pub mod evaluate;
pub mod grants;
pub mod identity;
pub mod loader;
pub mod merge;
pub mod resolve;
pub mod role;
pub mod rule;
pub mod session;
pub mod store;
pub mod subject;

pub use action::Action;
pub use error::AbilityError;
pub use evaluate::{can, can_with_policy, ManageAllPrecedence};
pub use grants::{PermissionGrant, PrivilegeRecord, PrivilegeTuple};
pub use identity::Identity;
pub use loader::{load_privilege_tuples, load_role_rules};
pub use merge::merge_rules;
pub use resolve::{baseline_rules, superuser_rules, AbilityResolver, ResolverConfig};
pub use role::Role;
pub use rule::{rule_key, AbilityRule, RuleSet};
pub use session::AuthenticatedSession;
pub use store::{GrantStore, StoreError};
pub use subject::Subject;
