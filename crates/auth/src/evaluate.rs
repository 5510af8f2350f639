//! Capability evaluator: permit/deny decisions over an effective rule set.
//!
//! Pure lookups, no I/O; callable on every protected operation without
//! touching storage.

use crate::rule::{rule_key, RuleSet};
use crate::{Action, Subject};

/// Where the blanket `manage-all` grant sits relative to per-subject
/// revocations.
///
/// Whether a per-form `granted = false` override can revoke access under a
/// blanket grant is a policy decision, so the short-circuit order is explicit
/// rather than baked in:
///
/// - [`ShortCircuit`](ManageAllPrecedence::ShortCircuit) (default) checks
///   `manage-all` before any per-subject lookup. A blanket grant is not
///   revocable per form; this is the documented precedence of the shipped
///   system.
/// - [`RespectSubjectRevocations`](ManageAllPrecedence::RespectSubjectRevocations)
///   consults the merge's explicit revocations first, so an override row with
///   `granted = false` on a subject beats `manage-all` for that subject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ManageAllPrecedence {
    #[default]
    ShortCircuit,
    RespectSubjectRevocations,
}

/// Decide whether `action` on `subject` is permitted, under the default
/// `manage-all` precedence.
///
/// Decision order:
/// 1. superuser flag → permit (the rule set is not consulted at all);
/// 2. `manage-all` present → permit;
/// 3. literal `action-subject` present → permit;
/// 4. `action-all` present → permit (wildcard-subject grant);
/// 5. deny.
pub fn can(rules: &RuleSet, action: Action, subject: &Subject, is_super_admin: bool) -> bool {
    can_with_policy(
        rules,
        action,
        subject,
        is_super_admin,
        ManageAllPrecedence::default(),
    )
}

/// [`can`] with an explicit `manage-all` precedence policy.
pub fn can_with_policy(
    rules: &RuleSet,
    action: Action,
    subject: &Subject,
    is_super_admin: bool,
    precedence: ManageAllPrecedence,
) -> bool {
    if is_super_admin {
        return true;
    }

    let literal = rule_key(action, subject);

    if precedence == ManageAllPrecedence::RespectSubjectRevocations && rules.is_revoked(&literal) {
        return false;
    }

    if rules.contains(Action::Manage, &Subject::all()) {
        return true;
    }

    if rules.contains_key(&literal) {
        return true;
    }

    // A grant on subject `all` for this action covers every subject.
    rules.contains(action, &Subject::all())
}
