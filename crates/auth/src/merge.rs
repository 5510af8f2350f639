//! Rule merger: overlay user-level overrides on role-level rules.

use crate::grants::PrivilegeTuple;
use crate::rule::{rule_key, AbilityRule, RuleSet};

/// Merge role-derived rules with privilege-override tuples.
///
/// The effective set is seeded from the role rules, then each tuple is
/// applied in the order given: `granted == true` inserts the key,
/// `granted == false` removes it (recording an explicit revocation). Both
/// operations are idempotent, so overrides always take precedence over role
/// grants for the exact same (action, subject) pair, and a conflict between
/// tuples for the same key resolves last-writer-wins under the caller's
/// order (the loaders supply `created_at` order).
///
/// Pure computation: no I/O, no suspension points.
pub fn merge_rules(role_rules: RuleSet, overrides: &[PrivilegeTuple]) -> RuleSet {
    let mut effective = role_rules;

    for tuple in overrides {
        if tuple.granted {
            effective.insert(AbilityRule::new(tuple.action, tuple.subject.clone()));
        } else {
            effective.revoke(&rule_key(tuple.action, &tuple.subject));
        }
    }

    effective
}
