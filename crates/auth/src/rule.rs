//! Ability rules and the effective rule set.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{Action, Subject};

/// A single (action, subject) authorization rule.
///
/// This is also the wire shape attached to the session after login: the rule
/// set serializes to a JSON array of `{ "action": ..., "subject": ... }`
/// objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbilityRule {
    pub action: Action,
    pub subject: Subject,
}

impl AbilityRule {
    pub fn new(action: Action, subject: impl Into<Subject>) -> Self {
        Self {
            action,
            subject: subject.into(),
        }
    }

    /// Composite key the rule set is unique on.
    pub fn key(&self) -> String {
        rule_key(self.action, &self.subject)
    }
}

/// Composite `action-subject` key for rule lookups.
pub fn rule_key(action: Action, subject: &Subject) -> String {
    format!("{}-{}", action.as_str(), subject.as_str())
}

/// The effective rule set for one authenticated session.
///
/// Uniqueness is enforced on the composite `action-subject` key. The set is
/// rebuilt in full on each authentication and never persisted.
///
/// Besides rule presence, the set remembers which keys were *explicitly
/// revoked* by a user-level override during the merge. Presence alone decides
/// the default evaluation; the revocation memory exists so an evaluator
/// policy can let a per-subject revocation beat a blanket `manage-all` grant
/// (see [`crate::ManageAllPrecedence`]). Revocations are session-local and
/// not part of the serialized wire shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<AbilityRule>", into = "Vec<AbilityRule>")]
pub struct RuleSet {
    rules: HashMap<String, AbilityRule>,
    revoked: HashSet<String>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rule, keyed on `action-subject`.
    ///
    /// Idempotent: the first occurrence wins and later duplicates are
    /// silently dropped. An insert clears any earlier explicit revocation of
    /// the same key (last writer wins across override tuples).
    pub fn insert(&mut self, rule: AbilityRule) {
        let key = rule.key();
        self.revoked.remove(&key);
        self.rules.entry(key).or_insert(rule);
    }

    /// Remove a rule by key and remember the key as explicitly revoked.
    ///
    /// Idempotent no-op on the rule map if the key is absent; the revocation
    /// is recorded either way.
    pub fn revoke(&mut self, key: &str) {
        self.rules.remove(key);
        self.revoked.insert(key.to_string());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.rules.contains_key(key)
    }

    pub fn contains(&self, action: Action, subject: &Subject) -> bool {
        self.contains_key(&rule_key(action, subject))
    }

    /// Whether an override explicitly revoked this key during the merge.
    pub fn is_revoked(&self, key: &str) -> bool {
        self.revoked.contains(key)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AbilityRule> {
        self.rules.values()
    }

    /// Rules in deterministic (key-sorted) order, e.g. for token attachment.
    pub fn to_sorted_rules(&self) -> Vec<AbilityRule> {
        let mut entries: Vec<(&String, &AbilityRule)> = self.rules.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter().map(|(_, rule)| rule.clone()).collect()
    }
}

impl From<Vec<AbilityRule>> for RuleSet {
    fn from(rules: Vec<AbilityRule>) -> Self {
        let mut set = RuleSet::new();
        for rule in rules {
            set.insert(rule);
        }
        set
    }
}

impl From<RuleSet> for Vec<AbilityRule> {
    fn from(set: RuleSet) -> Self {
        set.to_sorted_rules()
    }
}

impl FromIterator<AbilityRule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = AbilityRule>>(iter: I) -> Self {
        let mut set = RuleSet::new();
        for rule in iter {
            set.insert(rule);
        }
        set
    }
}
