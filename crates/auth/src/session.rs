//! Authenticated session carrying the resolved rule set.

use serde::{Deserialize, Serialize};

use crate::error::AbilityError;
use crate::evaluate::{can_with_policy, ManageAllPrecedence};
use crate::identity::Identity;
use crate::resolve::AbilityResolver;
use crate::rule::RuleSet;
use crate::store::GrantStore;
use crate::{Action, Subject};

/// An established session: identity plus its effective rule set.
///
/// Construction goes through [`establish`](Self::establish), which completes
/// the resolution before the value exists: a session whose rule set has not
/// finished merging cannot be observed. The rule set lives exactly as long
/// as the session and is recomputed fresh on the next login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedSession {
    identity: Identity,
    ability_rules: RuleSet,
}

impl AuthenticatedSession {
    /// Resolve abilities for `identity` and establish the session.
    ///
    /// This is the only fallible step of session setup the engine owns; an
    /// `InvalidIdentity` here aborts the login, everything else degrades
    /// inside the resolver.
    pub async fn establish<S: GrantStore>(
        resolver: &AbilityResolver<S>,
        identity: Identity,
    ) -> Result<Self, AbilityError> {
        let ability_rules = resolver.resolve(&identity).await?;
        Ok(Self {
            identity,
            ability_rules,
        })
    }

    /// Assemble a session from parts already at hand (e.g. rules decoded off
    /// a token).
    pub fn from_parts(identity: Identity, ability_rules: RuleSet) -> Self {
        Self {
            identity,
            ability_rules,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn rules(&self) -> &RuleSet {
        &self.ability_rules
    }

    /// Capability check under the default `manage-all` precedence.
    pub fn can(&self, action: Action, subject: &Subject) -> bool {
        self.can_with_policy(action, subject, ManageAllPrecedence::default())
    }

    pub fn can_with_policy(
        &self,
        action: Action,
        subject: &Subject,
        precedence: ManageAllPrecedence,
    ) -> bool {
        can_with_policy(
            &self.ability_rules,
            action,
            subject,
            self.identity.is_super_admin,
            precedence,
        )
    }

    /// The rule array in the shape attached to the session token:
    /// `[{ "action": ..., "subject": ... }, ...]`, key-sorted.
    pub fn ability_rules_json(&self) -> serde_json::Value {
        serde_json::json!(self.ability_rules.to_sorted_rules())
    }
}
