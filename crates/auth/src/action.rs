use core::str::FromStr;

use serde::{Deserialize, Serialize};

use vertex_core::DomainError;

/// Action verb an ability rule applies to.
///
/// The verb set is fixed: storage, overrides, and the evaluator all speak the
/// same nine actions. `Manage` is the blanket verb; `manage` on subject
/// `all` grants everything at the rule level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
    Approve,
    Post,
    Export,
    Import,
    Manage,
}

impl Action {
    /// The eight actions a per-user privilege override can grant or revoke.
    ///
    /// `Manage` is deliberately absent: override records carry one boolean
    /// column per entry here, and no column for the blanket verb.
    pub const OVERRIDABLE: [Action; 8] = [
        Action::Read,
        Action::Create,
        Action::Update,
        Action::Delete,
        Action::Approve,
        Action::Post,
        Action::Export,
        Action::Import,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Approve => "approve",
            Action::Post => "post",
            Action::Export => "export",
            Action::Import => "import",
            Action::Manage => "manage",
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(Action::Read),
            "create" => Ok(Action::Create),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            "approve" => Ok(Action::Approve),
            "post" => Ok(Action::Post),
            "export" => Ok(Action::Export),
            "import" => Ok(Action::Import),
            "manage" => Ok(Action::Manage),
            other => Err(DomainError::validation(format!("unknown action '{other}'"))),
        }
    }
}
