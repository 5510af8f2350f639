use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Subject (resource/form/entity code) an ability rule applies to.
///
/// Subjects are modeled as opaque strings (e.g. "Invoices", "Sales").
/// The sentinel subject `"all"` is the wildcard: a grant on `all` applies to
/// every subject for that action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subject(Cow<'static, str>);

impl Subject {
    pub fn new(code: impl Into<Cow<'static, str>>) -> Self {
        Self(code.into())
    }

    /// The wildcard subject.
    pub fn all() -> Self {
        Self(Cow::Borrowed("all"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_all(&self) -> bool {
        self.as_str() == "all"
    }
}

impl core::fmt::Display for Subject {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Subject {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Subject {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
