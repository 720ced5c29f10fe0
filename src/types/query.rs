use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Raw search text as typed by the user.
///
/// The text is never trimmed or rewritten; classification and the outbound
/// request both see exactly what was entered.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query(pub String);

impl Query {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Frontends only submit queries with at least one non-whitespace character.
    pub fn is_submittable(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Query {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Query {
    fn from(s: String) -> Self {
        Self(s)
    }
}
