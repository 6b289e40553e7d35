// Identifier Guard
//
// Names taken from request paths are checked here before they reach any
// storage query.

use super::error::{DomainError, Result};
use std::fmt;

/// Returns true if `candidate` is non-empty and consists only of ASCII
/// letters and digits.
pub fn is_safe_identifier(candidate: &str) -> bool {
    !candidate.is_empty() && candidate.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// A queue name that passed the identifier guard
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueueName(String);

impl QueueName {
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if is_safe_identifier(&raw) {
            Ok(Self(raw))
        } else {
            Err(DomainError::InvalidIdentifier(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for QueueName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueueName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
