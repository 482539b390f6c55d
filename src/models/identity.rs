//! Caller identities and per-call context

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque caller identifier, compared only for equality
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Identity {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Host-supplied facts for one operation: who is calling and the logical clock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    pub caller: Identity,
    /// Monotonically non-decreasing logical time
    pub now: u64,
}

impl CallContext {
    pub fn new(caller: impl Into<Identity>, now: u64) -> Self {
        Self {
            caller: caller.into(),
            now,
        }
    }
}
