//! Errors shared by the domain foundation.

use thiserror::Error;

/// An identifier could not be parsed from its textual form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid {kind}: {reason}")]
pub struct InvalidId {
    kind: &'static str,
    reason: String,
}

impl InvalidId {
    pub fn new(kind: &'static str, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }

    /// Name of the identifier type that failed to parse.
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}
