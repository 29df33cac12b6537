//! The two disjoint outcomes of a failed check.
//!
//! A [`Failure`] means the data does not have the required shape. A
//! [`DefinitionError`] means the schema itself is broken; composite kinds
//! (`either`, `restrict`) recover from the former and never from the latter.
use thiserror::Error;

use crate::path::Path;

/// Data-shape mismatch at some location inside the checked value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    pub message: String,
    pub path: Path,
}

impl Failure {
    pub fn new(message: impl Into<String>, path: &Path) -> Self {
        Self { message: message.into(), path: path.clone() }
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{} at {}", self.message, self.path)
        }
    }
}

impl std::error::Error for Failure {}

/// Malformed schema: never interpreted as "value does not match".
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("invalid definition: {0}")]
    Unknown(String),

    #[error("invalid definition: {0}")]
    Malformed(String),

    #[error("{kind}: {key} is not defined")]
    MissingParameter { kind: String, key: String },

    #[error("{kind}: parameter {key} must be {expected}")]
    InvalidParameter { kind: String, key: String, expected: &'static str },

    #[error("invalid pattern /{pattern}/: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CheckError {
    #[error(transparent)]
    Failure(#[from] Failure),
    #[error(transparent)]
    Definition(#[from] DefinitionError),
}

impl CheckError {
    pub fn is_failure(&self) -> bool { matches!(self, CheckError::Failure(_)) }

    pub fn as_failure(&self) -> Option<&Failure> {
        match self {
            CheckError::Failure(f) => Some(f),
            CheckError::Definition(_) => None,
        }
    }
}

pub type CheckResult = Result<(), CheckError>;
