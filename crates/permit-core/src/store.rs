//! Typed classification of persistence-boundary failures.
//!
//! Store adapters never hand raw driver errors upward. They reduce every
//! failure to a [`StoreError`] whose [`StoreErrorKind`] is a closed set, so
//! retry decisions are a pure match on the kind.

use std::fmt;

use thiserror::Error;

use crate::error::{AppError, ErrorKind};

/// PostgreSQL SQLSTATE for `foreign_key_violation`.
pub const SQLSTATE_FOREIGN_KEY_VIOLATION: &str = "23503";

/// PostgreSQL SQLSTATE for `unique_violation`.
pub const SQLSTATE_UNIQUE_VIOLATION: &str = "23505";

/// Closed set of persistence failure classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreErrorKind {
    /// A referenced row is not (yet) visible to the store.
    ForeignKeyViolation,
    /// A unique constraint rejected the write.
    UniqueViolation,
    /// The requested row does not exist.
    NotFound,
    /// A conditional write found the row in a different state.
    Conflict,
    /// The store could not be reached.
    Unavailable,
    /// Anything else.
    Other,
}

impl StoreErrorKind {
    /// Classify a SQLSTATE code reported by the store.
    pub fn from_sql_state(code: Option<&str>) -> Self {
        match code {
            Some(SQLSTATE_FOREIGN_KEY_VIOLATION) => Self::ForeignKeyViolation,
            Some(SQLSTATE_UNIQUE_VIOLATION) => Self::UniqueViolation,
            // Class 08: connection exceptions.
            Some(c) if c.starts_with("08") => Self::Unavailable,
            _ => Self::Other,
        }
    }

    /// Return the kind as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ForeignKeyViolation => "foreign_key_violation",
            Self::UniqueViolation => "unique_violation",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Unavailable => "unavailable",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A classified persistence failure.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct StoreError {
    /// The failure class.
    pub kind: StoreErrorKind,
    /// The raw store code, when the store reported one.
    pub code: Option<String>,
    /// Human-readable detail.
    pub message: String,
}

impl StoreError {
    /// Create a store error of the given kind.
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: None,
            message: message.into(),
        }
    }

    /// Create a store error from a raw SQLSTATE code, classifying it.
    pub fn from_code(code: Option<String>, message: impl Into<String>) -> Self {
        Self {
            kind: StoreErrorKind::from_sql_state(code.as_deref()),
            code,
            message: message.into(),
        }
    }

    /// Shorthand for a foreign-key violation.
    pub fn foreign_key(message: impl Into<String>) -> Self {
        Self {
            kind: StoreErrorKind::ForeignKeyViolation,
            code: Some(SQLSTATE_FOREIGN_KEY_VIOLATION.to_string()),
            message: message.into(),
        }
    }

    /// Shorthand for a missing row.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::NotFound, message)
    }

    /// Shorthand for a lost conditional write.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Conflict, message)
    }

    /// Whether this failure is the commit-visibility race the provisioner retries.
    pub fn is_foreign_key_violation(&self) -> bool {
        self.kind == StoreErrorKind::ForeignKeyViolation
    }
}

/// Result alias for store adapter calls.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let kind = match err.kind {
            StoreErrorKind::ForeignKeyViolation => ErrorKind::TransientStore,
            StoreErrorKind::NotFound => ErrorKind::NotFound,
            StoreErrorKind::UniqueViolation | StoreErrorKind::Conflict => ErrorKind::Conflict,
            StoreErrorKind::Unavailable | StoreErrorKind::Other => ErrorKind::Database,
        };
        let message = err.message.clone();
        AppError::with_source(kind, message, err)
    }
}
