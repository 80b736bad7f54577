//! Error types for the fsns library.
//!
//! This module provides the error hierarchy for every namespace operation,
//! using `thiserror` for ergonomic error handling. The variants follow the
//! taxonomy callers rely on: invalid arguments are surfaced immediately,
//! not-found outcomes are distinguishable so callers can fall back to a
//! default, access denial is kept apart from not-found, and I/O failures are
//! hard failures.

use std::path::PathBuf;

use thiserror::Error;

use crate::class_id::ClassId;

/// Result type alias for operations that may fail with an fsns error.
///
/// # Examples
///
/// ```
/// use fsns::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the fsns library.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller supplied an argument the operation cannot accept.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Why the argument was rejected.
        reason: String,
    },

    /// A binary identifier could not be decoded.
    #[error("invalid identifier at offset {offset}: {reason}")]
    InvalidIdentifier {
        /// Byte offset of the offending record.
        offset: usize,
        /// What was wrong with the record.
        reason: String,
    },

    /// A column index outside the well-known column table.
    #[error("invalid column {index}: only {count} columns are defined")]
    InvalidColumn {
        /// The requested column index.
        index: usize,
        /// Number of defined columns.
        count: usize,
    },

    /// The provider has not been initialized with a root.
    #[error("provider is not initialized")]
    NotInitialized,

    /// A path does not exist.
    #[error("path not found: {}", path.display())]
    PathNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// A registry-style lookup found nothing.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// The item has no registered provider class to bind to.
    #[error("bind target missing for {}", path.display())]
    TargetMissing {
        /// The item that could not be bound.
        path: PathBuf,
    },

    /// A provider class was resolved but could not be instantiated.
    #[error("binding {} via {class} failed: {reason}", path.display())]
    BindFailed {
        /// The class that was being instantiated.
        class: ClassId,
        /// The target path.
        path: PathBuf,
        /// The reason binding failed.
        reason: String,
    },

    /// No constructor is registered for a provider class.
    #[error("class {class} is not registered")]
    ClassNotRegistered {
        /// The unregistered class.
        class: ClassId,
    },

    /// A handler class is on the block list.
    #[error("access denied: handler class {class} is blocked")]
    AccessDenied {
        /// The blocked class.
        class: ClassId,
    },

    /// Permission denied accessing a path.
    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        /// The path that could not be accessed.
        path: PathBuf,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A directory listing failed partway through.
    #[error("enumeration of {} failed: {source}", path.display())]
    Enumeration {
        /// The directory being listed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The type registry store failed.
    #[error("registry error: {0}")]
    Registry(#[from] rusqlite::Error),

    /// The type registry is temporarily unusable.
    #[error("registry unavailable: {reason}")]
    RegistryUnavailable {
        /// Why the registry could not be read.
        reason: String,
    },

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

impl Error {
    /// Check if the error is a not-found outcome.
    ///
    /// Not-found outcomes include missing paths, missing registry entries and
    /// missing bind targets; callers commonly treat them as "fall back to the
    /// default".
    ///
    /// # Examples
    ///
    /// ```
    /// use fsns::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PathNotFound { path: PathBuf::from("/nonexistent") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PathNotFound { .. } | Self::NotFound { .. } | Self::TargetMissing { .. }
        )
    }

    /// Check if the error is an access denial.
    ///
    /// # Examples
    ///
    /// ```
    /// use fsns::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PermissionDenied { path: PathBuf::from("/restricted") };
    /// assert!(err.is_access_denied());
    /// ```
    #[must_use]
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied { .. } | Self::PermissionDenied { .. })
    }

    /// Check if the error stems from a caller mistake.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. } | Self::InvalidIdentifier { .. } | Self::InvalidColumn { .. }
        )
    }

    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}
