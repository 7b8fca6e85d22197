//! # Error Types
//!
//! Errors returned by every resolver, registry, and trait operation in this
//! crate.
//!
//! ## Overview
//!
//! All operations return `Result<T, VfsError>`. Variants carry enough context
//! (type indicators, mount identifiers, reasons) to diagnose a failure
//! without re-deriving it from logs.
//!
//! ## Quick Example
//!
//! ```rust
//! use vfscore::VfsError;
//!
//! let err = VfsError::MountPoint { identifier: "m1".into() };
//! assert!(err.to_string().contains("m1"));
//! ```
//!
//! ## Conversion from std::io::Error
//!
//! [`VfsError`] implements `From<std::io::Error>` so backend implementations
//! built on top of `std::fs` can propagate with `?`.
//!
//! ```rust
//! use vfscore::VfsError;
//! use std::io::{Error, ErrorKind};
//!
//! let io_err = Error::new(ErrorKind::NotFound, "no such file");
//! let vfs_err: VfsError = io_err.into();
//! assert!(matches!(vfs_err, VfsError::Access { .. }));
//! ```

use crate::path_spec::TypeIndicator;

/// Errors produced by path-spec construction, the resolver, and backend
/// trait implementations.
///
/// # Non-Exhaustive
///
/// New variants may be added without a breaking-change bump. Always include
/// a wildcard arm when matching:
///
/// ```rust
/// use vfscore::VfsError;
///
/// fn describe(err: VfsError) -> String {
///     match err {
///         VfsError::UnsupportedFormat { type_indicator } => {
///             format!("unsupported: {type_indicator}")
///         }
///         other => other.to_string(),
///     }
/// }
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum VfsError {
    /// A path spec is structurally invalid: a required attribute is
    /// missing, or a parent is present/absent where forbidden.
    #[error("invalid path specification: {reason}")]
    PathSpec {
        /// Human-readable description of the violated constraint.
        reason: String,
    },

    /// A type indicator has no registered factory.
    #[error("unsupported format: {type_indicator}")]
    UnsupportedFormat {
        /// The type indicator that has no registered backend.
        type_indicator: TypeIndicator,
    },

    /// A backend's `open`/`read` failed due to malformed data or an
    /// underlying I/O failure. Resolver calls translate raw I/O and value
    /// errors from backends into this variant.
    #[error("backend error: {source}")]
    BackEnd {
        /// Rendered backend failure description.
        source: String,
    },

    /// A `TYPE_MOUNT` spec names an identifier with no registered mapping.
    #[error("mount point not found: {identifier}")]
    MountPoint {
        /// The unmapped mount identifier.
        identifier: String,
    },

    /// A required credential is missing or malformed, or an unknown
    /// credential name was set for a type indicator that does not accept
    /// it.
    #[error("credential error: {reason}")]
    Credential {
        /// Human-readable description; never includes credential values.
        reason: String,
    },

    /// Access was denied, e.g. decryption failed or a wrong password was
    /// supplied.
    #[error("access denied: {reason}")]
    Access {
        /// Human-readable description of the denial.
        reason: String,
    },

    /// A resolver context cache is at capacity and holds no evictable
    /// (zero-refcount) entry.
    #[error("resolver context cache is full")]
    CacheFull,

    /// An operation is not implemented by the specific backend in use
    /// (e.g. requesting extents on a compressed stream).
    #[error("operation not supported: {operation}")]
    NotSupported {
        /// The unsupported operation's name.
        operation: &'static str,
    },
}

impl From<std::io::Error> for VfsError {
    fn from(error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => VfsError::BackEnd {
                source: error.to_string(),
            },
            std::io::ErrorKind::PermissionDenied => VfsError::Access {
                reason: error.to_string(),
            },
            _ => VfsError::BackEnd {
                source: error.to_string(),
            },
        }
    }
}
