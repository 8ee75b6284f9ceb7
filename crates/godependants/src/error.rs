//! Error types for godependants operations.
//!
//! Errors fall into three tiers with fixed handling:
//!
//! - **Fatal configuration errors** ([`Error::Io`], [`Error::Toolchain`],
//!   [`Error::Json`], [`Error::Config`]): reported once, the process
//!   terminates immediately.
//! - **Partial load errors** ([`Error::Load`]): individual packages failed to
//!   load; each is reported, then the process terminates.
//! - **Per-argument errors** are not `Error` values at all: an unresolvable
//!   user-supplied package is reported as a diagnostic and skipped, and
//!   processing continues with the remaining arguments.
//!
//! There are no retries anywhere.

use thiserror::Error;

/// Result type for godependants operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for godependants operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The build toolchain could not be invoked at all.
    #[error("run go toolchain: {0}")]
    Io(#[from] std::io::Error),

    /// The build toolchain ran but exited with a failure status.
    #[error("go list failed: {stderr}")]
    Toolchain {
        /// Trimmed stderr output of the failed invocation.
        stderr: String,
    },

    /// The toolchain's JSON output could not be decoded.
    #[error("decode go list output: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration or an unexpected toolchain answer
    /// (wrong package count, package outside any module).
    #[error("configuration error: {0}")]
    Config(String),

    /// One or more packages failed to load. Each failure is reported
    /// individually before the process terminates.
    #[error("{} package(s) failed to load", .0.len())]
    Load(Vec<PackageError>),
}

/// A load failure scoped to a single package.
///
/// Collected while decoding the toolchain's output; these do not abort the
/// decode, but their presence makes the whole load fail with [`Error::Load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageError {
    /// Import path of the package that failed to load.
    pub import_path: String,
    /// Toolchain-reported error message.
    pub message: String,
}

impl PackageError {
    /// Create a per-package load error.
    #[must_use]
    pub fn new(import_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            import_path: import_path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for PackageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.import_path, self.message)
    }
}

impl std::error::Error for PackageError {}
