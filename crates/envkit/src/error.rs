//! Error types for env file parsing and remote synchronization.
//!
//! Parse errors are fatal and abort a sync before anything is written.
//! Remote errors are caught per phase by the executor and folded into the
//! [`SyncResult`](crate::SyncResult); they only surface directly when the
//! initial snapshot cannot be fetched.

use crate::types::SyncResult;
use std::fmt;
use thiserror::Error;

/// Errors produced while reading an env file
#[derive(Debug, Error)]
pub enum ParseError {
    /// A non-comment line without an `=` separator
    #[error("line {line}: missing '=' in declaration")]
    MissingDelimiter {
        /// Line number (1-indexed)
        line: usize,
    },

    /// A line whose key is blank after trimming
    #[error("line {line}: empty key")]
    EmptyKey {
        /// Line number (1-indexed)
        line: usize,
    },

    /// Input ended inside a multi-line quoted value
    #[error("unclosed quoted value for key {key}")]
    UnclosedQuote {
        /// Key whose value was never closed
        key: String,
    },

    /// Underlying read failure
    #[error("failed to read env file: {0}")]
    Io(#[from] std::io::Error),
}

/// Categories of remote errors for user feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// No response was received
    Network,
    /// Token missing, expired, or lacking permission
    Auth,
    /// The target resource does not exist
    NotFound,
    /// The remote rejected the payload
    Validation,
    /// The remote failed internally
    Server,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Classify an HTTP status code (or its absence)
    pub fn from_status(status: Option<u16>) -> Self {
        match status {
            None => Self::Network,
            Some(401 | 403) => Self::Auth,
            Some(404) => Self::NotFound,
            Some(400 | 409 | 422) => Self::Validation,
            Some(500..=599) => Self::Server,
            Some(_) => Self::Other,
        }
    }

    /// Get a user-friendly description of this error category.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Network => "Network connectivity issue",
            Self::Auth => "Authentication failed",
            Self::NotFound => "Resource not found",
            Self::Validation => "Request rejected",
            Self::Server => "Remote server error",
            Self::Other => "Unexpected error",
        }
    }

    /// Get actionable advice for resolving this error category.
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Network => "Check the instance URL and your connection, then retry",
            Self::Auth => "Check that your API token is valid and has write access",
            Self::NotFound => "Verify the resource identifier",
            Self::Validation => "Check the variable key and flags for invalid values",
            Self::Server => "The remote may be degraded; retry later",
            Self::Other => "Check the error details for more information",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Opaque failure from the remote collaborator, tagged with the operation
/// that was being attempted (`list`, `bulk update`, `create <key>`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{context}: {message}")]
pub struct RemoteError {
    pub context: String,
    pub message: String,
    /// HTTP status code if available
    pub status: Option<u16>,
}

impl RemoteError {
    pub fn new(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Re-tag an error with a different operation context
    pub fn in_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_status(self.status)
    }
}

/// Errors returned by a full sync run
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Fetching the remote snapshot failed; nothing was written
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Some operations failed. The full result, including successes, is kept.
    #[error("{} of {} operations failed", .0.failed, .0.attempted())]
    PartialFailure(SyncResult),
}

impl SyncError {
    /// The execution result, if the run got as far as executing
    pub fn result(&self) -> Option<&SyncResult> {
        match self {
            Self::PartialFailure(result) => Some(result),
            _ => None,
        }
    }
}

/// Result type for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
