//! Contract error types for the archive
//!
//! These errors are transport-agnostic; the REST layer maps them to HTTP
//! Problem Details. The domain core propagates them without logging.

/// Archive domain errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveError {
    /// A required argument was absent
    InvalidArgument {
        /// Parameter name
        param: String,
    },
    /// A field failed validation
    Validation {
        /// Validation error message
        message: String,
    },
    /// Requested row does not exist
    NotFound {
        /// Resource type (season, league, team, game, ...)
        resource: String,
        /// Resource identifier
        id: String,
    },
    /// Uniqueness violation on create or update
    Conflict {
        /// Conflict reason
        reason: String,
    },
    /// Integrity violation surfaced at commit, after rollback
    Integrity {
        /// Violation details
        details: String,
    },
    /// Internal error
    Internal,
}

impl ArchiveError {
    /// Shorthand for a not-found error
    pub fn not_found(resource: &str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: id.into(),
        }
    }
}

impl std::fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument { param } => {
                write!(f, "Invalid argument: {} is required", param)
            }
            Self::Validation { message } => {
                write!(f, "Validation error: {}", message)
            }
            Self::NotFound { resource, id } => {
                write!(f, "{} not found: {}", resource, id)
            }
            Self::Conflict { reason } => {
                write!(f, "Conflict: {}", reason)
            }
            Self::Integrity { details } => {
                write!(f, "Integrity violation: {}", details)
            }
            Self::Internal => {
                write!(f, "Internal error")
            }
        }
    }
}

impl std::error::Error for ArchiveError {}
