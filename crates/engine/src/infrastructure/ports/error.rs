//! Error types for port operations.

/// Session store errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Database operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepoError {
    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}

/// Failures of the external collaborators: sloot provider, combat resolver
/// and frame renderer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UpstreamError {
    /// `status` is the HTTP status when the service answered at all.
    #[error("{service} request failed: {message}")]
    RequestFailed {
        service: &'static str,
        status: Option<u16>,
        message: String,
    },
    #[error("{service} returned an invalid response: {message}")]
    InvalidResponse {
        service: &'static str,
        message: String,
    },
    #[error("{operation} timed out after {after_ms}ms")]
    Timeout {
        operation: &'static str,
        after_ms: u64,
    },
}

impl UpstreamError {
    pub fn request_failed(service: &'static str, message: impl ToString) -> Self {
        Self::RequestFailed {
            service,
            status: None,
            message: message.to_string(),
        }
    }

    /// A request the service answered with a non-success status.
    pub fn rejected(service: &'static str, status: u16, message: impl ToString) -> Self {
        Self::RequestFailed {
            service,
            status: Some(status),
            message: message.to_string(),
        }
    }

    pub fn invalid_response(service: &'static str, message: impl ToString) -> Self {
        Self::InvalidResponse {
            service,
            message: message.to_string(),
        }
    }

    /// Whether retrying the same call could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            // Client errors fail the same way again, except timeouts and throttling
            Self::RequestFailed {
                status: Some(status),
                ..
            } => !(400..500).contains(status) || matches!(*status, 408 | 429),
            Self::RequestFailed { status: None, .. } => true,
            Self::InvalidResponse { .. } => false,
        }
    }
}
