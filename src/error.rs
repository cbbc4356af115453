//! Error types for impersonation operations.

/// The main error type for impersonation operations.
#[derive(Debug, thiserror::Error)]
pub enum ImpersonateError {
    /// An identifier did not resolve to a user.
    #[error("not found: {0}")]
    NotFound(String),

    /// The underlying store or session backend failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// The actor or target is not authorized for impersonation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The request is invalid (e.g. self-impersonation).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A configured searchable field path is malformed.
    #[error("invalid field path: {0}")]
    InvalidFieldPath(String),
}

impl ImpersonateError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn invalid_field_path(msg: impl Into<String>) -> Self {
        Self::InvalidFieldPath(msg.into())
    }

    /// Check if this is a `NotFound` error.
    ///
    /// Callers typically translate `NotFound` into a "user not found"
    /// response and everything else into a generic failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// A Result type alias using `ImpersonateError`.
pub type Result<T> = std::result::Result<T, ImpersonateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ImpersonateError::not_found("user 42");
        assert_eq!(err.to_string(), "not found: user 42");

        let err = ImpersonateError::storage("connection refused");
        assert_eq!(err.to_string(), "storage error: connection refused");
    }

    #[test]
    fn test_is_not_found() {
        assert!(ImpersonateError::not_found("x").is_not_found());
        assert!(!ImpersonateError::storage("x").is_not_found());
    }
}
