//! # Error Types
//!
//! Domain-specific error types for bookworld-core.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (login, book id, etc.)
//! 3. Errors are enum variants, never bare strings

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
///
/// These represent business rule violations. They are caught at the edges
/// and translated to user-facing messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Book cannot be found.
    #[error("Book not found: {0}")]
    BookNotFound(String),

    /// Order cannot be found in either provenance.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// User cannot be found.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Credentials did not match any user.
    #[error("Authentication failed for login '{0}'")]
    AuthenticationFailed(String),

    /// Role string is not one of guest/client/manager/admin.
    #[error("Unknown role: '{0}'")]
    UnknownRole(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before business logic runs, when user input does not meet
/// the field rules.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. malformed login).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
