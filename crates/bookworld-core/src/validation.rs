//! # Validation Module
//!
//! Input validation for account and catalog fields. Runs before the
//! repositories are touched; the database constraints (NOT NULL, UNIQUE,
//! CHECK) remain the last line of defense.

use crate::error::ValidationError;
use crate::types::Role;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Account Fields
// =============================================================================

/// Validates a login.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - No whitespace
pub fn validate_login(login: &str) -> ValidationResult<()> {
    let login = login.trim();

    if login.is_empty() {
        return Err(ValidationError::Required {
            field: "login".to_string(),
        });
    }

    if login.chars().count() > 50 {
        return Err(ValidationError::TooLong {
            field: "login".to_string(),
            max: 50,
        });
    }

    if login.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "login".to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }

    Ok(())
}

/// Validates a password. Only shape checks here; hardening is out of scope.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.chars().count() > 255 {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: 255,
        });
    }

    Ok(())
}

/// Validates a full name.
pub fn validate_full_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "full_name".to_string(),
        });
    }

    if name.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "full_name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a role string against the closed role set.
pub fn validate_role(role: &str) -> ValidationResult<Role> {
    Role::from_str_opt(role).ok_or_else(|| ValidationError::NotAllowed {
        field: "role".to_string(),
        allowed: vec![
            "guest".to_string(),
            "client".to_string(),
            "manager".to_string(),
            "admin".to_string(),
        ],
    })
}

// =============================================================================
// Catalog Fields
// =============================================================================

/// Validates a book title.
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.chars().count() > 255 {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: 255,
        });
    }

    Ok(())
}

/// Validates an author name.
pub fn validate_author(author: &str) -> ValidationResult<()> {
    let author = author.trim();

    if author.is_empty() {
        return Err(ValidationError::Required {
            field: "author".to_string(),
        });
    }

    if author.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "author".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a publication year.
pub fn validate_year(year: i64) -> ValidationResult<()> {
    if !(1400..=2100).contains(&year) {
        return Err(ValidationError::OutOfRange {
            field: "year".to_string(),
            min: 1400,
            max: 2100,
        });
    }
    Ok(())
}

/// Validates a price in kopecks.
pub fn validate_price(kopecks: i64) -> ValidationResult<()> {
    if kopecks <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Validates a search query. Empty is allowed (returns all books);
/// the trimmed query is returned for binding.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}
