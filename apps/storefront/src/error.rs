//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command Function → Result<T, ApiError>                                │
//! │         │                                                               │
//! │         ├── DbError ─────────────── NOT_FOUND / DATABASE_ERROR ───┐    │
//! │         ├── DataUnavailableError ── CATALOG_UNAVAILABLE ──────────┤    │
//! │         ├── CatalogError ────────── INVALID_SELECTION ────────────┤    │
//! │         ├── CommitError ─────────── SELECTION_REJECTED / ... ─────┤    │
//! │         └── ValidationError ─────── VALIDATION_ERROR ─────────────┤    │
//! │                                                                   ▼    │
//! │                                          { code, message } to frontend │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Internal failures are logged in full and reported with a generic message.

use serde::Serialize;

use menu_core::{CatalogError, CommitError, CoreError, DataUnavailableError, ValidationError};
use menu_db::DbError;

/// API error returned from storefront commands.
///
/// ```json
/// {
///   "code": "SELECTION_REJECTED",
///   "message": "Select at least one option from 'Size'; 'Size' requires at least 1 selection(s)"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Database operation failed (500)
    DatabaseError,

    /// The product's option catalog could not be loaded
    CatalogUnavailable,

    /// A group or option id does not belong to the catalog; the session
    /// selection was reset
    InvalidSelection,

    /// Commit refused: the selection breaks group rules
    SelectionRejected,

    /// The product can no longer be ordered
    ProductUnavailable,

    /// Too many open configuration sessions
    SessionLimit,

    /// Cart operation failed
    CartError,

    /// Internal server error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates a cart error.
    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::InvalidData(e) => ApiError::validation(e),
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ApiError::new(ErrorCode::ValidationError, "Invalid reference")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<DataUnavailableError> for ApiError {
    fn from(err: DataUnavailableError) -> Self {
        tracing::error!(product_id = %err.product_id, reason = %err.reason, "Catalog load failed");
        ApiError::new(
            ErrorCode::CatalogUnavailable,
            format!("Options for product {} are unavailable", err.product_id),
        )
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::new(ErrorCode::InvalidSelection, err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Violation messages pass through verbatim.
impl From<CommitError> for ApiError {
    fn from(err: CommitError) -> Self {
        match err {
            CommitError::Rejected(_) => ApiError::new(ErrorCode::SelectionRejected, err.to_string()),
            CommitError::InvalidQuantity(e) => ApiError::validation(e.to_string()),
            CommitError::ProductInactive(id) => ApiError::new(
                ErrorCode::ProductUnavailable,
                format!("Product {} is not available for ordering", id),
            ),
            CommitError::PriceOverflow(_) => ApiError::validation(err.to_string()),
            CommitError::Cart(reason) => ApiError::cart(reason),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Catalog(e) => e.into(),
            CoreError::Validation(e) => e.into(),
            CoreError::DataUnavailable(e) => e.into(),
            CoreError::Commit(e) => e.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_core::Violation;

    #[test]
    fn test_rejected_commit_keeps_messages_verbatim() {
        let err: ApiError = CommitError::Rejected(vec![Violation::AboveMaximum {
            group_name: "Toppings".to_string(),
            max: 2,
        }])
        .into();

        assert_eq!(err.code, ErrorCode::SelectionRejected);
        assert_eq!(err.message, "'Toppings' allows at most 2 selection(s)");
    }

    #[test]
    fn test_internal_db_errors_are_masked() {
        let err: ApiError = DbError::Internal("disk I/O error at page 7".to_string()).into();

        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Database operation failed");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::not_found("Product", "p1")).unwrap();

        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: p1");
    }
}
