//! # Service Error Types
//!
//! Errors crossing the service boundary, classified for the
//! presentation layer.
//!
//! ## Classification
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       ServiceError Variants                             │
//! │                                                                         │
//! │  Validation  - bad input; show the message, keep the form open         │
//! │  NotFound    - the entity is gone; refresh the listing                 │
//! │  Conflict    - a business rule said no (insufficient stock,            │
//! │                negative adjustment, illegal transition)                 │
//! │  Storage     - the database failed; retry or report                    │
//! │  Transfer    - import/export encoding failed                           │
//! │                                                                         │
//! │  Every variant carries a message safe to show the operator.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use stockroom_core::transfer::TransferError;
use stockroom_core::{CoreError, ValidationError};
use stockroom_db::DbError;

/// Errors returned by [`crate::StockroomService`] operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input validation failed before any state changed.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A business rule rejected the operation.
    #[error("{0}")]
    Conflict(CoreError),

    /// The storage layer failed.
    #[error("storage error: {0}")]
    Storage(#[from] DbError),

    /// Import/export encoding or decoding failed.
    #[error("transfer error: {0}")]
    Transfer(#[from] TransferError),
}

impl ServiceError {
    /// Shorthand for a NotFound error.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        ServiceError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

// Core errors split in two: validation failures keep their own variant
// so the presentation layer can treat them as form errors, everything
// else is a business conflict.
impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(inner) => ServiceError::Validation(inner),
            other => ServiceError::Conflict(other),
        }
    }
}

/// Convenience type alias for Results with ServiceError.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_validation_maps_to_validation_variant() {
        let core = CoreError::Validation(ValidationError::NoItems);
        let service: ServiceError = core.into();
        assert!(matches!(service, ServiceError::Validation(_)));
    }

    #[test]
    fn test_core_business_error_maps_to_conflict() {
        let core = CoreError::NegativeStock { resulting: -3 };
        let service: ServiceError = core.into();
        assert!(matches!(service, ServiceError::Conflict(_)));
        assert_eq!(
            service.to_string(),
            "Stock adjustment rejected: resulting stock would be -3"
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = ServiceError::not_found("brand", "b-missing");
        assert_eq!(err.to_string(), "brand not found: b-missing");
    }
}
