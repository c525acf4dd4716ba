//! Driver error types.

use outfitter_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors of the driver.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable holds an invalid value.
    #[error("configuration error: {0}")]
    Config(String),

    /// A script line could not be parsed.
    #[error("input error: {0}")]
    Input(String),

    /// Content loading or save file failure.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Reading input or writing output failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// JSON body written for a rejected line.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

impl From<&DomainError> for ErrorBody {
    fn from(err: &DomainError) -> Self {
        let error = match err {
            DomainError::OutOfRange { .. } => "out_of_range",
            DomainError::InvalidExchange(_) => "invalid_exchange",
            DomainError::NotInCatalog(_) => "not_in_catalog",
            DomainError::InsufficientFunds { .. } => "insufficient_funds",
            DomainError::InventoryNotFound(_) => "inventory_not_found",
            DomainError::UnknownItem(_) => "unknown_item",
            DomainError::Validation(_) => "validation_error",
            DomainError::Infrastructure(_) => "infrastructure_error",
        };
        Self {
            error,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outfitter_core::item::ItemId;
    use uuid::Uuid;

    fn code_of(err: &DomainError) -> &'static str {
        ErrorBody::from(err).error
    }

    #[test]
    fn test_exchange_errors_map_to_codes() {
        assert_eq!(
            code_of(&DomainError::OutOfRange { index: 3, len: 2 }),
            "out_of_range"
        );
        assert_eq!(
            code_of(&DomainError::InvalidExchange("nope".into())),
            "invalid_exchange"
        );
        assert_eq!(
            code_of(&DomainError::InventoryNotFound(Uuid::new_v4())),
            "inventory_not_found"
        );
    }

    #[test]
    fn test_transaction_errors_map_to_codes() {
        assert_eq!(
            code_of(&DomainError::NotInCatalog(ItemId::new("apple"))),
            "not_in_catalog"
        );
        assert_eq!(
            code_of(&DomainError::InsufficientFunds {
                balance: 1,
                price: 2
            }),
            "insufficient_funds"
        );
    }

    #[test]
    fn test_error_body_carries_message() {
        let body = ErrorBody::from(&DomainError::Validation("bad input".into()));

        assert_eq!(body.error, "validation_error");
        assert!(body.message.contains("bad input"));
    }
}
