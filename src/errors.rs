//! Unified error types and result handling.
//!
//! All fallible operations in the crate return [`Result`]. Domain failures
//! raised inside a storage transaction abort it; the API boundary maps each
//! variant onto a response error category via [`Error::is_validation`].

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration problem (missing or malformed environment value).
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Storage engine failure, propagated unchanged.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failure (reading an import document, binding the listener).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An order was requested with no items.
    #[error("Cannot create order with no items")]
    EmptyOrder,

    /// A line item carried a non-positive quantity.
    #[error("Invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: String, quantity: i32 },

    /// No priced product row matched the requested id.
    #[error("Product not found: {id}")]
    ProductNotFound { id: String },

    /// The requested product is currently flagged out of stock.
    #[error("Product out of stock: {id}")]
    OutOfStock { id: String },

    /// A line item resolved to a currency different from the order's.
    #[error("Currency mismatch: order is in {expected}, item priced in {found}")]
    CurrencyMismatch { expected: String, found: String },

    /// An imported product references a category that does not exist.
    #[error("Unknown category: {name}")]
    UnknownCategory { name: String },

    /// Any other failure inside the bulk import pipeline.
    #[error("Import error: {message}")]
    Import { message: String },
}

impl Error {
    /// Whether this error is a request-level validation failure rather than
    /// an infrastructure one. Validation failures are the caller's fault and
    /// are reported under the `validation` category.
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyOrder
                | Self::InvalidQuantity { .. }
                | Self::ProductNotFound { .. }
                | Self::OutOfStock { .. }
                | Self::CurrencyMismatch { .. }
                | Self::UnknownCategory { .. }
        )
    }
}

/// Convenience `Result` type.
pub type Result<T> = std::result::Result<T, Error>;
