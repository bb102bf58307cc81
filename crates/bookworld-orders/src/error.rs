//! Error types for the order-merging layer.

use thiserror::Error;

/// Errors surfaced by this crate.
///
/// Note that [`OrderMerger::list_orders`](crate::OrderMerger::list_orders)
/// never returns these: source failures degrade into the listing's
/// per-source outcomes instead. The error type exists for the operations
/// that do fail loudly, such as loading configuration.
#[derive(Debug, Error)]
pub enum OrdersError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Db(#[from] bookworld_db::DbError),

    /// Workbook decoding failed.
    #[error("workbook error: {0}")]
    Workbook(#[from] bookworld_xlsx::XlsxError),

    /// File I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file was present but unparsable.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result alias for order-merging operations.
pub type OrdersResult<T> = Result<T, OrdersError>;
