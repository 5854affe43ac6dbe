use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors a query handler can end a call with. All of them are terminal for that call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Missing or malformed required input.
    #[error("{0}")]
    InvalidArgument(String),

    /// Well-formed input with no matching record.
    #[error("payment not found: {0}")]
    NotFound(String),

    /// Delivery to the caller failed mid-stream.
    #[error("{0}")]
    Internal(String),
}

/// Failure reported by an [`crate::app::payment_service::EventSink`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("receiver closed")]
    Closed,
    #[error("transport error: {0}")]
    Transport(String),
}
