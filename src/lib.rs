pub mod app;
pub mod domain;
pub mod infra;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::error::{ServiceError, SinkError};
pub use app::payment_service::{EventSink, PaymentList, PaymentService};
pub use domain::payment::{EventType, Payment, PaymentEvent, PaymentRegistry, PaymentStatus, Provider};
pub use infra::config::Config;
