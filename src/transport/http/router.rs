use crate::app::payment_service::PaymentList;
use crate::domain::payment::{EventType, Payment, PaymentEvent, PaymentStatus, Provider};
use crate::transport::http::handlers::{health, payments, stream};
use crate::transport::http::types::{
    ApiResponse, AppState, GetPaymentRequest, ListPaymentsRequest, StreamPaymentsRequest,
};
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        payments::get_payment_handler,
        payments::list_payments_handler,
        stream::stream_payments_handler
    ),
    components(schemas(
        ApiResponse,
        GetPaymentRequest,
        ListPaymentsRequest,
        StreamPaymentsRequest,
        EventType,
        Payment,
        PaymentEvent,
        PaymentList,
        PaymentStatus,
        Provider
    )),
    info(
        title = "PaymentService",
        description = "Read access to payment records: GetPayment, ListPayments, StreamPayments"
    )
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/api/payments/get", post(payments::get_payment_handler))
        .route("/api/payments/list", post(payments::list_payments_handler))
        .route("/api/payments/stream", post(stream::stream_payments_handler))
        .with_state(app_state)
}
