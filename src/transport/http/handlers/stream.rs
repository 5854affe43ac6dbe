//! Server-sent-events binding for the payment stream.
//!
//! The query handler runs in its own task and writes into a bounded channel;
//! the response body drains the channel. When the client disconnects the body
//! is dropped, the channel closes and the handler stops at its next checkpoint.

use crate::domain::payment::PaymentEvent;
use crate::transport::http::types::{json_422, ApiResponse, AppState, StreamPaymentsRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures_util::stream;
use tokio::sync::mpsc;

/// Events buffered between the handler task and the response body.
const STREAM_BUFFER: usize = 1;

#[utoipa::path(
    post,
    path = "/api/payments/stream",
    request_body = StreamPaymentsRequest,
    responses(
        (status = 200, description = "One `existing` event per matching payment, then end of stream",
            body = PaymentEvent, content_type = "text/event-stream"),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn stream_payments_handler(
    State(state): State<AppState>,
    request: Result<Json<StreamPaymentsRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"provider\"?: ...}").into_response(),
    };

    let (mut tx, rx) = mpsc::channel::<PaymentEvent>(STREAM_BUFFER);
    let service = state.payment_service.clone();
    tokio::spawn(async move {
        if let Err(e) = service.stream_payments(request.provider, &mut tx).await {
            log::warn!("[STREAM] StreamPayments ended early: {}", e);
        }
    });

    let events = stream::unfold(rx, |mut rx| async move {
        let event = rx.recv().await?;
        Some((to_sse_event(&event), rx))
    });

    Sse::new(events)
        .keep_alive(KeepAlive::default())
        .into_response()
}

fn to_sse_event(event: &PaymentEvent) -> Result<Event, axum::Error> {
    Event::default()
        .event(event.event_type.as_str())
        .json_data(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::Payment;

    #[test]
    fn test_sse_event_builds_from_payment_event() {
        let event = PaymentEvent::existing(Payment {
            id: "pay_001".to_string(),
            ..Default::default()
        });
        assert!(to_sse_event(&event).is_ok());
    }
}
