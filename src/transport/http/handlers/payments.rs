use crate::transport::http::handlers::common::ok_response;
use crate::transport::http::types::{
    json_422, ApiResponse, AppState, GetPaymentRequest, ListPaymentsRequest,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[utoipa::path(
    post,
    path = "/api/payments/get",
    request_body = GetPaymentRequest,
    responses(
        (status = 200, description = "The payment (in `data`)", body = ApiResponse),
        (status = 400, description = "payment_id is empty", body = ApiResponse),
        (status = 404, description = "No payment with that id", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn get_payment_handler(
    State(state): State<AppState>,
    request: Result<Json<GetPaymentRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"payment_id\": \"...\"}").into_response(),
    };

    match state.payment_service.get_payment(&request.payment_id).await {
        Ok(payment) => ok_response(payment),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/payments/list",
    request_body = ListPaymentsRequest,
    responses(
        (status = 200, description = "Matching payments, count and an empty next_cursor (in `data`)", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn list_payments_handler(
    State(state): State<AppState>,
    request: Result<Json<ListPaymentsRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(e, "{\"provider\"?: ..., \"status\"?: ..., \"limit\"?: n}")
                .into_response()
        }
    };

    match state
        .payment_service
        .list_payments(request.provider, request.status, request.limit)
        .await
    {
        Ok(list) => ok_response(list),
        Err(e) => e.into_response(),
    }
}
