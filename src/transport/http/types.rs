use crate::app::payment_service::PaymentService;
use crate::domain::payment::{PaymentStatus, Provider};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub payment_service: PaymentService,
}

#[derive(Deserialize, Serialize, Debug, Default, ToSchema)]
pub struct GetPaymentRequest {
    /// Required; an empty id is rejected as an invalid argument.
    #[serde(default)]
    pub payment_id: String,
}

#[derive(Deserialize, Serialize, Debug, Default, ToSchema)]
pub struct ListPaymentsRequest {
    /// `UNKNOWN` or absent means no provider filter.
    #[serde(default)]
    pub provider: Provider,
    /// `UNKNOWN` or absent means no status filter.
    #[serde(default)]
    pub status: PaymentStatus,
    /// 1..=100 is honoured; anything else (including values above 100) means 10.
    #[serde(default)]
    pub limit: Option<i64>,
}

#[derive(Deserialize, Serialize, Debug, Default, ToSchema)]
pub struct StreamPaymentsRequest {
    /// `UNKNOWN` or absent means every payment is replayed.
    #[serde(default)]
    pub provider: Provider,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok(data: JsonValue) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse::err(format!(
            "Invalid JSON body: {} (expected: {})",
            err, expected
        ))),
    )
}
