use axum::{
    extract::{Path, State},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::PaymentStatus;
use crate::errors::ServiceError;
use crate::services::payments::RecordPaymentInput;
use crate::{ApiResponse, AppState};

use super::common::{created_response, success_response};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payments", post(record_payment))
        .route("/payments/:id", get(get_payment))
        .route("/payments/:id/settle", post(settle_payment))
        .route("/orders/:id/payment", get(get_payment_for_order))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SettleBody {
    pub outcome: PaymentStatus,
}

#[utoipa::path(
    post,
    path = "/api/v1/payments",
    summary = "Record payment",
    description = "Records a pending payment against an order; the amount must match the order total",
    request_body = RecordPaymentInput,
    responses(
        (status = 201, description = "Payment recorded", body = crate::entities::PaymentModel),
        (status = 400, description = "Amount mismatch", body = crate::errors::ErrorResponse),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Payment already recorded or order not pending", body = crate::errors::ErrorResponse)
    ),
    tag = "payments"
)]
pub async fn record_payment(
    State(state): State<AppState>,
    Json(input): Json<RecordPaymentInput>,
) -> Result<Response, ServiceError> {
    let payment = state.services.payments.record_payment(input).await?;
    Ok(created_response(ApiResponse::new(payment)))
}

#[utoipa::path(
    post,
    path = "/api/v1/payments/{id}/settle",
    summary = "Settle payment",
    description = "Marks a pending payment COMPLETED or FAILED and cascades to the order",
    params(("id" = Uuid, Path, description = "Payment ID")),
    request_body = SettleBody,
    responses(
        (status = 200, description = "Payment settled", body = crate::entities::PaymentModel),
        (status = 400, description = "Invalid settlement outcome", body = crate::errors::ErrorResponse),
        (status = 404, description = "Payment not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Payment already settled", body = crate::errors::ErrorResponse)
    ),
    tag = "payments"
)]
pub async fn settle_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SettleBody>,
) -> Result<Response, ServiceError> {
    let payment = state.services.payments.settle(id, body.outcome).await?;
    Ok(success_response(ApiResponse::new(payment)))
}

#[utoipa::path(
    get,
    path = "/api/v1/payments/{id}",
    summary = "Get payment",
    params(("id" = Uuid, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment found", body = crate::entities::PaymentModel),
        (status = 404, description = "Payment not found", body = crate::errors::ErrorResponse)
    ),
    tag = "payments"
)]
pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let payment = state.services.payments.get_payment(id).await?;
    Ok(success_response(ApiResponse::new(payment)))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/{order_id}/payment",
    summary = "Get payment for order",
    params(("order_id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Payment found", body = crate::entities::PaymentModel),
        (status = 404, description = "No payment for this order", body = crate::errors::ErrorResponse)
    ),
    tag = "payments"
)]
pub async fn get_payment_for_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let payment = state
        .services
        .payments
        .get_payment_for_order(order_id)
        .await?;
    Ok(success_response(ApiResponse::new(payment)))
}
