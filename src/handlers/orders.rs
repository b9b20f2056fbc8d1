use axum::{
    extract::{Path, Query, State},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::{ApiResponse, AppState};

use super::common::{success_response, PaginatedResponse, PaginationParams};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/cancel", post(cancel_order))
        .route("/orders/:id/assign-agent", post(assign_agent))
        .route("/orders/:id/dispatch", post(dispatch_order))
        .route("/orders/:id/deliver", post(deliver_order))
        .route("/users/:id/orders", get(list_orders_for_user))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignAgentBody {
    pub agent_id: Uuid,
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    summary = "Get order",
    description = "The order with its line items",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order found"),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let order = state.services.orders.get_order_with_items(id).await?;
    Ok(success_response(ApiResponse::new(order)))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/orders",
    summary = "List a user's orders",
    params(("user_id" = Uuid, Path, description = "User ID"), PaginationParams),
    responses((status = 200, description = "Paginated order list")),
    tag = "orders"
)]
pub async fn list_orders_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Response, ServiceError> {
    let (orders, total) = state
        .services
        .orders
        .list_orders_for_user(user_id, pagination.page, pagination.per_page)
        .await?;
    Ok(success_response(PaginatedResponse::new(
        orders,
        pagination.page,
        pagination.per_page,
        total,
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/orders/{id}/cancel",
    summary = "Cancel order",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order cancelled", body = crate::entities::OrderModel),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Order can no longer be cancelled", body = crate::errors::ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn cancel_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let order = state.services.orders.cancel_order(id).await?;
    Ok(success_response(ApiResponse::new(order)))
}

#[utoipa::path(
    post,
    path = "/api/v1/orders/{id}/assign-agent",
    summary = "Assign delivery agent",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = AssignAgentBody,
    responses(
        (status = 200, description = "Agent assigned", body = crate::entities::OrderModel),
        (status = 400, description = "Not a delivery order", body = crate::errors::ErrorResponse),
        (status = 404, description = "Order or agent not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Delivery already in progress", body = crate::errors::ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn assign_agent(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AssignAgentBody>,
) -> Result<Response, ServiceError> {
    let order = state
        .services
        .orders
        .assign_delivery_agent(id, body.agent_id)
        .await?;
    Ok(success_response(ApiResponse::new(order)))
}

#[utoipa::path(
    post,
    path = "/api/v1/orders/{id}/dispatch",
    summary = "Mark order out for delivery",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order dispatched", body = crate::entities::OrderModel),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Order not ready for dispatch", body = crate::errors::ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn dispatch_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let order = state.services.orders.mark_out_for_delivery(id).await?;
    Ok(success_response(ApiResponse::new(order)))
}

#[utoipa::path(
    post,
    path = "/api/v1/orders/{id}/deliver",
    summary = "Mark order delivered",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order delivered", body = crate::entities::OrderModel),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Order not out for delivery", body = crate::errors::ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn deliver_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let order = state.services.orders.mark_delivered(id).await?;
    Ok(success_response(ApiResponse::new(order)))
}
