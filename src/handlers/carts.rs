use axum::{
    extract::{Path, State},
    response::Response,
    routing::{delete, get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::services::carts::AddItemInput;
use crate::services::checkout::CheckoutInput;
use crate::{ApiResponse, AppState};

use super::common::{created_response, success_response};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/:id/cart", post(get_or_create_cart).get(get_cart_for_user))
        .route("/carts/:id", get(get_cart))
        .route("/carts/:id/items", post(add_item).delete(clear_cart))
        .route("/carts/:id/items/:item_id", delete(remove_item))
        .route("/carts/:id/checkout", post(checkout))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/cart",
    summary = "Get or create cart",
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user's cart", body = crate::entities::CartModel),
        (status = 404, description = "User not found", body = crate::errors::ErrorResponse)
    ),
    tag = "carts"
)]
pub async fn get_or_create_cart(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let cart = state.services.carts.get_or_create_cart(user_id).await?;
    Ok(success_response(ApiResponse::new(cart)))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/cart",
    summary = "Get a user's cart with items",
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Cart and items"),
        (status = 404, description = "No cart for this user", body = crate::errors::ErrorResponse)
    ),
    tag = "carts"
)]
pub async fn get_cart_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let cart = state.services.carts.get_cart_for_user(user_id).await?;
    Ok(success_response(ApiResponse::new(cart)))
}

#[utoipa::path(
    get,
    path = "/api/v1/carts/{id}",
    summary = "Get cart",
    params(("id" = Uuid, Path, description = "Cart ID")),
    responses(
        (status = 200, description = "Cart and items"),
        (status = 404, description = "Cart not found", body = crate::errors::ErrorResponse)
    ),
    tag = "carts"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let cart = state.services.carts.get_cart(id).await?;
    Ok(success_response(ApiResponse::new(cart)))
}

#[utoipa::path(
    post,
    path = "/api/v1/carts/{id}/items",
    summary = "Add item to cart",
    params(("id" = Uuid, Path, description = "Cart ID")),
    request_body = AddItemInput,
    responses(
        (status = 200, description = "Updated cart"),
        (status = 400, description = "Invalid quantity or unavailable item", body = crate::errors::ErrorResponse),
        (status = 404, description = "Cart or menu item not found", body = crate::errors::ErrorResponse)
    ),
    tag = "carts"
)]
pub async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<AddItemInput>,
) -> Result<Response, ServiceError> {
    let cart = state.services.carts.add_item(id, input).await?;
    Ok(success_response(ApiResponse::new(cart)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/carts/{id}/items/{item_id}",
    summary = "Remove item from cart",
    params(
        ("id" = Uuid, Path, description = "Cart ID"),
        ("item_id" = Uuid, Path, description = "Cart item ID")
    ),
    responses(
        (status = 200, description = "Updated cart"),
        (status = 404, description = "Cart or item not found", body = crate::errors::ErrorResponse)
    ),
    tag = "carts"
)]
pub async fn remove_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, ServiceError> {
    let cart = state.services.carts.remove_item(id, item_id).await?;
    Ok(success_response(ApiResponse::new(cart)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/carts/{id}/items",
    summary = "Clear cart",
    params(("id" = Uuid, Path, description = "Cart ID")),
    responses(
        (status = 200, description = "Emptied cart"),
        (status = 404, description = "Cart not found", body = crate::errors::ErrorResponse)
    ),
    tag = "carts"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let cart = state.services.carts.clear_cart(id).await?;
    Ok(success_response(ApiResponse::new(cart)))
}

#[utoipa::path(
    post,
    path = "/api/v1/carts/{id}/checkout",
    summary = "Checkout",
    description = "Places an order from the cart's contents and consumes the cart",
    params(("id" = Uuid, Path, description = "Cart ID")),
    request_body = CheckoutInput,
    responses(
        (status = 201, description = "Order placed", body = crate::entities::OrderModel),
        (status = 400, description = "Empty or mixed-restaurant cart", body = crate::errors::ErrorResponse),
        (status = 404, description = "Cart not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Cart modified concurrently", body = crate::errors::ErrorResponse)
    ),
    tag = "carts"
)]
pub async fn checkout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<CheckoutInput>,
) -> Result<Response, ServiceError> {
    let order = state.services.checkout.checkout(id, input).await?;
    Ok(created_response(ApiResponse::new(order)))
}
