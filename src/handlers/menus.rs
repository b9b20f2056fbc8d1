use axum::{
    extract::{Path, State},
    response::Response,
    routing::{get, post, put},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::services::menus::{CreateCategoryInput, CreateMenuItemInput, CreateModifierInput};
use crate::{ApiResponse, AppState};

use super::common::{created_response, success_response};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", post(create_category))
        .route("/items", post(create_menu_item))
        .route("/items/:id", get(get_menu_item))
        .route("/items/:id/availability", put(set_availability))
        .route("/items/:id/price", put(update_price))
        .route("/items/:id/modifiers", get(list_modifiers))
        .route("/modifiers", post(create_modifier))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AvailabilityBody {
    pub is_available: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PriceBody {
    pub price: Decimal,
}

#[utoipa::path(
    post,
    path = "/api/v1/menu/categories",
    summary = "Create menu category",
    request_body = CreateCategoryInput,
    responses(
        (status = 201, description = "Category created", body = crate::entities::MenuCategoryModel),
        (status = 404, description = "Restaurant not found", body = crate::errors::ErrorResponse)
    ),
    tag = "menu"
)]
pub async fn create_category(
    State(state): State<AppState>,
    Json(input): Json<CreateCategoryInput>,
) -> Result<Response, ServiceError> {
    let category = state.services.menus.create_category(input).await?;
    Ok(created_response(ApiResponse::new(category)))
}

#[utoipa::path(
    post,
    path = "/api/v1/menu/items",
    summary = "Create menu item",
    request_body = CreateMenuItemInput,
    responses(
        (status = 201, description = "Menu item created", body = crate::entities::MenuItemModel),
        (status = 400, description = "Invalid price", body = crate::errors::ErrorResponse),
        (status = 404, description = "Category not found", body = crate::errors::ErrorResponse)
    ),
    tag = "menu"
)]
pub async fn create_menu_item(
    State(state): State<AppState>,
    Json(input): Json<CreateMenuItemInput>,
) -> Result<Response, ServiceError> {
    let item = state.services.menus.create_menu_item(input).await?;
    Ok(created_response(ApiResponse::new(item)))
}

#[utoipa::path(
    get,
    path = "/api/v1/menu/items/{id}",
    summary = "Get menu item",
    params(("id" = Uuid, Path, description = "Menu item ID")),
    responses(
        (status = 200, description = "Menu item found", body = crate::entities::MenuItemModel),
        (status = 404, description = "Menu item not found", body = crate::errors::ErrorResponse)
    ),
    tag = "menu"
)]
pub async fn get_menu_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let item = state.services.menus.get_menu_item(id).await?;
    Ok(success_response(ApiResponse::new(item)))
}

#[utoipa::path(
    put,
    path = "/api/v1/menu/items/{id}/availability",
    summary = "Set menu item availability",
    params(("id" = Uuid, Path, description = "Menu item ID")),
    request_body = AvailabilityBody,
    responses(
        (status = 200, description = "Availability updated", body = crate::entities::MenuItemModel),
        (status = 404, description = "Menu item not found", body = crate::errors::ErrorResponse)
    ),
    tag = "menu"
)]
pub async fn set_availability(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AvailabilityBody>,
) -> Result<Response, ServiceError> {
    let item = state
        .services
        .menus
        .set_item_availability(id, body.is_available)
        .await?;
    Ok(success_response(ApiResponse::new(item)))
}

#[utoipa::path(
    put,
    path = "/api/v1/menu/items/{id}/price",
    summary = "Update menu item price",
    description = "Existing cart lines keep their snapshot price",
    params(("id" = Uuid, Path, description = "Menu item ID")),
    request_body = PriceBody,
    responses(
        (status = 200, description = "Price updated", body = crate::entities::MenuItemModel),
        (status = 400, description = "Invalid price", body = crate::errors::ErrorResponse),
        (status = 404, description = "Menu item not found", body = crate::errors::ErrorResponse)
    ),
    tag = "menu"
)]
pub async fn update_price(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<PriceBody>,
) -> Result<Response, ServiceError> {
    let item = state.services.menus.update_item_price(id, body.price).await?;
    Ok(success_response(ApiResponse::new(item)))
}

#[utoipa::path(
    post,
    path = "/api/v1/menu/modifiers",
    summary = "Create modifier",
    request_body = CreateModifierInput,
    responses(
        (status = 201, description = "Modifier created", body = crate::entities::ModifierModel),
        (status = 404, description = "Menu item not found", body = crate::errors::ErrorResponse)
    ),
    tag = "menu"
)]
pub async fn create_modifier(
    State(state): State<AppState>,
    Json(input): Json<CreateModifierInput>,
) -> Result<Response, ServiceError> {
    let modifier = state.services.menus.create_modifier(input).await?;
    Ok(created_response(ApiResponse::new(modifier)))
}

#[utoipa::path(
    get,
    path = "/api/v1/menu/items/{id}/modifiers",
    summary = "List modifiers for a menu item",
    params(("id" = Uuid, Path, description = "Menu item ID")),
    responses((status = 200, description = "Modifier list")),
    tag = "menu"
)]
pub async fn list_modifiers(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let modifiers = state.services.menus.list_modifiers(id).await?;
    Ok(success_response(ApiResponse::new(modifiers)))
}
