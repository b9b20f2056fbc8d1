use axum::{
    extract::{Path, Query, State},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::entities::AccountStatus;
use crate::errors::ServiceError;
use crate::services::restaurants::{AddAddressInput, AddStaffInput, CreateRestaurantInput};
use crate::{ApiResponse, AppState};

use super::common::{created_response, success_response, PaginatedResponse, PaginationParams};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_restaurant).get(list_restaurants))
        .route("/:id", get(get_restaurant))
        .route("/slug/:slug", get(get_restaurant_by_slug))
        .route("/:id/activate", post(activate_restaurant))
        .route("/:id/deactivate", post(deactivate_restaurant))
        .route("/:id/addresses", post(add_address).get(list_addresses))
        .route("/:id/staff", post(add_staff).get(list_staff))
        .route("/:id/menu", get(get_menu))
        .route("/:id/orders", get(list_orders))
        .route("/:id/feedback", get(list_feedback))
}

#[utoipa::path(
    post,
    path = "/api/v1/restaurants",
    summary = "Create restaurant",
    request_body = CreateRestaurantInput,
    responses(
        (status = 201, description = "Restaurant created", body = crate::entities::RestaurantModel),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 409, description = "Duplicate tax or registration number", body = crate::errors::ErrorResponse)
    ),
    tag = "restaurants"
)]
pub async fn create_restaurant(
    State(state): State<AppState>,
    Json(input): Json<CreateRestaurantInput>,
) -> Result<Response, ServiceError> {
    let restaurant = state.services.restaurants.create_restaurant(input).await?;
    Ok(created_response(ApiResponse::new(restaurant)))
}

#[utoipa::path(
    get,
    path = "/api/v1/restaurants",
    summary = "List restaurants",
    params(PaginationParams),
    responses((status = 200, description = "Paginated restaurant list")),
    tag = "restaurants"
)]
pub async fn list_restaurants(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Response, ServiceError> {
    let (restaurants, total) = state
        .services
        .restaurants
        .list_restaurants(pagination.page, pagination.per_page)
        .await?;
    Ok(success_response(PaginatedResponse::new(
        restaurants,
        pagination.page,
        pagination.per_page,
        total,
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/restaurants/{id}",
    summary = "Get restaurant",
    params(("id" = Uuid, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "Restaurant found", body = crate::entities::RestaurantModel),
        (status = 404, description = "Restaurant not found", body = crate::errors::ErrorResponse)
    ),
    tag = "restaurants"
)]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let restaurant = state.services.restaurants.get_restaurant(id).await?;
    Ok(success_response(ApiResponse::new(restaurant)))
}

#[utoipa::path(
    get,
    path = "/api/v1/restaurants/slug/{slug}",
    summary = "Get restaurant by slug",
    params(("slug" = String, Path, description = "Restaurant slug")),
    responses(
        (status = 200, description = "Restaurant found", body = crate::entities::RestaurantModel),
        (status = 404, description = "Restaurant not found", body = crate::errors::ErrorResponse)
    ),
    tag = "restaurants"
)]
pub async fn get_restaurant_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, ServiceError> {
    let restaurant = state
        .services
        .restaurants
        .get_restaurant_by_slug(&slug)
        .await?;
    Ok(success_response(ApiResponse::new(restaurant)))
}

#[utoipa::path(
    post,
    path = "/api/v1/restaurants/{id}/activate",
    summary = "Activate restaurant",
    params(("id" = Uuid, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "Restaurant activated", body = crate::entities::RestaurantModel),
        (status = 404, description = "Restaurant not found", body = crate::errors::ErrorResponse)
    ),
    tag = "restaurants"
)]
pub async fn activate_restaurant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let restaurant = state
        .services
        .restaurants
        .set_status(id, AccountStatus::Active)
        .await?;
    Ok(success_response(ApiResponse::new(restaurant)))
}

#[utoipa::path(
    post,
    path = "/api/v1/restaurants/{id}/deactivate",
    summary = "Deactivate restaurant",
    params(("id" = Uuid, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "Restaurant deactivated", body = crate::entities::RestaurantModel),
        (status = 404, description = "Restaurant not found", body = crate::errors::ErrorResponse)
    ),
    tag = "restaurants"
)]
pub async fn deactivate_restaurant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let restaurant = state
        .services
        .restaurants
        .set_status(id, AccountStatus::Inactive)
        .await?;
    Ok(success_response(ApiResponse::new(restaurant)))
}

#[utoipa::path(
    post,
    path = "/api/v1/restaurants/{id}/addresses",
    summary = "Add restaurant address",
    params(("id" = Uuid, Path, description = "Restaurant ID")),
    request_body = AddAddressInput,
    responses(
        (status = 201, description = "Address added", body = crate::entities::RestaurantAddressModel),
        (status = 404, description = "Restaurant not found", body = crate::errors::ErrorResponse)
    ),
    tag = "restaurants"
)]
pub async fn add_address(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<AddAddressInput>,
) -> Result<Response, ServiceError> {
    let address = state.services.restaurants.add_address(id, input).await?;
    Ok(created_response(ApiResponse::new(address)))
}

#[utoipa::path(
    get,
    path = "/api/v1/restaurants/{id}/addresses",
    summary = "List restaurant addresses",
    params(("id" = Uuid, Path, description = "Restaurant ID")),
    responses((status = 200, description = "Address list")),
    tag = "restaurants"
)]
pub async fn list_addresses(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let addresses = state.services.restaurants.list_addresses(id).await?;
    Ok(success_response(ApiResponse::new(addresses)))
}

#[utoipa::path(
    post,
    path = "/api/v1/restaurants/{id}/staff",
    summary = "Add staff member",
    params(("id" = Uuid, Path, description = "Restaurant ID")),
    request_body = AddStaffInput,
    responses(
        (status = 201, description = "Staff member added", body = crate::entities::RestaurantStaffModel),
        (status = 404, description = "Restaurant or user not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Already a staff member", body = crate::errors::ErrorResponse)
    ),
    tag = "restaurants"
)]
pub async fn add_staff(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<AddStaffInput>,
) -> Result<Response, ServiceError> {
    let membership = state.services.restaurants.add_staff(id, input).await?;
    Ok(created_response(ApiResponse::new(membership)))
}

#[utoipa::path(
    get,
    path = "/api/v1/restaurants/{id}/staff",
    summary = "List staff members",
    params(("id" = Uuid, Path, description = "Restaurant ID")),
    responses((status = 200, description = "Staff list")),
    tag = "restaurants"
)]
pub async fn list_staff(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let staff = state.services.restaurants.list_staff(id).await?;
    Ok(success_response(ApiResponse::new(staff)))
}

#[utoipa::path(
    get,
    path = "/api/v1/restaurants/{id}/menu",
    summary = "Get restaurant menu",
    description = "The full menu grouped by category",
    params(("id" = Uuid, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "Menu sections"),
        (status = 404, description = "Restaurant not found", body = crate::errors::ErrorResponse)
    ),
    tag = "restaurants"
)]
pub async fn get_menu(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let menu = state.services.menus.get_menu(id).await?;
    Ok(success_response(ApiResponse::new(menu)))
}

#[utoipa::path(
    get,
    path = "/api/v1/restaurants/{id}/orders",
    summary = "List restaurant orders",
    params(("id" = Uuid, Path, description = "Restaurant ID"), PaginationParams),
    responses((status = 200, description = "Paginated order list")),
    tag = "restaurants"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Response, ServiceError> {
    let (orders, total) = state
        .services
        .orders
        .list_orders_for_restaurant(id, pagination.page, pagination.per_page)
        .await?;
    Ok(success_response(PaginatedResponse::new(
        orders,
        pagination.page,
        pagination.per_page,
        total,
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/restaurants/{id}/feedback",
    summary = "List restaurant feedback",
    params(("id" = Uuid, Path, description = "Restaurant ID"), PaginationParams),
    responses((status = 200, description = "Paginated feedback list")),
    tag = "restaurants"
)]
pub async fn list_feedback(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Response, ServiceError> {
    let (entries, total) = state
        .services
        .feedback
        .list_feedback_for_restaurant(id, pagination.page, pagination.per_page)
        .await?;
    Ok(success_response(PaginatedResponse::new(
        entries,
        pagination.page,
        pagination.per_page,
        total,
    )))
}
