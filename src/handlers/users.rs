use axum::{
    extract::{Path, Query, State},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::services::users::RegisterUserInput;
use crate::{ApiResponse, AppState};

use super::common::{created_response, success_response, PaginatedResponse, PaginationParams};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(register_user).get(list_users))
        .route("/:id", get(get_user).delete(remove_user))
        .route("/slug/:slug", get(get_user_by_slug))
        .route("/:id/activate", post(activate_user))
        .route("/:id/deactivate", post(deactivate_user))
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    summary = "Register user",
    request_body = RegisterUserInput,
    responses(
        (status = 201, description = "User registered", body = crate::entities::UserModel),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::errors::ErrorResponse)
    ),
    tag = "users"
)]
pub async fn register_user(
    State(state): State<AppState>,
    Json(input): Json<RegisterUserInput>,
) -> Result<Response, ServiceError> {
    let user = state.services.users.register(input).await?;
    Ok(created_response(ApiResponse::new(user)))
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    summary = "List users",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated user list")
    ),
    tag = "users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Response, ServiceError> {
    let (users, total) = state
        .services
        .users
        .list_users(pagination.page, pagination.per_page)
        .await?;
    Ok(success_response(PaginatedResponse::new(
        users,
        pagination.page,
        pagination.per_page,
        total,
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    summary = "Get user",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = crate::entities::UserModel),
        (status = 404, description = "User not found", body = crate::errors::ErrorResponse)
    ),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let user = state.services.users.get_user(id).await?;
    Ok(success_response(ApiResponse::new(user)))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/slug/{slug}",
    summary = "Get user by slug",
    params(("slug" = String, Path, description = "User slug")),
    responses(
        (status = 200, description = "User found", body = crate::entities::UserModel),
        (status = 404, description = "User not found", body = crate::errors::ErrorResponse)
    ),
    tag = "users"
)]
pub async fn get_user_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, ServiceError> {
    let user = state.services.users.get_user_by_slug(&slug).await?;
    Ok(success_response(ApiResponse::new(user)))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/activate",
    summary = "Activate user",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User activated", body = crate::entities::UserModel),
        (status = 404, description = "User not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Account is removed", body = crate::errors::ErrorResponse)
    ),
    tag = "users"
)]
pub async fn activate_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let user = state.services.users.activate(id).await?;
    Ok(success_response(ApiResponse::new(user)))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/deactivate",
    summary = "Deactivate user",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deactivated", body = crate::entities::UserModel),
        (status = 404, description = "User not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Account is removed", body = crate::errors::ErrorResponse)
    ),
    tag = "users"
)]
pub async fn deactivate_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let user = state.services.users.deactivate(id).await?;
    Ok(success_response(ApiResponse::new(user)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    summary = "Remove user",
    description = "Soft-delete an account. Removal is terminal.",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User removed", body = crate::entities::UserModel),
        (status = 404, description = "User not found", body = crate::errors::ErrorResponse)
    ),
    tag = "users"
)]
pub async fn remove_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let user = state.services.users.remove(id).await?;
    Ok(success_response(ApiResponse::new(user)))
}
