use axum::{
    extract::{Path, State},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::services::feedback::SubmitFeedbackInput;
use crate::{ApiResponse, AppState};

use super::common::{created_response, success_response};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_feedback))
        .route("/:id", get(get_feedback))
}

#[utoipa::path(
    post,
    path = "/api/v1/feedback",
    summary = "Submit feedback",
    request_body = SubmitFeedbackInput,
    responses(
        (status = 201, description = "Feedback stored", body = crate::entities::CustomerFeedbackModel),
        (status = 400, description = "Invalid rating", body = crate::errors::ErrorResponse),
        (status = 404, description = "Referenced entity not found", body = crate::errors::ErrorResponse)
    ),
    tag = "feedback"
)]
pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(input): Json<SubmitFeedbackInput>,
) -> Result<Response, ServiceError> {
    let feedback = state.services.feedback.submit_feedback(input).await?;
    Ok(created_response(ApiResponse::new(feedback)))
}

#[utoipa::path(
    get,
    path = "/api/v1/feedback/{id}",
    summary = "Get feedback",
    params(("id" = Uuid, Path, description = "Feedback ID")),
    responses(
        (status = 200, description = "Feedback found", body = crate::entities::CustomerFeedbackModel),
        (status = 404, description = "Feedback not found", body = crate::errors::ErrorResponse)
    ),
    tag = "feedback"
)]
pub async fn get_feedback(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let feedback = state.services.feedback.get_feedback(id).await?;
    Ok(success_response(ApiResponse::new(feedback)))
}
