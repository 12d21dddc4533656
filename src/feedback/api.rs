//! Feedback API Endpoints
//! Mission: Map feedback service operations onto the REST surface

use crate::auth::models::AuthUser;
use crate::feedback::models::{
    CreateFeedbackRequest, Feedback, FeedbackWithOwner, UpdateStatusRequest,
};
use crate::feedback::service::{FeedbackError, FeedbackService};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// Create new feedback - POST /api/feedback
pub async fn create_feedback(
    State(service): State<Arc<FeedbackService>>,
    Extension(caller): Extension<AuthUser>,
    Json(payload): Json<CreateFeedbackRequest>,
) -> Result<(StatusCode, Json<Feedback>), FeedbackError> {
    let feedback = service.create(&caller, payload)?;
    Ok((StatusCode::CREATED, Json(feedback)))
}

/// Get the caller's own feedback - GET /api/feedback/my-feedback
pub async fn get_my_feedback(
    State(service): State<Arc<FeedbackService>>,
    Extension(caller): Extension<AuthUser>,
) -> Result<Json<Vec<Feedback>>, FeedbackError> {
    let records = service.list_mine(&caller.id)?;
    Ok(Json(records))
}

/// Get feedback by id - GET /api/feedback/:id
pub async fn get_feedback_by_id(
    State(service): State<Arc<FeedbackService>>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<FeedbackWithOwner>, FeedbackError> {
    // A malformed id resolves nothing, same as an unknown one
    let id = Uuid::parse_str(&id).map_err(|_| FeedbackError::NotFound)?;
    let record = service.get_by_id(&id, &caller.id, caller.role)?;
    Ok(Json(record))
}

/// Get all feedback - GET /api/feedback (admin)
pub async fn get_all_feedback(
    State(service): State<Arc<FeedbackService>>,
    Extension(caller): Extension<AuthUser>,
) -> Result<Json<Vec<FeedbackWithOwner>>, FeedbackError> {
    let records = service.list_all(caller.role)?;
    Ok(Json(records))
}

/// Update feedback status - PUT /api/feedback/:id/status (admin)
pub async fn update_feedback_status(
    State(service): State<Arc<FeedbackService>>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<FeedbackWithOwner>, FeedbackError> {
    let id = Uuid::parse_str(&id).map_err(|_| FeedbackError::NotFound)?;
    let record = service.update_status(&id, &payload.status, caller.role)?;
    Ok(Json(record))
}

impl IntoResponse for FeedbackError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            FeedbackError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            FeedbackError::Forbidden => (StatusCode::FORBIDDEN, "Not authorized"),
            FeedbackError::NotFound => (StatusCode::NOT_FOUND, "Feedback not found"),
            FeedbackError::Internal(err) => {
                tracing::error!("Feedback store error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
