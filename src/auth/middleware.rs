//! Session Guard Middleware
//! Mission: Gate API endpoints behind JWT validation and role checks

use crate::auth::{
    api::AuthState,
    models::{AuthUser, Role},
};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

/// Auth middleware that validates the bearer token and resolves the caller
///
/// The token subject is looked up in the user store on every request, so a
/// deleted account or a stale role never slips through on an old token. The
/// resolved identity is attached to request extensions for handlers to pass
/// explicitly into the service layer.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|t| t.to_string())
        .ok_or(AuthError::MissingToken)?;

    let claims = state
        .jwt_handler
        .validate_token(&token)
        .map_err(|_| AuthError::InvalidToken)?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidToken)?;

    let user = state
        .user_store
        .get_user_by_id(&user_id)
        .map_err(|e| {
            tracing::error!("User lookup failed during auth: {}", e);
            AuthError::Internal
        })?
        .ok_or(AuthError::UnknownUser)?;

    req.extensions_mut().insert(AuthUser::from_user(&user));

    Ok(next.run(req).await)
}

/// Admin gate - must be layered after `auth_middleware`
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AuthError> {
    match req.extensions().get::<AuthUser>() {
        Some(user) if user.role == Role::Admin => Ok(next.run(req).await),
        Some(_) => Err(AuthError::NotAdmin),
        // No resolved identity means the auth layer never ran
        None => Err(AuthError::MissingToken),
    }
}

/// Auth error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    UnknownUser,
    NotAdmin,
    Internal,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Not authorized, no token"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Not authorized, token failed"),
            AuthError::UnknownUser => (StatusCode::UNAUTHORIZED, "Not authorized, token failed"),
            AuthError::NotAdmin => (StatusCode::FORBIDDEN, "Not authorized as an admin"),
            AuthError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
