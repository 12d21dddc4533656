//! Authentication API Endpoints
//! Mission: Signup and login handlers returning profile + fresh token

use crate::auth::{
    jwt::JwtHandler,
    models::{AuthResponse, LoginRequest, Role, SignupRequest},
    user_store::{self, UserStore},
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub user_store: Arc<UserStore>,
    pub jwt_handler: Arc<JwtHandler>,
}

impl AuthState {
    pub fn new(user_store: Arc<UserStore>, jwt_handler: Arc<JwtHandler>) -> Self {
        Self {
            user_store,
            jwt_handler,
        }
    }
}

/// Validate a signup payload, reporting only the first offending field
fn validate_signup(payload: &SignupRequest) -> Result<(), &'static str> {
    if payload.name.trim().is_empty() {
        return Err("Name is required");
    }
    if payload.email.trim().is_empty() {
        return Err("Email is required");
    }
    if !payload.email.contains('@') {
        return Err("Please enter a valid email");
    }
    if payload.password.len() < 6 {
        return Err("Password must be at least 6 characters");
    }
    Ok(())
}

/// Register a new user - POST /api/auth/signup
pub async fn signup(
    State(state): State<AuthState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AuthApiError> {
    validate_signup(&payload).map_err(AuthApiError::Validation)?;

    // Pre-check; the unique index backstops concurrent signups below.
    let exists = state
        .user_store
        .get_user_by_email(&payload.email)
        .map_err(AuthApiError::internal)?
        .is_some();
    if exists {
        return Err(AuthApiError::UserExists);
    }

    let user = state
        .user_store
        .create_user(&payload.name, &payload.email, &payload.password, Role::User)
        .map_err(|e| {
            if user_store::is_unique_violation(&e) {
                AuthApiError::EmailInUse
            } else {
                AuthApiError::internal(e)
            }
        })?;

    let token = state
        .jwt_handler
        .generate_token(&user)
        .map_err(AuthApiError::internal)?;

    info!("Signup successful: {}", user.email);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::from_user(&user, token)),
    ))
}

/// Authenticate and get a token - POST /api/auth/login
pub async fn login(
    State(state): State<AuthState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthApiError> {
    // Unknown email and wrong password collapse into the same 401.
    let user = state
        .user_store
        .verify_credentials(&payload.email, &payload.password)
        .map_err(AuthApiError::internal)?
        .ok_or_else(|| {
            warn!("Failed login attempt: {}", payload.email);
            AuthApiError::InvalidCredentials
        })?;

    let token = state
        .jwt_handler
        .generate_token(&user)
        .map_err(AuthApiError::internal)?;

    info!("Login successful: {} ({})", user.email, user.role.as_str());

    Ok(Json(AuthResponse::from_user(&user, token)))
}

/// Auth API errors
#[derive(Debug)]
pub enum AuthApiError {
    Validation(&'static str),
    UserExists,
    EmailInUse,
    InvalidCredentials,
    Internal,
}

impl AuthApiError {
    fn internal(err: anyhow::Error) -> Self {
        tracing::error!("Auth error: {}", err);
        AuthApiError::Internal
    }
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AuthApiError::UserExists => (StatusCode::BAD_REQUEST, "User already exists"),
            AuthApiError::EmailInUse => (StatusCode::BAD_REQUEST, "Email already in use"),
            AuthApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid email or password")
            }
            AuthApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
