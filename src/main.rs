//! Feedback Portal - Customer feedback collection backend
//!
//! Users sign up, log in, submit star-rated feedback, and view their own
//! submissions; administrators view everything and move feedback through
//! the pending/reviewed/resolved workflow.

use anyhow::{Context, Result};
use dotenv::dotenv;
use std::path::PathBuf;
use std::{env, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feedback_portal::{
    auth::{AuthState, JwtHandler, UserStore},
    feedback::{FeedbackService, FeedbackStore},
    routes::{create_router, with_spa_fallback},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    let db_path = env::var("DATABASE_PATH").unwrap_or_else(|_| "feedback_portal.db".to_string());
    let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
    let expiration_hours = env::var("JWT_EXPIRATION_HOURS")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(24);
    let port = env::var("PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(5000);
    let frontend_dist = PathBuf::from(
        env::var("FRONTEND_DIST").unwrap_or_else(|_| "frontend/dist".to_string()),
    );

    let user_store = Arc::new(UserStore::new(&db_path).context("Failed to open user store")?);
    let feedback_store =
        Arc::new(FeedbackStore::new(&db_path).context("Failed to open feedback store")?);
    info!("Database ready at {}", db_path);

    let jwt_handler =
        Arc::new(JwtHandler::new(jwt_secret).with_expiration_hours(expiration_hours));
    let auth_state = AuthState::new(user_store, jwt_handler);
    let service = Arc::new(FeedbackService::new(feedback_store));

    let app = with_spa_fallback(create_router(auth_state, service), &frontend_dist);

    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!("API server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Initialize tracing with env-filter overrides
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "feedback_portal=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
