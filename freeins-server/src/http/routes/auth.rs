//! Login endpoint

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::auth;
use crate::http::error::ApiError;
use crate::http::extractors::ApiJson;
use crate::http::server::AppState;
use crate::models::UserSummary;

/// Login request
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserSummary,
}

/// POST /api/auth/login
async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let outcome = auth::login(state.store.as_ref(), &state.tokens, &req.email, &req.password)
        .await
        .inspect_err(|e| {
            if matches!(e, auth::AuthError::InvalidCredentials) {
                tracing::info!("login rejected");
            }
        })?;

    Ok(Json(LoginResponse {
        token: outcome.token,
        user: UserSummary::from(outcome.user),
    }))
}

/// Auth routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/auth/login", post(login))
}
