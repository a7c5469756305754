//! Account registration and login handlers.

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::token;
use crate::auth::users::RegisterError;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Form payload shared by /register and /login.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub message: String,
    pub sub: String,
}

pub async fn register(
    State(state): State<AppState>,
    Form(creds): Form<Credentials>,
) -> Response {
    if creds.username.trim().is_empty() || creds.password.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "username and password must not be empty" })),
        )
            .into_response();
    }

    match state.users.register(&creds.username, &creds.password) {
        Ok(()) => {
            tracing::info!(user = %creds.username, "Account registered");
            metrics::record_registration();
            (
                StatusCode::CREATED,
                Json(json!({ "message": format!("{} registered", creds.username) })),
            )
                .into_response()
        }
        Err(RegisterError::UsernameTaken) => {
            tracing::debug!(user = %creds.username, "Registration rejected, username taken");
            (
                StatusCode::CONFLICT,
                Json(json!({ "error": "username already taken" })),
            )
                .into_response()
        }
    }
}

pub async fn login(
    State(state): State<AppState>,
    Form(creds): Form<Credentials>,
) -> Response {
    if !state.users.verify(&creds.username, &creds.password) {
        tracing::warn!(user = %creds.username, "Login rejected");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid username or password" })),
        )
            .into_response();
    }

    let config = state.config.load();
    match token::issue(
        &creds.username,
        config.auth.jwt_secret.as_bytes(),
        config.auth.token_ttl_minutes,
    ) {
        Ok(access_token) => {
            tracing::info!(user = %creds.username, "Login succeeded");
            (
                StatusCode::OK,
                Json(TokenResponse {
                    access_token,
                    token_type: "bearer",
                    message: format!("login succeeded for {}", creds.username),
                    sub: creds.username,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(user = %creds.username, error = %e, "Token issuance failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "token issuance failed" })),
            )
                .into_response()
        }
    }
}
