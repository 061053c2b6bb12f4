use crate::errors::ApiError;
use crate::openapi::TOKEN_TAG;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde::Deserialize;
use sso_client::TokenError;

#[derive(Debug, Deserialize)]
pub(super) struct RefreshParams {
    refresh_token: String,
}

/// Trades a refresh token for a fresh token pair.
///
/// On a provider error the raw provider body is passed through verbatim
/// with the provider's status; callers use it to diagnose rejected or
/// rotated refresh tokens.
#[utoipa::path(
    get,
    path = "/api/auth/refresh",
    tag = TOKEN_TAG,
    params(
        ("refresh_token" = String, Query, description = "Refresh token from a previous authorization")
    ),
    responses(
        (status = 200, description = "Fresh token pair from the login server"),
        (status = 502, description = "Login server unreachable")
    )
)]
pub(super) async fn refresh_handler(
    State(state): State<AppState>,
    Query(params): Query<RefreshParams>,
) -> Response {
    match state.tokens.refresh(&params.refresh_token).await {
        Ok(tokens) => Json(tokens).into_response(),
        Err(TokenError::Provider { status, body }) => {
            error!("Login server rejected refresh (status {status}): {body}");
            // Intentional pass-through of the provider's answer
            (status, body).into_response()
        }
        Err(err) => {
            error!("Token refresh failed: {err}");
            ApiError::bad_gateway("Failed to reach the login server").into_response()
        }
    }
}
