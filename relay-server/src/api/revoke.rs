use crate::errors::ApiError;
use crate::openapi::TOKEN_TAG;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use log::{error, info};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct RevokeParams {
    refresh_token: String,
}

/// Asks the login server to invalidate a refresh token.
///
/// A non-200 answer from the login server is reported in the message, not
/// raised as an error; only transport failures produce a 502.
#[utoipa::path(
    get,
    path = "/api/auth/revoke",
    tag = TOKEN_TAG,
    params(
        ("refresh_token" = String, Query, description = "Refresh token to invalidate")
    ),
    responses(
        (status = 200, description = "Revocation attempted; message carries the outcome"),
        (status = 502, description = "Login server unreachable")
    )
)]
pub(super) async fn revoke_handler(
    State(state): State<AppState>,
    Query(params): Query<RevokeParams>,
) -> Response {
    match state.tokens.revoke(&params.refresh_token).await {
        Ok(outcome) if outcome.success => {
            info!("Refresh token revoked");
            "Token has been revoked.".into_response()
        }
        Ok(outcome) => {
            error!(
                "Login server did not confirm revocation (status {})",
                outcome.status
            );
            format!(
                "Revocation not confirmed, login server answered with status {}.",
                outcome.status.as_u16()
            )
            .into_response()
        }
        Err(err) => {
            error!("Token revocation failed: {err}");
            ApiError::bad_gateway("Failed to reach the login server").into_response()
        }
    }
}
