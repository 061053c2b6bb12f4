pub(crate) mod callback;
pub(crate) mod login;
pub(crate) mod refresh;
pub(crate) mod revoke;

use crate::state::AppState;
use axum::{routing::get, Router};

/// Combines all relay routes into a single router
pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(greeting_handler))
        .route("/auth", get(login::login_handler))
        .route(
            "/api/auth/callback/{provider}",
            get(callback::callback_handler),
        )
        .route("/api/auth/refresh", get(refresh::refresh_handler))
        .route("/api/auth/revoke", get(revoke::revoke_handler))
}

async fn greeting_handler() -> &'static str {
    "EVE SSO relay is running. Start a login at /auth."
}
