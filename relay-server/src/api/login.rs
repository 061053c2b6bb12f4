use crate::openapi::FLOW_TAG;
use crate::state::AppState;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use http::{header::LOCATION, StatusCode};
use sso_client::AuthorizationFlow;

/// Starts the Authorization Code flow by sending the user-agent to the
/// login server.
#[utoipa::path(
    get,
    path = "/auth",
    tag = FLOW_TAG,
    responses(
        (status = 302, description = "Redirect to the login server's authorization page")
    )
)]
pub(super) async fn login_handler(State(state): State<AppState>) -> Response {
    let mut flow = AuthorizationFlow::new(
        state.tokens.clone(),
        state.verifier.clone(),
        state.flow_params(),
    );
    let target = flow.begin_authorization();
    // 302 rather than axum's Redirect (which issues a 303)
    (
        StatusCode::FOUND,
        [(LOCATION, target.url.to_string())],
    )
        .into_response()
}
