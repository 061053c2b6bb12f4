use crate::errors::ApiError;
use crate::openapi::FLOW_TAG;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, warn};
use serde::{Deserialize, Serialize};
use sso_client::{AuthorizationFlow, AuthorizationOutcome, FlowError, IdentityClaims};
use utoipa::ToSchema;

#[derive(Debug, Deserialize)]
pub(super) struct CallbackParams {
    code: String,
    /// Echoed anti-replay value; received but not compared (the relay keeps
    /// no session state to compare against)
    #[serde(default)]
    #[allow(dead_code)]
    state: Option<String>,
}

/// The issued token pair
#[derive(Debug, Serialize, ToSchema)]
pub(super) struct TokenPair {
    access: String,
    refresh: String,
}

/// Identity summary extracted from the verified token
#[derive(Debug, Serialize, ToSchema)]
pub(super) struct CharacterSummary {
    name: String,
    owner: String,
    #[serde(rename = "characterId")]
    character_id: u64,
}

/// Successful callback payload, response field names kept as callers of the
/// original relay expect them (including the lowercase `revokeurl`)
#[derive(Debug, Serialize, ToSchema)]
pub(super) struct CallbackResponse {
    token: TokenPair,
    #[serde(rename = "jwtResult")]
    #[schema(value_type = Object)]
    jwt_result: IdentityClaims,
    character: CharacterSummary,
    #[serde(rename = "refreshUrl")]
    refresh_url: String,
    revokeurl: String,
}

impl CallbackResponse {
    fn from_outcome(outcome: AuthorizationOutcome, public_url: &str) -> Result<Self, FlowError> {
        let character_id = outcome.claims.character_id().map_err(FlowError::Verify)?;
        let base = public_url.trim_end_matches('/');
        Ok(Self {
            token: TokenPair {
                access: outcome.tokens.access_token.clone(),
                refresh: outcome.tokens.refresh_token.clone(),
            },
            character: CharacterSummary {
                name: outcome.claims.name.clone(),
                owner: outcome.claims.owner.clone(),
                character_id,
            },
            refresh_url: format!(
                "{base}/api/auth/refresh?refresh_token={}",
                outcome.tokens.refresh_token
            ),
            revokeurl: format!(
                "{base}/api/auth/revoke?refresh_token={}",
                outcome.tokens.refresh_token
            ),
            jwt_result: outcome.claims,
        })
    }
}

/// Callback target of the login server's redirect: exchanges the code and
/// verifies the identity token behind the issued access token.
#[utoipa::path(
    get,
    path = "/api/auth/callback/{provider}",
    tag = FLOW_TAG,
    params(
        ("provider" = String, Path, description = "Provider name, informational"),
        ("code" = String, Query, description = "Authorization code from the login server"),
        ("state" = Option<String>, Query, description = "Echoed anti-replay value")
    ),
    responses(
        (status = 200, description = "Authorized", body = CallbackResponse),
        (status = 401, description = "Identity token failed verification"),
        (status = 502, description = "Login server rejected the code or was unreachable")
    )
)]
pub(super) async fn callback_handler(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(params): Query<CallbackParams>,
) -> Response {
    let mut flow = AuthorizationFlow::new(
        state.tokens.clone(),
        state.verifier.clone(),
        state.flow_params(),
    );

    let outcome = flow
        .handle_callback(&params.code)
        .await
        .and_then(|outcome| CallbackResponse::from_outcome(outcome, &state.config.public_url));

    match outcome {
        Ok(response) => Json(response).into_response(),
        Err(err) => {
            // The raw provider body goes to the operator log only; the
            // caller gets a generic failure
            if let Some(body) = err.provider_body() {
                error!("Login server rejected callback for provider {provider:?}: {body}");
            } else {
                error!("Authorization callback for provider {provider:?} failed: {err}");
            }
            match err {
                FlowError::Verify(e) => {
                    warn!("Identity token verification failed: {e}");
                    ApiError::unauthorized("Identity token verification failed").into_response()
                }
                FlowError::Token(_) => {
                    ApiError::bad_gateway("Authorization failed").into_response()
                }
            }
        }
    }
}
