use utoipa::OpenApi;

pub(crate) const FLOW_TAG: &str = "Authorization Flow API";
pub(crate) const TOKEN_TAG: &str = "Token API";

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = FLOW_TAG, description = "Login redirect and callback endpoints"),
        (name = TOKEN_TAG, description = "Token refresh and revocation endpoints"),
    ),
    info(
        title = "EVE SSO Relay API",
        description = "OAuth2 Authorization Code relay for EVE Online SSO",
        version = "0.1.0"
    )
)]
pub(crate) struct ApiDoc;
