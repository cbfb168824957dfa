use axum::extract::State;
use axum::Form;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::domain::auth::models::AccessToken;
use crate::inbound::http::router::AppState;

/// OAuth2 password-grant token endpoint.
///
/// Responds with the bare token object rather than the usual envelope so that
/// standard OAuth2 clients can read it.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<LoginResponseData>, ApiError> {
    if let Some(grant_type) = form.grant_type.as_deref() {
        if grant_type != "password" {
            return Err(ApiError::BadRequest(format!(
                "Unsupported grant_type: {}",
                grant_type
            )));
        }
    }

    state
        .auth_gateway
        .login(&form.username, &form.password)
        .await
        .map_err(ApiError::from)
        .map(|ref token| Json(token.into()))
}

/// Form-encoded login body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
    #[serde(default)]
    grant_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl From<&AccessToken> for LoginResponseData {
    fn from(token: &AccessToken) -> Self {
        Self {
            access_token: token.access_token.clone(),
            token_type: token.token_type().to_string(),
            expires_in: token.expires_in,
        }
    }
}
