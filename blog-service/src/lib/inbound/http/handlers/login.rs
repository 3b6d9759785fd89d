use auth::AuthError;
use axum::extract::State;
use axum::Form;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::inbound::http::router::AppState;

/// Exchange an email and password for a bearer token.
///
/// The response body is the bare OAuth2 token response, not the usual
/// envelope. Unknown email and wrong password are indistinguishable.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let identity = state
        .authenticator
        .authenticate(&form.username, &form.password)
        .await
        .map_err(|e| {
            tracing::warn!(kind = e.kind(), "Login failed");
            match e {
                AuthError::InvalidCredentials => {
                    ApiError::Unauthorized("Incorrect username or password".to_string())
                }
                AuthError::PasswordTooLong { .. } => ApiError::BadRequest(e.to_string()),
                _ => ApiError::InternalServerError(e.to_string()),
            }
        })?;

    let access_token = state
        .token_issuer
        .issue(&identity, state.token_ttl)
        .map_err(|e| ApiError::InternalServerError(e.to_string()))?;

    tracing::info!(user_id = %identity.id, "Token issued");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        expires_in: state.token_ttl.num_seconds(),
    }))
}

/// OAuth2 password-grant form; `username` carries the email address.
#[derive(Clone, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}
