use auth::Identity;
use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::credentials::user_id_of;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type holding the identity a request was authenticated as
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub identity: Identity,
}

/// Middleware that resolves the bearer token into a [`CurrentUser`].
///
/// Every failure, including a missing header, gets the same 401 response.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let Some(token) = extract_token_from_header(&req) else {
        tracing::warn!(kind = "missing_token", "Authentication failed");
        return Err(unauthorized());
    };

    let identity = state
        .identity_resolver
        .resolve(&token)
        .await
        .map_err(|e| {
            tracing::warn!(kind = e.kind(), "Authentication failed");
            unauthorized()
        })?;

    let user_id = user_id_of(&identity).ok_or_else(|| {
        tracing::warn!(kind = "token_invalid", "Authentication failed");
        unauthorized()
    })?;

    req.extensions_mut()
        .insert(CurrentUser { user_id, identity });

    Ok(next.run(req).await)
}

fn unauthorized() -> Response {
    ApiError::Unauthorized("Could not validate credentials".to_string()).into_response()
}

fn extract_token_from_header(req: &Request) -> Option<String> {
    let auth_str = req
        .headers()
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;

    let (scheme, token) = auth_str.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}
