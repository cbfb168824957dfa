use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::TOKEN_REJECTED_MESSAGE;
use crate::inbound::http::router::AppState;

/// Middleware guarding protected routes.
///
/// Resolves the bearer token to an `AuthenticatedIdentity` and stores it in the
/// request extensions, where handlers pick it up with `Extension`.
pub async fn require_authenticated(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let authorization = match req.headers().get(AUTHORIZATION) {
        Some(value) => Some(
            value
                .to_str()
                .map(str::to_owned)
                .map_err(|_| {
                    tracing::warn!("Authorization header is not valid ASCII");
                    ApiError::Unauthorized(TOKEN_REJECTED_MESSAGE.to_string()).into_response()
                })?,
        ),
        None => None,
    };

    let identity = state
        .auth_gateway
        .require_authenticated(authorization.as_deref())
        .await
        .map_err(|e| ApiError::from(e).into_response())?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
