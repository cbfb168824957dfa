use crate::domain::user::models::User;
use crate::domain::user::models::Username;

/// Token type reported to clients alongside every access token.
pub const BEARER_TOKEN_TYPE: &str = "bearer";

/// Identity of the caller for the lifetime of one request.
///
/// Only the auth gateway can build one, and only after the token verified and
/// its subject resolved against the directory. Holds the freshly fetched record.
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity {
    user: User,
}

impl AuthenticatedIdentity {
    pub(crate) fn resolved(user: User) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn username(&self) -> &Username {
        &self.user.username
    }
}

/// Token handed out by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub access_token: String,
    pub expires_in: i64,
}

impl AccessToken {
    pub fn token_type(&self) -> &'static str {
        BEARER_TOKEN_TYPE
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
///
/// The scheme is matched case-insensitively. Returns `None` for any other
/// scheme or an empty token.
pub fn bearer_token(authorization: &str) -> Option<&str> {
    let (scheme, token) = authorization.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
