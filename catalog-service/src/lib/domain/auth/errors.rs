use auth::TokenError;
use thiserror::Error;

/// Reasons an authentication attempt ends in the rejected state.
///
/// The variants are diagnostic only. The HTTP boundary renders every variant
/// except the infrastructure ones as the same generic 401.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing or non-bearer Authorization header")]
    MissingToken,

    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Token subject does not resolve to a user: {0}")]
    UnknownSubject(String),

    #[error("User directory unavailable: {0}")]
    DirectoryUnavailable(String),

    #[error("Internal authentication error: {0}")]
    Internal(String),
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AuthError::Expired,
            TokenError::InvalidSignature => AuthError::InvalidSignature,
            TokenError::Malformed(reason) => AuthError::Malformed(reason),
            TokenError::EncodingFailed(_)
            | TokenError::UnsupportedAlgorithm(_)
            | TokenError::EmptySecret => AuthError::Internal(err.to_string()),
        }
    }
}
