use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AccessToken;
use crate::domain::auth::models::AuthenticatedIdentity;

/// Port for login and request authentication.
#[async_trait]
pub trait AuthGatewayPort: Send + Sync + 'static {
    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password (indistinguishable)
    /// * `DirectoryUnavailable` - The user lookup failed
    /// * `Internal` - Hashing task or token signing failed
    async fn login(&self, username: &str, password: &str) -> Result<AccessToken, AuthError>;

    /// Verify a bearer token and resolve its subject to a current user.
    ///
    /// # Errors
    /// * `Malformed`, `InvalidSignature`, `Expired` - Token verification failed
    /// * `UnknownSubject` - The user no longer exists
    /// * `DirectoryUnavailable` - The user lookup failed
    async fn resolve_identity(&self, token: &str) -> Result<AuthenticatedIdentity, AuthError>;

    /// Gate for protected operations.
    ///
    /// # Arguments
    /// * `authorization` - Raw `Authorization` header value, if the request had one
    ///
    /// # Errors
    /// * `MissingToken` - No bearer token was presented; no lookup is made
    /// * any error of `resolve_identity`
    async fn require_authenticated(
        &self,
        authorization: Option<&str>,
    ) -> Result<AuthenticatedIdentity, AuthError>;
}
