use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::bearer_token;
use crate::domain::auth::models::AccessToken;
use crate::domain::auth::models::AuthenticatedIdentity;
use crate::domain::auth::ports::AuthGatewayPort;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserDirectory;

/// Orchestrates login and request authentication against a user directory.
///
/// Login runs `Unauthenticated -> CredentialsChecked -> TokenIssued`; request
/// authentication runs `Unauthenticated -> TokenVerified -> IdentityResolved`.
/// Any failed step ends the attempt with an `AuthError`.
pub struct AuthGateway<UD>
where
    UD: UserDirectory,
{
    directory: Arc<UD>,
    authenticator: Arc<Authenticator>,
}

impl<UD> AuthGateway<UD>
where
    UD: UserDirectory,
{
    /// Create a new gateway with injected dependencies.
    ///
    /// # Arguments
    /// * `directory` - Source of user records
    /// * `authenticator` - Shared hasher and token service
    pub fn new(directory: Arc<UD>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            directory,
            authenticator,
        }
    }

    // Fail closed: a lookup that errors is never treated as "no user".
    async fn lookup(&self, username: &Username) -> Result<Option<User>, AuthError> {
        self.directory
            .find_by_username(username)
            .await
            .map_err(|e| AuthError::DirectoryUnavailable(e.to_string()))
    }
}

#[async_trait]
impl<UD> AuthGatewayPort for AuthGateway<UD>
where
    UD: UserDirectory,
{
    async fn login(&self, username: &str, password: &str) -> Result<AccessToken, AuthError> {
        // A name that fails validation cannot belong to anyone
        let user = match Username::new(username.to_string()) {
            Ok(username) => self.lookup(&username).await?,
            Err(_) => None,
        };

        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_string();
        let credentials = user
            .as_ref()
            .map(|user| (user.password_hash.clone(), user.username.to_string()));

        // Misses run Argon2 as well: login time must not depend on whether the name exists
        let result = tokio::task::spawn_blocking(move || match credentials {
            Some((stored_hash, subject)) => {
                authenticator.authenticate(&password, &stored_hash, &subject)
            }
            None => Err(authenticator.reject_unknown(&password)),
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Verification task failed: {}", e)))?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
            AuthenticationError::TokenError(err) => AuthError::from(err),
        })?;

        let user = user.ok_or(AuthError::InvalidCredentials)?;

        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            expires_in = result.expires_in,
            "Access token issued"
        );

        Ok(AccessToken {
            access_token: result.access_token,
            expires_in: result.expires_in,
        })
    }

    async fn resolve_identity(&self, token: &str) -> Result<AuthenticatedIdentity, AuthError> {
        let subject = self.authenticator.validate_token(token)?;
        tracing::debug!(subject = %subject, "Token verified");

        let username = Username::new(subject.clone())
            .map_err(|_| AuthError::UnknownSubject(subject.clone()))?;

        let user = self
            .lookup(&username)
            .await?
            .ok_or(AuthError::UnknownSubject(subject))?;

        tracing::debug!(user_id = %user.id, "Identity resolved");

        Ok(AuthenticatedIdentity::resolved(user))
    }

    async fn require_authenticated(
        &self,
        authorization: Option<&str>,
    ) -> Result<AuthenticatedIdentity, AuthError> {
        let token = authorization
            .and_then(bearer_token)
            .ok_or(AuthError::MissingToken)?;

        self.resolve_identity(token).await
    }
}
