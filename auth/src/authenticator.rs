use chrono::Duration;

use crate::jwt::TokenError;
use crate::jwt::TokenService;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds the process-wide signing key and hasher parameters. Every method takes
/// `&self`, so one instance can be shared behind an `Arc` by any number of
/// concurrent requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed bearer token
    pub access_token: String,

    /// Seconds until the token expires
    pub expires_in: i64,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `password_hasher` - Hasher used for registration and login
    /// * `token_service` - Signs and verifies bearer tokens
    pub fn new(password_hasher: PasswordHasher, token_service: TokenService) -> Self {
        Self {
            password_hasher,
            token_service,
        }
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a token for `subject` with the default ttl.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match, or the stored hash is unreadable
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.verify_password(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(subject, None)?)
    }

    /// Reject a login whose user does not exist.
    ///
    /// Runs the same hashing work as a failed `authenticate`, so the two cases
    /// take comparable time.
    pub fn reject_unknown(&self, password: &str) -> AuthenticationError {
        self.password_hasher.verify_missing(password);
        AuthenticationError::InvalidCredentials
    }

    /// Issue a token without password verification.
    ///
    /// # Arguments
    /// * `subject` - Identity embedded in the token
    /// * `ttl` - Lifetime; `None` uses the token service default
    pub fn issue_token(
        &self,
        subject: &str,
        ttl: Option<Duration>,
    ) -> Result<AuthenticationResult, TokenError> {
        let ttl = ttl.unwrap_or_else(|| self.token_service.default_ttl());
        let access_token = self.token_service.issue(subject, Some(ttl))?;

        Ok(AuthenticationResult {
            access_token,
            expires_in: ttl.num_seconds(),
        })
    }

    /// Validate a token and return its subject.
    pub fn validate_token(&self, token: &str) -> Result<String, TokenError> {
        self.token_service.verify(token)
    }
}
