use std::str::FromStr;

use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Token lifetime used when `issue` is not given one.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Issues and verifies signed, time-limited bearer tokens.
///
/// The signing secret is fixed for the lifetime of the service. Replacing it
/// (by building a new service) invalidates every token issued under the old one;
/// there is no grace period and no revocation list.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
    default_ttl: Duration,
}

impl TokenService {
    /// Create a token service signing with HS256.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        Self::with_algorithm(secret, Algorithm::HS256)
    }

    /// Create a token service for a specific HMAC algorithm.
    ///
    /// # Errors
    /// * `EmptySecret` - `secret` is empty
    /// * `UnsupportedAlgorithm` - `algorithm` is not HS256, HS384 or HS512
    pub fn with_algorithm(secret: &[u8], algorithm: Algorithm) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }

        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(TokenError::UnsupportedAlgorithm(format!("{:?}", algorithm)));
        }

        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            validation,
            default_ttl: Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES),
        })
    }

    /// Create a token service from configuration values.
    ///
    /// # Arguments
    /// * `secret` - Signing secret
    /// * `algorithm` - Algorithm identifier such as `"HS256"`
    pub fn from_config(secret: &str, algorithm: &str) -> Result<Self, TokenError> {
        let algorithm = Algorithm::from_str(algorithm)
            .map_err(|_| TokenError::UnsupportedAlgorithm(algorithm.to_string()))?;

        Self::with_algorithm(secret.as_bytes(), algorithm)
    }

    /// Override the lifetime used when `issue` is called without a ttl.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Issue a token for `subject`.
    ///
    /// # Arguments
    /// * `subject` - Identity embedded as `sub`
    /// * `ttl` - Lifetime; `None` uses the default ttl
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiry out of range, or token encoding failed
    pub fn issue(&self, subject: &str, ttl: Option<Duration>) -> Result<String, TokenError> {
        let claims = Claims::for_subject(subject, ttl.unwrap_or(self.default_ttl))
            .ok_or_else(|| TokenError::EncodingFailed("ttl out of range".to_string()))?;
        self.encode(&claims)
    }

    /// Sign arbitrary claims.
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its subject.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature or algorithm does not match this service
    /// * `Expired` - Current time is past `exp`
    /// * `Malformed` - Token cannot be parsed or lacks `sub`/`exp`
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        self.decode(token).map(|claims| claims.sub)
    }

    /// Verify a token and return its full claims.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(TokenError::from)
    }
}
