//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure:
//! - Password hashing (Argon2id, configurable work factor)
//! - Signed, time-limited bearer tokens (HMAC JWT)
//! - Authentication coordination
//!
//! Services define their own authentication ports and adapt these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use auth::TokenService;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let token = tokens.issue("alice", None).unwrap();
//! assert_eq!(tokens.verify(&token).unwrap(), "alice");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, PasswordHasher, TokenService};
//!
//! let auth = Authenticator::new(
//!     PasswordHasher::new(),
//!     TokenService::new(b"secret_key_at_least_32_bytes_long!").unwrap(),
//! );
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &hash, "alice").unwrap();
//!
//! // Later requests: validate token
//! let subject = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(subject, "alice");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::TokenError;
pub use jwt::TokenService;
pub use jwt::DEFAULT_TOKEN_TTL_MINUTES;
pub use password::PasswordError;
pub use password::PasswordHasher;
