use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Argon2id with a fresh random salt per hash. The work factor (memory cost,
/// iteration count, parallelism) is fixed at construction and written into every
/// PHC string produced, so hashes made under an older work factor still verify.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a hasher with the argon2 crate's recommended defaults.
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Create a hasher with an explicit work factor.
    ///
    /// # Arguments
    /// * `memory_kib` - Memory cost in KiB (at least 8 per lane)
    /// * `iterations` - Number of passes over memory
    /// * `parallelism` - Number of lanes
    ///
    /// # Errors
    /// * `InvalidWorkFactor` - Parameters are outside the ranges Argon2 accepts
    pub fn with_work_factor(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| PasswordError::InvalidWorkFactor(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext password.
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored PHC hash.
    ///
    /// The salt and parameters are read from `hash`; the final digest comparison
    /// is constant-time. A hash that cannot be parsed never matches.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed_hash) => self
                .argon2
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// Do the work of one `verify` for a user that has no stored hash.
    ///
    /// Always `false`. Costs one Argon2 run under this hasher's work factor, the
    /// same as verifying against a hash this hasher produced.
    pub fn verify_missing(&self, password: &str) -> bool {
        let _ = self.hash(password);
        false
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::with_work_factor(8, 1, 1).expect("Failed to build hasher")
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "correct-horse";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("battery-staple", &hash));
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hasher = fast_hasher();
        let hash = hasher.hash("correct-horse").expect("Failed to hash password");

        assert_ne!(hash, "correct-horse");
        assert!(!hash.contains("correct-horse"));
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_fresh_salt_per_hash() {
        let hasher = fast_hasher();

        let first = hasher.hash("correct-horse").expect("Failed to hash password");
        let second = hasher.hash("correct-horse").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify("correct-horse", &first));
        assert!(hasher.verify("correct-horse", &second));
    }

    #[test]
    fn test_verify_malformed_hash_is_false() {
        let hasher = PasswordHasher::new();

        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", ""));
        assert!(!hasher.verify("password", "$argon2id$v=19$m=8,t=1,p=1$broken"));
    }

    #[test]
    fn test_verify_missing_never_matches() {
        let hasher = fast_hasher();

        assert!(!hasher.verify_missing("correct-horse"));
        assert!(!hasher.verify_missing(""));
    }

    #[test]
    fn test_work_factor_is_embedded_in_hash() {
        let hasher = PasswordHasher::with_work_factor(16, 2, 1).expect("Failed to build hasher");
        let hash = hasher.hash("pass_word!").expect("Failed to hash password");

        assert!(hash.contains("m=16,t=2,p=1"));

        // A hasher with different parameters reads them back from the hash
        assert!(PasswordHasher::new().verify("pass_word!", &hash));
    }

    #[test]
    fn test_invalid_work_factor() {
        let result = PasswordHasher::with_work_factor(1, 0, 1);
        assert!(matches!(result, Err(PasswordError::InvalidWorkFactor(_))));
    }
}
