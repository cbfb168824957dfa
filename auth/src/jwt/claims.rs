use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Bearer token payload.
///
/// `sub` carries the username; `exp` and `iat` are Unix timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Create claims for `subject` expiring `ttl` from now.
    ///
    /// `None` when the expiry falls outside the representable time range.
    pub fn for_subject(subject: impl ToString, ttl: Duration) -> Option<Self> {
        let now = Utc::now();
        let expiry = now.checked_add_signed(ttl)?;

        Some(Self {
            sub: subject.to_string(),
            exp: expiry.timestamp(),
            iat: now.timestamp(),
        })
    }

    /// Seconds between issuance and expiry.
    pub fn lifetime_seconds(&self) -> i64 {
        self.exp - self.iat
    }

    /// Check if the token is past its expiry at `current_timestamp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp > self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_subject() {
        let claims = Claims::for_subject("alice", Duration::minutes(30)).unwrap();

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.lifetime_seconds(), 30 * 60);
    }

    #[test]
    fn test_for_subject_out_of_range() {
        assert!(Claims::for_subject("alice", Duration::days(365 * 1_000_000)).is_none());
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims {
            sub: "alice".to_string(),
            exp: 1000,
            iat: 900,
        };

        assert!(!claims.is_expired(999));
        assert!(!claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001));
    }
}
