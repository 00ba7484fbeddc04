use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Lifetime of an issued session token.
pub const SESSION_LIFETIME_HOURS: i64 = 24;

/// Session token payload.
///
/// The issuer claim carries the identity of the session owner; `exp` is the
/// only invalidation mechanism since tokens are never revoked server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Issuer (the subject id the token was issued for)
    pub iss: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    /// Create session claims expiring [`SESSION_LIFETIME_HOURS`] from now.
    ///
    /// # Arguments
    /// * `subject_id` - Identity bound to the token
    ///
    /// # Returns
    /// Claims with iss, exp and iat set
    pub fn for_subject(subject_id: impl ToString) -> Self {
        Self::with_lifetime(subject_id, Duration::hours(SESSION_LIFETIME_HOURS))
    }

    /// Create claims with an explicit lifetime (may be negative).
    pub fn with_lifetime(subject_id: impl ToString, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            iss: subject_id.to_string(),
            exp: (now + lifetime).timestamp(),
            iat: Some(now.timestamp()),
        }
    }

    /// Check if the token is expired at the given time.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}
