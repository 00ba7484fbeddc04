use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::UserIdError;

/// Role granted to self-registered accounts.
pub const CUSTOMER_ROLE_ID: RoleId = RoleId(2);

/// Account recorded as the creator of self-registered users.
pub const SYSTEM_USER_ID: UserId = UserId(1);

/// User record as held by storage.
///
/// `hashed_password` is always a PHC hash string, never the raw password, and
/// is never serialized outward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub hashed_password: String,
    pub role_id: RoleId,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_by: Option<UserId>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<UserId>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub u64);

impl UserId {
    /// Parse a user id from its decimal string form.
    ///
    /// This is the form carried in a session token's issuer claim.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not an unsigned decimal integer
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        s.parse()
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl FromStr for UserId {
    type Err = UserIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(format!("'{}': {}", s, e)))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Role identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoleId(pub u64);

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Fields of a user about to be created.
///
/// The password is already hashed; storage assigns the id and creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub hashed_password: String,
    pub role_id: RoleId,
    pub created_by: UserId,
}
