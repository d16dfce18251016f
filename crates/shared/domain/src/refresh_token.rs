//! Refresh token record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::UserId;

/// Long-lived opaque credential exchanged for new access tokens.
///
/// The record survives revocation; only `revoked_at` changes, and only once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    pub fn new(
        token: String,
        user_id: UserId,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token,
            user_id,
            created_at,
            expires_at,
            revoked_at: None,
        }
    }

    /// Expired once `now` reaches `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Usable for a refresh at `now`
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_revoked() && !self.is_expired_at(now)
    }

    /// Mark revoked. A second call keeps the original timestamp.
    pub fn revoke(&mut self, now: DateTime<Utc>) {
        if self.revoked_at.is_none() {
            self.revoked_at = Some(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn token_at(now: DateTime<Utc>) -> RefreshToken {
        RefreshToken::new("abc".to_string(), 1, now, now + Duration::hours(1))
    }

    #[test]
    fn test_expiry_is_strict() {
        let now = Utc::now();
        let token = token_at(now);

        assert!(token.is_active_at(now));
        assert!(token.is_active_at(token.expires_at - Duration::seconds(1)));
        assert!(token.is_expired_at(token.expires_at));
        assert!(!token.is_active_at(token.expires_at));
    }

    #[test]
    fn test_revoke_is_monotonic() {
        let now = Utc::now();
        let mut token = token_at(now);

        token.revoke(now);
        token.revoke(now + Duration::minutes(5));

        assert_eq!(token.revoked_at, Some(now));
        assert!(!token.is_active_at(now));
    }
}
