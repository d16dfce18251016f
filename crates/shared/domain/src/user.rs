//! User domain entity and related types.

use serde::{Deserialize, Serialize};

/// User identifier, allocated by the store and never reused
pub type UserId = i64;

/// User domain entity, exactly as persisted in the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub is_chirpy_red: bool,
}

impl User {
    /// Create a new user without a subscription
    pub fn new(id: UserId, email: String, password_hash: String) -> Self {
        Self {
            id,
            email,
            password_hash,
            is_chirpy_red: false,
        }
    }

    /// Whether this user's email matches `email` after normalisation
    pub fn has_email(&self, email: &str) -> bool {
        normalize_email(&self.email) == normalize_email(email)
    }

    /// Drop the password hash before handing the entity to a caller
    pub fn redacted(mut self) -> Self {
        self.password_hash.clear();
        self
    }
}

/// Canonical form used for email comparisons: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Unique user identifier
    pub id: UserId,
    /// User email address
    pub email: String,
    /// Chirpy Red subscription flag
    pub is_chirpy_red: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_chirpy_red: user.is_chirpy_red,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            is_chirpy_red: user.is_chirpy_red,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_comparison_ignores_case_and_whitespace() {
        let user = User::new(1, "A@X.com".to_string(), "hash".to_string());
        assert!(user.has_email("  a@x.COM "));
        assert!(!user.has_email("b@x.com"));
    }

    #[test]
    fn test_redacted_clears_hash() {
        let user = User::new(1, "a@x.com".to_string(), "hash".to_string()).redacted();
        assert!(user.password_hash.is_empty());
        assert_eq!(user.email, "a@x.com");
    }

    #[test]
    fn test_response_omits_hash() {
        let user = User::new(7, "a@x.com".to_string(), "secret-hash".to_string());
        let json = serde_json::to_string(&UserResponse::from(&user)).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("\"is_chirpy_red\":false"));
    }

    #[test]
    fn test_missing_subscription_flag_defaults_false() {
        let user: User =
            serde_json::from_str(r#"{"id":1,"email":"a@x.com","password_hash":"h"}"#).unwrap();
        assert!(!user.is_chirpy_red);
    }
}
