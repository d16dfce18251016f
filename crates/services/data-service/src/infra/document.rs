//! The persisted aggregate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use common::{AppError, AppResult};
use domain::{Post, PostId, RefreshToken, User, UserId};

/// Everything the service persists, serialized as one JSON object.
///
/// Integer map keys are written as strings by serde_json and read back as
/// integers. Missing mappings and counters load as their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub users: BTreeMap<UserId, User>,
    #[serde(default)]
    pub posts: BTreeMap<PostId, Post>,
    #[serde(default)]
    pub refresh_tokens: BTreeMap<String, RefreshToken>,
    #[serde(default)]
    pub next_user_id: i64,
    #[serde(default)]
    pub next_post_id: i64,
}

impl Document {
    /// Hand out the next user ID.
    ///
    /// Never below one past the highest existing key, so documents written
    /// without counters keep working.
    ///
    /// # Errors
    /// `Storage` once the ID space is used up.
    pub fn allocate_user_id(&mut self) -> AppResult<UserId> {
        let (id, next) = next_id(self.next_user_id, self.users.keys().copied())?;
        self.next_user_id = next;
        Ok(id)
    }

    /// Hand out the next post ID.
    pub fn allocate_post_id(&mut self) -> AppResult<PostId> {
        let (id, next) = next_id(self.next_post_id, self.posts.keys().copied())?;
        self.next_post_id = next;
        Ok(id)
    }

    /// Find a user by email, ignoring case and surrounding whitespace.
    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.values().find(|user| user.has_email(email))
    }

    /// Whether a user other than `except` already owns `email`.
    pub fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|user| Some(user.id) != except && user.has_email(email))
    }
}

/// The ID to hand out and the counter value after it.
fn next_id(counter: i64, existing: impl Iterator<Item = i64>) -> AppResult<(i64, i64)> {
    let exhausted = || AppError::storage("id space exhausted");

    let floor = existing.max().unwrap_or(0).checked_add(1).ok_or_else(exhausted)?;
    let id = counter.max(floor);
    let next = id.checked_add(1).ok_or_else(exhausted)?;
    Ok((id, next))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: UserId, email: &str) -> User {
        User::new(id, email.to_string(), "hash".to_string())
    }

    #[test]
    fn test_ids_start_at_one() {
        let mut doc = Document::default();
        assert_eq!(doc.allocate_user_id().unwrap(), 1);
        assert_eq!(doc.allocate_user_id().unwrap(), 2);
        assert_eq!(doc.allocate_post_id().unwrap(), 1);
        assert_eq!(doc.next_user_id, 3);
    }

    #[test]
    fn test_ids_not_reused_after_removal() {
        let mut doc = Document::default();
        for _ in 0..3 {
            let id = doc.allocate_post_id().unwrap();
            doc.posts.insert(id, Post::new(id, "x".to_string(), 1));
        }
        doc.posts.remove(&3);
        doc.posts.remove(&2);

        assert_eq!(doc.allocate_post_id().unwrap(), 4);
    }

    #[test]
    fn test_legacy_document_without_counters() {
        let raw = r#"{"users":{"7":{"id":7,"email":"a@x.com","password_hash":"h"}},"posts":{}}"#;
        let mut doc: Document = serde_json::from_str(raw).unwrap();

        assert!(doc.refresh_tokens.is_empty());
        assert!(!doc.users[&7].is_chirpy_red);
        assert_eq!(doc.allocate_user_id().unwrap(), 8);
    }

    #[test]
    fn test_exhausted_id_space_is_storage_error() {
        let raw = format!(
            r#"{{"posts":{{"{max}":{{"id":{max},"body":"last","author_id":1}}}}}}"#,
            max = i64::MAX
        );
        let mut doc: Document = serde_json::from_str(&raw).unwrap();

        assert!(matches!(doc.allocate_post_id(), Err(AppError::Storage(_))));
        assert_eq!(doc.next_post_id, 0);

        doc.next_user_id = i64::MAX;
        assert!(matches!(doc.allocate_user_id(), Err(AppError::Storage(_))));
        assert_eq!(doc.next_user_id, i64::MAX);
    }

    #[test]
    fn test_integer_keys_serialize_as_strings() {
        let mut doc = Document::default();
        doc.users.insert(1, user(1, "a@x.com"));

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["users"]["1"]["email"], "a@x.com");
    }

    #[test]
    fn test_email_lookup_is_normalised() {
        let mut doc = Document::default();
        doc.users.insert(1, user(1, "A@x.com"));
        doc.users.insert(2, user(2, "b@x.com"));

        assert_eq!(doc.user_by_email("  a@X.COM ").map(|u| u.id), Some(1));
        assert!(doc.email_taken("B@x.com", Some(1)));
        assert!(!doc.email_taken("b@x.com", Some(2)));
    }
}
