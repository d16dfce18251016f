//! Post entity, body rules and the fixed-wordlist content filter.

use serde::{Deserialize, Serialize};

use crate::constants::{CENSORED_WORDS, CENSOR_MASK, MAX_POST_LENGTH};
use crate::error::{DomainError, DomainResult};
use crate::user::UserId;

/// Post identifier, allocated by the store and never reused
pub type PostId = i64;

/// A published post ("chirp")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Post {
    pub id: PostId,
    pub body: String,
    pub author_id: UserId,
}

impl Post {
    pub fn new(id: PostId, body: String, author_id: UserId) -> Self {
        Self {
            id,
            body,
            author_id,
        }
    }

    /// Whether `user_id` wrote this post
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }
}

/// Ordering applied to post listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Sort posts by ID in this direction
    pub fn apply(self, posts: &mut [Post]) {
        match self {
            SortOrder::Asc => posts.sort_by_key(|p| p.id),
            SortOrder::Desc => posts.sort_by_key(|p| std::cmp::Reverse(p.id)),
        }
    }
}

/// Mask censored words in a post body.
///
/// The body is split on single spaces and a word is masked only when it is
/// exactly a listed word ignoring case, so `fornax!` passes through.
pub fn censor(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            let lowered = word.to_lowercase();
            if CENSORED_WORDS.contains(&lowered.as_str()) {
                CENSOR_MASK
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Filter a raw body and enforce the length limit on the result.
pub fn clean_body(raw: &str) -> DomainResult<String> {
    let cleaned = censor(raw);
    if cleaned.chars().count() > MAX_POST_LENGTH {
        return Err(DomainError::validation(format!(
            "Chirp is too long (max {} characters)",
            MAX_POST_LENGTH
        )));
    }
    Ok(cleaned)
}
