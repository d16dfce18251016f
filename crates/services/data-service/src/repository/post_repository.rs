//! Post repository implementation.

use std::sync::Arc;

use async_trait::async_trait;

use common::{AppError, AppResult, OptionExt};
use domain::{Post, PostId, UserId};

use crate::infra::RecordStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Post repository trait. Listings come back in ascending ID order.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Store an already filtered body
    async fn create(&self, body: String, author_id: UserId) -> AppResult<Post>;

    async fn list(&self) -> AppResult<Vec<Post>>;

    async fn get(&self, id: PostId) -> AppResult<Post>;

    async fn list_by_author(&self, author_id: UserId) -> AppResult<Vec<Post>>;

    /// `Forbidden` unless `requester` wrote the post
    async fn delete(&self, id: PostId, requester: UserId) -> AppResult<()>;
}

pub struct PostStore {
    store: Arc<RecordStore>,
}

impl PostStore {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PostRepository for PostStore {
    async fn create(&self, body: String, author_id: UserId) -> AppResult<Post> {
        self.store
            .mutate(move |doc| {
                let id = doc.allocate_post_id()?;
                let post = Post::new(id, body, author_id);
                doc.posts.insert(id, post.clone());
                Ok(post)
            })
            .await
    }

    async fn list(&self) -> AppResult<Vec<Post>> {
        // BTreeMap iteration is already ascending by ID
        self.store
            .read(|doc| Ok(doc.posts.values().cloned().collect()))
            .await
    }

    async fn get(&self, id: PostId) -> AppResult<Post> {
        self.store
            .read(|doc| doc.posts.get(&id).cloned().ok_or_not_found())
            .await
    }

    async fn list_by_author(&self, author_id: UserId) -> AppResult<Vec<Post>> {
        self.store
            .read(|doc| {
                Ok(doc
                    .posts
                    .values()
                    .filter(|post| post.is_authored_by(author_id))
                    .cloned()
                    .collect())
            })
            .await
    }

    async fn delete(&self, id: PostId, requester: UserId) -> AppResult<()> {
        self.store
            .mutate(|doc| {
                let post = doc.posts.get(&id).ok_or(AppError::NotFound)?;
                if !post.is_authored_by(requester) {
                    return Err(AppError::Forbidden);
                }
                doc.posts.remove(&id);
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repo() -> PostStore {
        PostStore::new(Arc::new(RecordStore::in_memory().await.unwrap()))
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = repo().await;
        let post = repo.create("hello".to_string(), 1).await.unwrap();

        assert_eq!(post.id, 1);
        assert_eq!(repo.get(1).await.unwrap(), post);
        assert!(matches!(repo.get(2).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_listings_sorted_by_id() {
        let repo = repo().await;
        for (body, author) in [("one", 1), ("two", 2), ("three", 1)] {
            repo.create(body.to_string(), author).await.unwrap();
        }

        let ids: Vec<_> = repo.list().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let mine: Vec<_> = repo
            .list_by_author(1)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.body)
            .collect();
        assert_eq!(mine, vec!["one", "three"]);
        assert!(repo.list_by_author(7).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_requires_author() {
        let repo = repo().await;
        let post = repo.create("mine".to_string(), 1).await.unwrap();

        assert!(matches!(
            repo.delete(post.id, 2).await,
            Err(AppError::Forbidden)
        ));
        assert!(repo.get(post.id).await.is_ok());

        repo.delete(post.id, 1).await.unwrap();
        assert!(matches!(repo.get(post.id).await, Err(AppError::NotFound)));
        assert!(matches!(
            repo.delete(post.id, 1).await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_deleted_ids_not_reused() {
        let repo = repo().await;
        repo.create("a".to_string(), 1).await.unwrap();
        let second = repo.create("b".to_string(), 1).await.unwrap();
        repo.delete(second.id, 1).await.unwrap();

        let third = repo.create("c".to_string(), 1).await.unwrap();
        assert_eq!(third.id, 3);
    }
}
