//! Post service - filtering, listing and ownership checks for posts.

use async_trait::async_trait;
use std::sync::Arc;

use common::AppResult;
use domain::{clean_body, Post, PostId, SortOrder, UserId};

use crate::repository::PostRepository;

#[async_trait]
pub trait PostService: Send + Sync {
    /// Filter `raw_body`, enforce the length limit and store the post
    async fn create_post(&self, author_id: UserId, raw_body: &str) -> AppResult<Post>;

    async fn get_post(&self, id: PostId) -> AppResult<Post>;

    /// All posts, or one author's, in the requested ID order
    async fn list_posts(&self, author_id: Option<UserId>, order: SortOrder)
        -> AppResult<Vec<Post>>;

    async fn delete_post(&self, id: PostId, requester: UserId) -> AppResult<()>;
}

pub struct PostManager {
    repo: Arc<dyn PostRepository>,
}

impl PostManager {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl PostService for PostManager {
    async fn create_post(&self, author_id: UserId, raw_body: &str) -> AppResult<Post> {
        let body = clean_body(raw_body)?;
        let post = self.repo.create(body, author_id).await?;
        tracing::debug!(post_id = post.id, author_id, "Post created");
        Ok(post)
    }

    async fn get_post(&self, id: PostId) -> AppResult<Post> {
        self.repo.get(id).await
    }

    async fn list_posts(
        &self,
        author_id: Option<UserId>,
        order: SortOrder,
    ) -> AppResult<Vec<Post>> {
        let mut posts = match author_id {
            Some(author_id) => self.repo.list_by_author(author_id).await?,
            None => self.repo.list().await?,
        };
        order.apply(&mut posts);
        Ok(posts)
    }

    async fn delete_post(&self, id: PostId, requester: UserId) -> AppResult<()> {
        self.repo.delete(id, requester).await
    }
}

#[cfg(test)]
mod tests {
    use common::AppError;
    use mockall::predicate::eq;

    use super::*;
    use crate::repository::MockPostRepository;

    fn posts(ids: &[PostId]) -> Vec<Post> {
        ids.iter()
            .map(|&id| Post::new(id, format!("post {}", id), 1))
            .collect()
    }

    #[tokio::test]
    async fn test_create_post_filters_body() {
        let mut repo = MockPostRepository::new();
        repo.expect_create()
            .withf(|body, author| body == "what a ****" && *author == 4)
            .times(1)
            .returning(|body, author| Ok(Post::new(1, body, author)));

        let service = PostManager::new(Arc::new(repo));
        let post = service.create_post(4, "what a kerfuffle").await.unwrap();

        assert_eq!(post.body, "what a ****");
    }

    #[tokio::test]
    async fn test_create_post_too_long_never_reaches_repo() {
        let mut repo = MockPostRepository::new();
        repo.expect_create().never();

        let service = PostManager::new(Arc::new(repo));
        let result = service.create_post(1, &"a".repeat(141)).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_posts_descending() {
        let mut repo = MockPostRepository::new();
        repo.expect_list().returning(|| Ok(posts(&[1, 2, 3])));

        let service = PostManager::new(Arc::new(repo));
        let ids: Vec<_> = service
            .list_posts(None, SortOrder::Desc)
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();

        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_list_posts_by_author() {
        let mut repo = MockPostRepository::new();
        repo.expect_list().never();
        repo.expect_list_by_author()
            .with(eq(1))
            .returning(|_| Ok(posts(&[2, 5])));

        let service = PostManager::new(Arc::new(repo));
        let listed = service.list_posts(Some(1), SortOrder::Asc).await.unwrap();

        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_post_forbidden_passes_through() {
        let mut repo = MockPostRepository::new();
        repo.expect_delete()
            .with(eq(1), eq(2))
            .returning(|_, _| Err(AppError::Forbidden));

        let service = PostManager::new(Arc::new(repo));
        assert!(matches!(
            service.delete_post(1, 2).await,
            Err(AppError::Forbidden)
        ));
    }
}
