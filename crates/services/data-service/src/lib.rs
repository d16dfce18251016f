//! Data Service Library
//!
//! Owns the persisted document: the record store, the user/post/refresh-token
//! repositories built on it, and the user and post services.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use common::AppResult;
use tracing::info;

use crate::config::DataServiceConfig;
use crate::infra::RecordStore;
use crate::repository::{PostStore, RefreshTokenStore, UserStore};
use crate::service::{PostManager, UserManager};

/// Open the file-backed store from `config`, creating it when missing.
pub async fn open_store(config: &DataServiceConfig) -> AppResult<Arc<RecordStore>> {
    let store = RecordStore::file(&config.database_path);
    if store.ensure_initialized().await? {
        info!(path = %config.database_path.display(), "Initialized new database");
    } else {
        info!(path = %config.database_path.display(), "Using existing database");
    }
    Ok(Arc::new(store))
}

/// Repositories and services sharing one store.
#[derive(Clone)]
pub struct DataServices {
    pub store: Arc<RecordStore>,
    pub users: Arc<UserStore>,
    pub posts: Arc<PostStore>,
    pub refresh_tokens: Arc<RefreshTokenStore>,
    pub user_service: Arc<UserManager>,
    pub post_service: Arc<PostManager>,
}

impl DataServices {
    /// Wire everything over `store`, issuing refresh tokens for `refresh_ttl`.
    pub fn new(store: Arc<RecordStore>, refresh_ttl: chrono::Duration) -> Self {
        let users = Arc::new(UserStore::new(store.clone()));
        let posts = Arc::new(PostStore::new(store.clone()));
        let refresh_tokens = Arc::new(RefreshTokenStore::new(store.clone()).with_ttl(refresh_ttl));

        Self {
            user_service: Arc::new(UserManager::new(users.clone())),
            post_service: Arc::new(PostManager::new(posts.clone())),
            store,
            users,
            posts,
            refresh_tokens,
        }
    }
}
