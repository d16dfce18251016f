//! Record store: the single document behind one reader/writer lock.

use std::sync::Arc;

use tokio::sync::RwLock;

use common::AppResult;

use super::backend::{DocumentBackend, JsonFileBackend, MemoryBackend};
use super::document::Document;

/// Owns the persisted document.
///
/// Writers hold the lock exclusively across load, mutate and persist.
/// Readers share it. Every call reloads from the backend, so a failed
/// request leaves nothing stale behind for the next one.
pub struct RecordStore {
    backend: Arc<dyn DocumentBackend>,
    lock: RwLock<()>,
}

impl RecordStore {
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self {
            backend,
            lock: RwLock::new(()),
        }
    }

    /// Store backed by a JSON file at `path`.
    pub fn file(path: impl Into<std::path::PathBuf>) -> Self {
        Self::new(Arc::new(JsonFileBackend::new(path)))
    }

    /// Empty, initialized in-memory store.
    pub async fn in_memory() -> AppResult<Self> {
        let store = Self::new(Arc::new(MemoryBackend::new()));
        store.ensure_initialized().await?;
        Ok(store)
    }

    /// Write an empty document if none exists yet.
    ///
    /// Returns `true` when a new document was created.
    pub async fn ensure_initialized(&self) -> AppResult<bool> {
        let _guard = self.lock.write().await;
        if self.backend.exists().await? {
            return Ok(false);
        }

        self.persist_unlocked(&Document::default()).await?;
        tracing::info!("Created empty record store");
        Ok(true)
    }

    /// Read and deserialize the current document.
    pub async fn load(&self) -> AppResult<Document> {
        let _guard = self.lock.read().await;
        self.load_unlocked().await
    }

    /// Serialize and overwrite the whole document.
    pub async fn persist(&self, document: &Document) -> AppResult<()> {
        let _guard = self.lock.write().await;
        self.persist_unlocked(document).await
    }

    /// Run a read-only view over a freshly loaded document.
    pub async fn read<T, F>(&self, view: F) -> AppResult<T>
    where
        F: FnOnce(&Document) -> AppResult<T>,
    {
        let _guard = self.lock.read().await;
        let document = self.load_unlocked().await?;
        view(&document)
    }

    /// Load, apply `operation`, persist; all under the exclusive lock.
    ///
    /// Nothing is written when `operation` fails.
    pub async fn mutate<T, F>(&self, operation: F) -> AppResult<T>
    where
        F: FnOnce(&mut Document) -> AppResult<T>,
    {
        let _guard = self.lock.write().await;
        let mut document = self.load_unlocked().await?;
        let result = operation(&mut document)?;
        self.persist_unlocked(&document).await?;
        Ok(result)
    }

    async fn load_unlocked(&self) -> AppResult<Document> {
        let payload = self.backend.read().await?;
        Ok(serde_json::from_slice(&payload)?)
    }

    async fn persist_unlocked(&self, document: &Document) -> AppResult<()> {
        let payload = serde_json::to_vec(document)?;
        self.backend.write(payload).await
    }
}

#[cfg(test)]
mod tests {
    use common::AppError;
    use domain::Post;

    use super::*;

    #[tokio::test]
    async fn test_ensure_initialized_is_idempotent() {
        let store = RecordStore::new(Arc::new(MemoryBackend::new()));
        assert!(store.ensure_initialized().await.unwrap());
        assert!(!store.ensure_initialized().await.unwrap());
        assert_eq!(store.load().await.unwrap(), Document::default());
    }

    #[tokio::test]
    async fn test_load_before_init_fails() {
        let store = RecordStore::new(Arc::new(MemoryBackend::new()));
        assert!(matches!(store.load().await, Err(AppError::Storage(_))));
    }

    #[tokio::test]
    async fn test_failed_mutation_is_not_persisted() {
        let store = RecordStore::in_memory().await.unwrap();

        let result: AppResult<()> = store
            .mutate(|doc| {
                let id = doc.allocate_post_id()?;
                doc.posts.insert(id, Post::new(id, "draft".to_string(), 1));
                Err(AppError::Forbidden)
            })
            .await;

        assert!(matches!(result, Err(AppError::Forbidden)));
        let doc = store.load().await.unwrap();
        assert!(doc.posts.is_empty());
        assert_eq!(doc.next_post_id, 0);
    }

    #[tokio::test]
    async fn test_corrupt_document_is_storage_error() {
        let backend = Arc::new(MemoryBackend::new());
        backend.write(b"{\"users\": [".to_vec()).await.unwrap();
        let store = RecordStore::new(backend);

        assert!(matches!(store.load().await, Err(AppError::Storage(_))));
        assert!(matches!(
            store.read(|doc| Ok(doc.users.len())).await,
            Err(AppError::Storage(_))
        ));
    }

    #[tokio::test]
    async fn test_persist_overwrites() {
        let store = RecordStore::in_memory().await.unwrap();
        let mut doc = Document::default();
        doc.next_user_id = 42;

        store.persist(&doc).await.unwrap();
        assert_eq!(store.read(|d| Ok(d.next_user_id)).await.unwrap(), 42);
    }
}
