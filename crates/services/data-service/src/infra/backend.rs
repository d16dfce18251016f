//! Where the serialized document lives.

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use common::{AppError, AppResult};

/// Raw byte storage for the document.
///
/// Backends move serialized JSON only. Locking is the store's job.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Whether a document has been written yet
    async fn exists(&self) -> AppResult<bool>;

    /// Read the full serialized document
    async fn read(&self) -> AppResult<Vec<u8>>;

    /// Replace the serialized document
    async fn write(&self, payload: Vec<u8>) -> AppResult<()>;
}

/// JSON file on local disk.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DocumentBackend for JsonFileBackend {
    async fn exists(&self) -> AppResult<bool> {
        Ok(tokio::fs::try_exists(&self.path).await?)
    }

    async fn read(&self) -> AppResult<Vec<u8>> {
        tokio::fs::read(&self.path).await.map_err(|error| {
            AppError::storage(format!("failed to read {}: {}", self.path.display(), error))
        })
    }

    async fn write(&self, payload: Vec<u8>) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|error| {
                AppError::storage(format!("failed to prepare store directory: {}", error))
            })?;
        }

        // Readers must never see a half-written file
        let temp_path = self
            .path
            .with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
        tokio::fs::write(&temp_path, payload).await.map_err(|error| {
            AppError::storage(format!("failed to write store payload: {}", error))
        })?;

        if let Err(error) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(AppError::storage(format!(
                "failed to finalize store payload: {}",
                error
            )));
        }

        Ok(())
    }
}

/// In-memory backend for tests.
///
/// Keeps the serialized form so every load deserializes a fresh copy.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    payload: Mutex<Option<Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> AppResult<std::sync::MutexGuard<'_, Option<Vec<u8>>>> {
        self.payload
            .lock()
            .map_err(|_| AppError::storage("memory backend poisoned"))
    }
}

#[async_trait]
impl DocumentBackend for MemoryBackend {
    async fn exists(&self) -> AppResult<bool> {
        Ok(self.slot()?.is_some())
    }

    async fn read(&self) -> AppResult<Vec<u8>> {
        self.slot()?
            .clone()
            .ok_or_else(|| AppError::storage("document has not been initialized"))
    }

    async fn write(&self, payload: Vec<u8>) -> AppResult<()> {
        *self.slot()? = Some(payload);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend_round_trip() {
        let backend = MemoryBackend::new();
        assert!(!backend.exists().await.unwrap());
        assert!(matches!(backend.read().await, Err(AppError::Storage(_))));

        backend.write(b"{}".to_vec()).await.unwrap();
        assert!(backend.exists().await.unwrap());
        assert_eq!(backend.read().await.unwrap(), b"{}".to_vec());
    }

    #[tokio::test]
    async fn test_file_backend_replaces_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("nested").join("database.json"));

        backend.write(b"{\"a\":1111111111}".to_vec()).await.unwrap();
        backend.write(b"{}".to_vec()).await.unwrap();

        assert_eq!(backend.read().await.unwrap(), b"{}".to_vec());
        let leftovers = std::fs::read_dir(dir.path().join("nested")).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[tokio::test]
    async fn test_file_backend_missing_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("absent.json"));

        assert!(!backend.exists().await.unwrap());
        assert!(matches!(backend.read().await, Err(AppError::Storage(_))));
    }
}
