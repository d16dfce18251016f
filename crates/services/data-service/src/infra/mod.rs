//! Infrastructure layer - the persisted document and its storage.

mod backend;
mod document;
mod store;

pub use backend::{DocumentBackend, JsonFileBackend, MemoryBackend};
pub use document::Document;
pub use store::RecordStore;
