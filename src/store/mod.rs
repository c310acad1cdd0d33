//! Record store collaborators / 记录存储
//!
//! The service only talks to `RecordStore`; backends decide whether a
//! scan filters in memory or pushes predicates into their query layer.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::StoreError;
use crate::models::{FilterSpec, Record};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert if no record with the same id exists. Atomic with respect to
    /// concurrent inserts; a duplicate yields `StoreError::Conflict`.
    async fn insert(&self, record: Record) -> StoreResult<()>;

    async fn get(&self, id: &str) -> StoreResult<Option<Record>>;

    /// Returns false when the id was unknown (or already deleted)
    async fn delete(&self, id: &str) -> StoreResult<bool>;

    /// All records matching `spec`, in insertion order
    async fn scan(&self, spec: &FilterSpec) -> StoreResult<Vec<Record>>;
}

pub type SharedStore = Arc<dyn RecordStore>;
