use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};

use super::{RecordStore, StoreResult};
use crate::error::StoreError;
use crate::filter;
use crate::models::{FilterSpec, Record};

/// Records keyed by insertion sequence, plus an id -> sequence index
#[derive(Default)]
struct Inner {
    next_seq: u64,
    by_seq: BTreeMap<u64, Record>,
    by_id: HashMap<String, u64>,
}

/// In-memory store, insertion ordered / 内存存储
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().by_id.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert(&self, record: Record) -> StoreResult<()> {
        let mut inner = self.inner.write();
        if inner.by_id.contains_key(&record.id) {
            return Err(StoreError::Conflict(record.id));
        }
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.by_id.insert(record.id.clone(), seq);
        inner.by_seq.insert(seq, record);
        Ok(())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Record>> {
        let inner = self.inner.read();
        Ok(inner
            .by_id
            .get(id)
            .and_then(|seq| inner.by_seq.get(seq))
            .cloned())
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut inner = self.inner.write();
        match inner.by_id.remove(id) {
            Some(seq) => {
                inner.by_seq.remove(&seq);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn scan(&self, spec: &FilterSpec) -> StoreResult<Vec<Record>> {
        let inner = self.inner.read();
        Ok(inner
            .by_seq
            .values()
            .filter(|r| filter::matches(spec, r))
            .cloned()
            .collect())
    }
}
