//! Per-loader record cache with in-flight deduplication.
//!
//! Each loader owns one [`ContentCache`]. Entries are never invalidated:
//! content is immutable for the life of a session. The cell for a key is
//! created before the fetch starts, so a second request for the same key
//! waits on the first fetch instead of issuing its own.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OnceCell;

use crate::error::LoadResult;

/// Identity of a hydrated record within one loader.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub module: String,
    pub id: String,
    /// Canonical JSON of the caller parameters, empty when none.
    pub params: String,
}

impl CacheKey {
    pub fn new(module: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            id: id.into(),
            params: String::new(),
        }
    }

    pub fn with_params(mut self, params: impl Into<String>) -> Self {
        self.params = params.into();
        self
    }
}

type Slot<T> = Arc<OnceCell<Arc<T>>>;

pub struct ContentCache<T> {
    kind: &'static str,
    entries: Mutex<HashMap<CacheKey, Slot<T>>>,
}

impl<T> ContentCache<T> {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn slot(&self, key: &CacheKey) -> Slot<T> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(entries.entry(key.clone()).or_default())
    }

    /// Returns the cached record for `key`, running `load` at most once per
    /// key across concurrent callers. A failed load leaves the key empty.
    pub async fn get_or_load<F, Fut>(&self, key: CacheKey, load: F) -> LoadResult<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = LoadResult<T>>,
    {
        let slot = self.slot(&key);
        if let Some(value) = slot.get() {
            tracing::debug!(kind = self.kind, module = %key.module, id = %key.id, "cache hit");
            return Ok(Arc::clone(value));
        }

        let value = slot
            .get_or_try_init(|| async {
                tracing::debug!(kind = self.kind, module = %key.module, id = %key.id, "fetching");
                load().await.map(Arc::new)
            })
            .await?;
        Ok(Arc::clone(value))
    }

    /// Stores an already-built record, replacing any previous entry.
    pub fn prime(&self, key: CacheKey, value: T) -> Arc<T> {
        let value = Arc::new(value);
        let slot = Arc::new(OnceCell::new_with(Some(Arc::clone(&value))));
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, slot);
        value
    }

    /// Returns a record only if it has finished loading.
    pub fn peek(&self, key: &CacheKey) -> Option<Arc<T>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).and_then(|slot| slot.get().cloned())
    }

    /// Number of loaded records.
    pub fn len(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.values().filter(|slot| slot.initialized()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
