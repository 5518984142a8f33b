//! Content stores: where raw records come from.
//!
//! Records are addressed by relative paths such as `dnd/item/weapon/dagger.json`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{LoadError, LoadResult};

/// String-keyed source of raw content.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Returns the raw text stored at `path`, or [`LoadError::ContentNotFound`].
    async fn read(&self, path: &str) -> LoadResult<String>;
}

/// Reads records from a directory tree.
#[derive(Clone, Debug)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ContentStore for DirectoryStore {
    async fn read(&self, path: &str) -> LoadResult<String> {
        let full = self.root.join(path);
        tokio::fs::read_to_string(&full)
            .await
            .map_err(|e| LoadError::ContentNotFound {
                path: path.to_string(),
                reason: format!("{}: {e}", full.display()),
            })
    }
}

/// In-memory store that counts reads; used by tests and embedded content.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: HashMap<String, String>,
    reads: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    pub fn with(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Number of `read` calls served so far, including misses.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn read(&self, path: &str) -> LoadResult<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        // Suspend like a real fetch so concurrent loads actually overlap.
        tokio::task::yield_now().await;
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| LoadError::ContentNotFound {
                path: path.to_string(),
                reason: "no such record".to_string(),
            })
    }
}
