//! Common test utilities for shared-crate integration tests
//!
//! - File-backed storage in a temp directory
//! - Route locations from the default route table

use std::sync::Arc;

use adminboard_shared::navigation::{RouteLocation, RouteTable};
use adminboard_shared::storage::{FileStore, KeyValueStore};
use tempfile::TempDir;

/// Temp directory plus a file store rooted in it
///
/// The directory lives as long as the context.
pub struct StorageContext {
    pub dir: TempDir,
    pub storage: Arc<dyn KeyValueStore>,
}

impl StorageContext {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(dir.path()).unwrap());
        Self { dir, storage }
    }

    /// A fresh store over the same directory, as after a restart
    pub fn reopen(&self) -> Arc<dyn KeyValueStore> {
        Arc::new(FileStore::open(self.dir.path()).unwrap())
    }
}

/// Resolves `path` against the default route table
pub fn location(path: &str) -> RouteLocation {
    RouteTable::default_routes().resolve(path).unwrap()
}
