//! Persisted client storage
//!
//! The console keeps two pieces of state across sessions: the bearer token
//! and the tab-navigation blob. Both live behind the [`KeyValueStore`] trait
//! so the same code runs against a directory on disk or an in-memory map.
//!
//! # Keys
//!
//! - [`TOKEN_KEY`]: bearer token string
//! - [`TAB_STATE_KEY`]: JSON `{"tabsList": [...], "activeTab": "..."}`
//!
//! # Example
//!
//! ```
//! use adminboard_shared::storage::{KeyValueStore, MemoryStore};
//!
//! # fn example() -> Result<(), adminboard_shared::storage::StorageError> {
//! let store = MemoryStore::new();
//! store.set("token", "abc")?;
//! assert_eq!(store.get("token")?.as_deref(), Some("abc"));
//! # Ok(())
//! # }
//! ```

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Storage key of the bearer token
pub const TOKEN_KEY: &str = "token";

/// Storage key of the persisted tab-navigation state
pub const TAB_STATE_KEY: &str = "tab-navigation-state";

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// Underlying I/O failure
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key cannot be mapped to a storage slot
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Lock poisoned by a panicking writer
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Storage result type alias
pub type StorageResult<T> = Result<T, StorageError>;

/// String key/value storage that survives between sessions
///
/// Implementations must be safe to share between the HTTP client (which
/// clears the token on 401) and the router (which reads it on every
/// transition).
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` when absent
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key`; removing an absent key is not an error
    fn remove(&self, key: &str) -> StorageResult<()>;
}
