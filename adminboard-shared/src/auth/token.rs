//! Bearer token persistence
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use adminboard_shared::auth::TokenStore;
//! use adminboard_shared::storage::MemoryStore;
//!
//! let tokens = TokenStore::new(Arc::new(MemoryStore::new()));
//! assert!(!tokens.is_authenticated());
//!
//! tokens.set_token("eyJhbGciOi...").unwrap();
//! assert!(tokens.is_authenticated());
//! assert_eq!(tokens.authorization_header().as_deref(), Some("Bearer eyJhbGciOi..."));
//! ```

use std::sync::Arc;

use crate::storage::{KeyValueStore, StorageResult, TOKEN_KEY};

/// Reads and writes the bearer token under [`TOKEN_KEY`]
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn KeyValueStore>,
}

impl TokenStore {
    /// Creates a token store over shared storage
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Returns the stored token
    ///
    /// Storage failures and empty strings both count as "no token"; an
    /// unreadable token must never block an unauthenticated request.
    pub fn token(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => Some(token),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("Failed to read auth token: {}", e);
                None
            }
        }
    }

    /// Whether a token is present
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Value for the `Authorization` header, if a token is present
    pub fn authorization_header(&self) -> Option<String> {
        self.token().map(|token| format!("Bearer {}", token))
    }

    /// Persists a new token
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails.
    pub fn set_token(&self, token: &str) -> StorageResult<()> {
        self.storage.set(TOKEN_KEY, token)
    }

    /// Removes the token
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails.
    pub fn clear(&self) -> StorageResult<()> {
        self.storage.remove(TOKEN_KEY)?;
        tracing::debug!("Auth token cleared");
        Ok(())
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
