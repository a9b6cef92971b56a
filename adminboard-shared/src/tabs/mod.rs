//! Tab store
//!
//! Tracks the ordered list of open navigation tabs and which one is active,
//! and persists both under [`TAB_STATE_KEY`] after every change.
//!
//! # Transitions
//!
//! - `add_tab`: append unless the path is already open, then activate it
//! - `remove_tab`: drop a tab; if it was active, activate its predecessor,
//!   else the new first tab, else fall back to [`HOME_PATH`]
//! - `clear_tabs`: drop everything and reset the active tab to [`HOME_PATH`]
//!
//! # Example
//!
//! ```
//! use adminboard_shared::navigation::RouteTable;
//! use adminboard_shared::tabs::TabStore;
//!
//! let table = RouteTable::default_routes();
//! let mut tabs = TabStore::new();
//!
//! tabs.add_tab(&table.resolve("/admin/dashboard").unwrap());
//! tabs.add_tab(&table.resolve("/admin/users").unwrap());
//! assert_eq!(tabs.active_tab(), "/admin/users");
//!
//! // Closing the active tab hands back where to navigate next
//! let next = tabs.remove_tab("/admin/users");
//! assert_eq!(next.as_deref(), Some("/admin/dashboard"));
//! ```

use std::sync::Arc;

use crate::models::{Tab, TabState, HOME_PATH};
use crate::navigation::{RouteLocation, RouteTable};
use crate::storage::{KeyValueStore, TAB_STATE_KEY};

/// Ordered tab collection plus the active tab
pub struct TabStore {
    state: TabState,
    storage: Option<Arc<dyn KeyValueStore>>,
}

impl TabStore {
    /// Creates an empty, non-persistent store
    pub fn new() -> Self {
        Self {
            state: TabState {
                tabs_list: Vec::new(),
                active_tab: HOME_PATH.to_string(),
            },
            storage: None,
        }
    }

    /// Restores the store from `storage` and keeps persisting into it
    ///
    /// The persisted blob is trusted as is; paths are not checked against
    /// the route table (see [`TabStore::retain_routes`]). An absent blob
    /// yields an empty store, and so does a corrupt one (with a warning).
    pub fn restore(storage: Arc<dyn KeyValueStore>) -> Self {
        let state = match storage.get(TAB_STATE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<TabState>(&raw) {
                Ok(state) => {
                    tracing::debug!(
                        tabs = state.tabs_list.len(),
                        active = %state.active_tab,
                        "Restored tab state"
                    );
                    Some(state)
                }
                Err(e) => {
                    tracing::warn!("Discarding corrupt tab state: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Failed to read tab state: {}", e);
                None
            }
        };

        let mut store = Self::new();
        if let Some(state) = state {
            store.state = state;
        }
        store.storage = Some(storage);
        store
    }

    /// Open tabs in display order
    pub fn tabs(&self) -> &[Tab] {
        &self.state.tabs_list
    }

    /// Path of the active tab
    pub fn active_tab(&self) -> &str {
        &self.state.active_tab
    }

    /// Finds an open tab by path
    pub fn get(&self, path: &str) -> Option<&Tab> {
        self.state.tabs_list.iter().find(|tab| tab.path == path)
    }

    pub fn len(&self) -> usize {
        self.state.tabs_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.tabs_list.is_empty()
    }

    /// Copy of the persisted fields
    pub fn snapshot(&self) -> TabState {
        self.state.clone()
    }

    /// Opens a tab for `route` (unless already open) and activates it
    ///
    /// An absent or empty title falls back to the route name and `closable` defaults to
    /// true when the route does not say.
    pub fn add_tab(&mut self, route: &RouteLocation) {
        if self.get(&route.path).is_none() {
            let name = route.name.clone().unwrap_or_else(|| route.path.clone());
            let title = route
                .meta
                .title
                .clone()
                .filter(|title| !title.is_empty())
                .unwrap_or_else(|| name.clone());

            self.state.tabs_list.push(Tab {
                name,
                title,
                path: route.path.clone(),
                closable: route.meta.closable.unwrap_or(true),
            });
            tracing::debug!(path = %route.path, "Tab opened");
        }

        self.state.active_tab = route.path.clone();
        self.persist();
    }

    /// Closes the tab at `path`
    ///
    /// Returns the path the caller must navigate to, which is `Some` only
    /// when the closed tab was the active one: its predecessor, else the new
    /// first tab, else [`HOME_PATH`]. Unknown paths are a no-op.
    pub fn remove_tab(&mut self, path: &str) -> Option<String> {
        let index = self.state.tabs_list.iter().position(|tab| tab.path == path)?;
        self.state.tabs_list.remove(index);
        tracing::debug!(path = %path, "Tab closed");

        let navigate_to = if self.state.active_tab == path {
            let next = index
                .checked_sub(1)
                .and_then(|i| self.state.tabs_list.get(i))
                .or_else(|| self.state.tabs_list.first())
                .map(|tab| tab.path.clone())
                .unwrap_or_else(|| HOME_PATH.to_string());

            self.state.active_tab = next.clone();
            Some(next)
        } else {
            None
        };

        self.persist();
        navigate_to
    }

    /// Activates an already open tab
    ///
    /// Returns false (and changes nothing) if no tab has that path.
    pub fn set_active(&mut self, path: &str) -> bool {
        if self.get(path).is_none() {
            return false;
        }

        self.state.active_tab = path.to_string();
        self.persist();
        true
    }

    /// Closes every tab and resets the active tab to [`HOME_PATH`]
    pub fn clear_tabs(&mut self) {
        self.state.tabs_list.clear();
        self.state.active_tab = HOME_PATH.to_string();
        self.persist();
    }

    /// Drops tabs whose path no longer matches a concrete route
    ///
    /// If the active tab is dropped, the first remaining tab becomes active,
    /// or [`HOME_PATH`] when none remains. Returns the number of tabs dropped.
    pub fn retain_routes(&mut self, table: &RouteTable) -> usize {
        let before = self.state.tabs_list.len();
        self.state.tabs_list.retain(|tab| table.contains(&tab.path));
        let dropped = before - self.state.tabs_list.len();

        if dropped == 0 {
            return 0;
        }

        let active = self.state.active_tab.clone();
        if active != HOME_PATH && self.get(&active).is_none() {
            self.state.active_tab = self
                .state
                .tabs_list
                .first()
                .map(|tab| tab.path.clone())
                .unwrap_or_else(|| HOME_PATH.to_string());
        }

        tracing::info!(dropped, "Pruned stale tabs");
        self.persist();
        dropped
    }

    fn persist(&self) {
        let Some(storage) = &self.storage else {
            return;
        };

        let result = serde_json::to_string(&self.state)
            .map_err(|e| e.to_string())
            .and_then(|raw| storage.set(TAB_STATE_KEY, &raw).map_err(|e| e.to_string()));

        if let Err(e) = result {
            tracing::warn!("Failed to persist tab state: {}", e);
        }
    }
}

impl Default for TabStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TabStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabStore")
            .field("state", &self.state)
            .field("persistent", &self.storage.is_some())
            .finish()
    }
}
