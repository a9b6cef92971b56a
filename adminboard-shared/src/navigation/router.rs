//! Router
//!
//! Owns the route table, the guard and the tab store, and performs
//! transitions against the current token state.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use adminboard_shared::navigation::Router;
//! use adminboard_shared::notify::MemoryNotifier;
//! use adminboard_shared::storage::MemoryStore;
//!
//! # fn example() -> Result<(), adminboard_shared::navigation::NavigationError> {
//! let storage = Arc::new(MemoryStore::new());
//! let mut router = Router::with_defaults(storage, Arc::new(MemoryNotifier::new()));
//!
//! // No token: the guard sends us to the login page
//! let location = router.push("/admin/users")?;
//! assert_eq!(location.path, "/login");
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use thiserror::Error;

use super::guard::{
    document_title, GuardDecision, NavigationGuard, RedirectReason, DEFAULT_TITLE,
    LOGIN_REQUIRED_MESSAGE,
};
use super::routes::{RouteLocation, RouteTable};
use crate::auth::TokenStore;
use crate::notify::Notifier;
use crate::storage::KeyValueStore;
use crate::tabs::TabStore;

/// Maximum redirects followed by one `push`
pub const MAX_REDIRECTS: usize = 8;

/// Navigation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// Nothing in the table matches the path
    #[error("No route matches {0}")]
    NoMatch(String),

    /// Redirect chain did not settle
    #[error("Too many redirects while navigating to {0}")]
    TooManyRedirects(String),
}

/// Stateful navigator over a [`RouteTable`]
pub struct Router {
    table: RouteTable,
    guard: NavigationGuard,
    tabs: TabStore,
    tokens: TokenStore,
    notifier: Arc<dyn Notifier>,
    current: Option<RouteLocation>,
    title: String,
}

impl Router {
    /// Creates a router from its parts
    pub fn new(
        table: RouteTable,
        guard: NavigationGuard,
        tabs: TabStore,
        tokens: TokenStore,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            table,
            guard,
            tabs,
            tokens,
            notifier,
            current: None,
            title: DEFAULT_TITLE.to_string(),
        }
    }

    /// Default routes and guard, tabs restored from `storage`
    pub fn with_defaults(storage: Arc<dyn KeyValueStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self::new(
            RouteTable::default_routes(),
            NavigationGuard::default(),
            TabStore::restore(storage.clone()),
            TokenStore::new(storage),
            notifier,
        )
    }

    /// Navigates to `path`, following static and guard redirects
    ///
    /// # Errors
    ///
    /// Returns an error if no route matches or redirects exceed
    /// [`MAX_REDIRECTS`]. The current location is unchanged on error.
    pub fn push(&mut self, path: &str) -> Result<&RouteLocation, NavigationError> {
        let mut target = path.to_string();

        for _ in 0..=MAX_REDIRECTS {
            let location = self
                .table
                .resolve(&target)
                .ok_or_else(|| NavigationError::NoMatch(target.clone()))?;

            if let Some(redirect) = &location.redirect {
                tracing::debug!(from = %location.path, to = %redirect, "Static redirect");
                target = redirect.clone();
                continue;
            }

            match self.guard.before_each(&location, self.tokens.is_authenticated()) {
                GuardDecision::Allow => {
                    tracing::debug!(path = %location.full_path, "Navigation committed");
                    self.title = document_title(&location);
                    self.guard.after_each(&location, &mut self.tabs);
                    let current = self.current.insert(location);
                    return Ok(&*current);
                }
                GuardDecision::Redirect { to, reason } => {
                    if reason == RedirectReason::LoginRequired {
                        self.notifier.warning(LOGIN_REQUIRED_MESSAGE);
                    }
                    tracing::debug!(from = %location.full_path, to = %to, ?reason, "Guard redirect");
                    target = to;
                }
            }
        }

        tracing::warn!("Redirect loop while navigating to {}", path);
        Err(NavigationError::TooManyRedirects(path.to_string()))
    }

    /// Closes a tab and navigates if it was the active one
    ///
    /// Returns the new location when a navigation happened.
    ///
    /// # Errors
    ///
    /// Propagates navigation errors from [`Router::push`].
    pub fn close_tab(&mut self, path: &str) -> Result<Option<&RouteLocation>, NavigationError> {
        match self.tabs.remove_tab(path) {
            Some(next) => self.push(&next).map(Some),
            None => Ok(None),
        }
    }

    /// Navigates to an open tab
    ///
    /// Returns `None` without navigating when no tab is open at `path`.
    ///
    /// # Errors
    ///
    /// Propagates navigation errors from [`Router::push`].
    pub fn activate_tab(&mut self, path: &str) -> Result<Option<&RouteLocation>, NavigationError> {
        if self.tabs.get(path).is_none() {
            return Ok(None);
        }
        self.push(path).map(Some)
    }

    /// Closes all tabs; the active tab resets to home
    pub fn clear_tabs(&mut self) {
        self.tabs.clear_tabs();
    }

    /// Current location, `None` before the first successful push
    pub fn current(&self) -> Option<&RouteLocation> {
        self.current.as_ref()
    }

    /// Title of the current page
    pub fn document_title(&self) -> &str {
        &self.title
    }

    pub fn tabs(&self) -> &TabStore {
        &self.tabs
    }

    pub fn tabs_mut(&mut self) -> &mut TabStore {
        &mut self.tabs
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }
}
