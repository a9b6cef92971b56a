//! Console composition root
//!
//! Wires storage, notifications, the HTTP client, the user adapter and the
//! router into one value a UI shell (or the `adminboard` binary) drives.
//!
//! # Example
//!
//! ```no_run
//! use adminboard_client::config::Config;
//! use adminboard_client::console::Console;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut console = Console::new(Config::from_env()?)?;
//! console.sign_in("eyJhbGciOi...")?;
//! let page = console.users().list(Default::default()).await?;
//! # let _ = page;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use adminboard_shared::navigation::{RouteLocation, Router, LOGIN_PATH};
use adminboard_shared::notify::{Notifier, TracingNotifier};
use adminboard_shared::storage::{FileStore, KeyValueStore};

use crate::api::UserApi;
use crate::config::{ApiConfig, Config};
use crate::error::ClientResult;
use crate::http::{HttpClient, LoadingIndicator, TracingIndicator};

/// The console's long-lived services
pub struct Console {
    http: HttpClient,
    users: UserApi,
    router: Router,
}

impl Console {
    /// Builds a console persisting into the configured storage directory
    ///
    /// Stale tabs left over from an older route table are pruned.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage directory cannot be opened or the
    /// HTTP client cannot be built.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.storage.dir)?);
        let mut console = Self::with_parts(
            config.api,
            storage,
            Arc::new(TracingNotifier),
            Arc::new(TracingIndicator),
        )?;

        let table = console.router.table().clone();
        console.router.tabs_mut().retain_routes(&table);
        Ok(console)
    }

    /// Builds a console from explicit parts
    ///
    /// Tabs are restored from `storage` verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_parts(
        api: ApiConfig,
        storage: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
        indicator: Arc<dyn LoadingIndicator>,
    ) -> ClientResult<Self> {
        let router = Router::with_defaults(storage, notifier.clone());
        let http = HttpClient::new(api, router.tokens().clone(), notifier, indicator)?;
        let users = UserApi::new(http.clone());

        Ok(Self {
            http,
            users,
            router,
        })
    }

    /// Stores `token` and leaves the login page
    ///
    /// Navigates to the `redirect` target kept by the guard, or to the
    /// landing page when there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be stored or navigation fails.
    pub fn sign_in(&mut self, token: &str) -> anyhow::Result<&RouteLocation> {
        self.router.tokens().set_token(token)?;
        tracing::info!("Signed in");

        let target = self
            .router
            .current()
            .and_then(|location| location.query.get("redirect").cloned())
            .unwrap_or_else(|| "/".to_string());

        Ok(self.router.push(&target)?)
    }

    /// Drops the token and the open tabs, then shows the login page
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be removed or navigation fails.
    pub fn sign_out(&mut self) -> anyhow::Result<&RouteLocation> {
        self.router.tokens().clear()?;
        self.router.clear_tabs();
        tracing::info!("Signed out");

        Ok(self.router.push(LOGIN_PATH)?)
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn users(&self) -> &UserApi {
        &self.users
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut Router {
        &mut self.router
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adminboard_shared::notify::MemoryNotifier;
    use adminboard_shared::storage::MemoryStore;

    fn console() -> Console {
        Console::with_parts(
            ApiConfig::new("http://127.0.0.1:9/api"),
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryNotifier::new()),
            Arc::new(TracingIndicator),
        )
        .unwrap()
    }

    #[test]
    fn test_sign_in_follows_redirect_target() {
        let mut console = console();

        let location = console.router_mut().push("/admin/users").unwrap();
        assert_eq!(location.path, "/login");

        let location = console.sign_in("abc").unwrap();
        assert_eq!(location.path, "/admin/users");
        assert!(console.http().tokens().is_authenticated());
    }

    #[test]
    fn test_sign_in_without_redirect_lands_on_dashboard() {
        let mut console = console();
        assert_eq!(console.sign_in("abc").unwrap().path, "/admin/dashboard");
    }

    #[test]
    fn test_sign_out_clears_state() {
        let mut console = console();
        console.sign_in("abc").unwrap();
        console.router_mut().push("/admin/users").unwrap();

        let location = console.sign_out().unwrap();
        assert_eq!(location.path, "/login");
        assert!(console.router().tabs().is_empty());
        assert!(!console.router().tokens().is_authenticated());
    }
}
