//! Navigation guard
//!
//! A pure decision per transition. The only state consulted is whether a
//! token is present, which the caller passes in.
//!
//! # Rules
//!
//! 1. Destination requires auth and no token: redirect to login, keeping
//!    the original destination in the `redirect` query parameter
//! 2. Destination is Login/Register and a token exists: redirect to the
//!    dashboard
//! 3. Otherwise: allow
//!
//! After an allowed transition, tab-eligible named routes are registered
//! with the tab store.

use super::routes::{RouteLocation, DASHBOARD_PATH, LOGIN_PATH};
use crate::tabs::TabStore;

/// Document title used when the route has none
pub const DEFAULT_TITLE: &str = "管理系统";

/// Warning shown when a protected route is hit without a token
pub const LOGIN_REQUIRED_MESSAGE: &str = "请先登录";

/// Why the guard redirected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// Protected route, no token
    LoginRequired,

    /// Login/Register page while already signed in
    AlreadyAuthenticated,
}

/// Outcome of [`NavigationGuard::before_each`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Proceed to the destination
    Allow,

    /// Navigate to `to` instead
    Redirect { to: String, reason: RedirectReason },
}

/// Per-transition authentication policy
#[derive(Debug, Clone)]
pub struct NavigationGuard {
    login_path: String,
    landing_path: String,
}

impl NavigationGuard {
    /// Creates a guard with explicit login and landing paths
    pub fn new(login_path: impl Into<String>, landing_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            landing_path: landing_path.into(),
        }
    }

    /// Decides whether `to` may be entered
    pub fn before_each(&self, to: &RouteLocation, authenticated: bool) -> GuardDecision {
        if to.meta.requires_auth && !authenticated {
            return GuardDecision::Redirect {
                to: format!(
                    "{}?redirect={}",
                    self.login_path,
                    urlencoding::encode(&to.full_path)
                ),
                reason: RedirectReason::LoginRequired,
            };
        }

        let is_auth_page = matches!(to.name.as_deref(), Some("Login") | Some("Register"));
        if is_auth_page && authenticated {
            return GuardDecision::Redirect {
                to: self.landing_path.clone(),
                reason: RedirectReason::AlreadyAuthenticated,
            };
        }

        GuardDecision::Allow
    }

    /// Registers `to` as a tab if it is named and tab-eligible
    pub fn after_each(&self, to: &RouteLocation, tabs: &mut TabStore) {
        if to.name.is_some() && to.meta.in_tab {
            tabs.add_tab(to);
        }
    }
}

impl Default for NavigationGuard {
    fn default() -> Self {
        Self::new(LOGIN_PATH, DASHBOARD_PATH)
    }
}

/// Title to show for `to`
pub fn document_title(to: &RouteLocation) -> String {
    to.meta
        .title
        .clone()
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}
