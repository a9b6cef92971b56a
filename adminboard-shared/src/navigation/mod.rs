//! Client-side navigation
//!
//! - `routes`: the route table and resolved locations
//! - `guard`: per-transition authentication decisions and tab registration
//! - `router`: ties routes, guard, tab store and token store together
//!
//! # Transition Flow
//!
//! ```text
//! Router::push(path)
//!   ├─> RouteTable::resolve (static redirects followed)
//!   ├─> NavigationGuard::before_each
//!   │     ├─> Redirect: notify if a login is required, resolve again
//!   │     └─> Allow: commit location and document title
//!   └─> NavigationGuard::after_each ──> TabStore::add_tab
//! ```

pub mod guard;
pub mod router;
pub mod routes;

pub use guard::{
    document_title, GuardDecision, NavigationGuard, RedirectReason, DEFAULT_TITLE,
    LOGIN_REQUIRED_MESSAGE,
};
pub use router::{NavigationError, Router};
pub use routes::{RouteLocation, RouteMeta, RouteRecord, RouteTable, DASHBOARD_PATH, LOGIN_PATH};
