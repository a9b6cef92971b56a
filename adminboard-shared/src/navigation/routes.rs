//! Route table
//!
//! Routes are matched by exact path after query and trailing-slash
//! normalization. A table may carry one catch-all record that matches any
//! path the table does not know.
//!
//! # Example
//!
//! ```
//! use adminboard_shared::navigation::RouteTable;
//!
//! let table = RouteTable::default_routes();
//! let location = table.resolve("/admin/users?page=2").unwrap();
//!
//! assert_eq!(location.name.as_deref(), Some("Users"));
//! assert_eq!(location.query.get("page").map(String::as_str), Some("2"));
//! assert!(location.meta.requires_auth);
//! ```

use std::collections::BTreeMap;

/// Path of the login view
pub const LOGIN_PATH: &str = "/login";

/// Landing page for authenticated users
pub const DASHBOARD_PATH: &str = "/admin/dashboard";

/// Per-route flags consumed by the guard and the tab store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMeta {
    /// Display title, also used as the document title
    pub title: Option<String>,

    /// Menu icon name
    pub icon: Option<String>,

    /// Route needs a stored token
    pub requires_auth: bool,

    /// Whether the route's tab may be closed; unset means closable
    pub closable: Option<bool>,

    /// Route is tracked in the tab bar
    pub in_tab: bool,
}

impl RouteMeta {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn requires_auth(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = Some(closable);
        self
    }

    pub fn in_tab(mut self) -> Self {
        self.in_tab = true;
        self
    }
}

/// A route definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    pub path: String,
    pub name: Option<String>,
    /// Static redirect applied before any guard runs
    pub redirect: Option<String>,
    pub meta: RouteMeta,
}

impl RouteRecord {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: normalize_path(&path.into()),
            name: None,
            redirect: None,
            meta: RouteMeta::default(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn redirect(mut self, to: impl Into<String>) -> Self {
        self.redirect = Some(to.into());
        self
    }

    pub fn meta(mut self, meta: RouteMeta) -> Self {
        self.meta = meta;
        self
    }
}

/// A resolved navigation target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLocation {
    /// Normalized path without query
    pub path: String,

    /// Path plus query string as requested
    pub full_path: String,

    pub name: Option<String>,

    pub meta: RouteMeta,

    pub query: BTreeMap<String, String>,

    /// Static redirect of the matched record
    pub redirect: Option<String>,
}

/// Ordered set of routes plus an optional catch-all
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<RouteRecord>,
    fallback: Option<RouteRecord>,
}

impl RouteTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// The console's route table
    pub fn default_routes() -> Self {
        Self::new()
            .route(RouteRecord::new("/").redirect(DASHBOARD_PATH))
            .route(
                RouteRecord::new(DASHBOARD_PATH).name("Dashboard").meta(
                    RouteMeta::titled("仪表盘")
                        .icon("House")
                        .requires_auth()
                        .closable(false)
                        .in_tab(),
                ),
            )
            .route(
                RouteRecord::new("/admin/users").name("Users").meta(
                    RouteMeta::titled("用户管理")
                        .requires_auth()
                        .closable(true)
                        .in_tab(),
                ),
            )
            .route(
                RouteRecord::new(LOGIN_PATH)
                    .name("Login")
                    .meta(RouteMeta::titled("登录")),
            )
            .fallback(
                RouteRecord::new("/:pathMatch(.*)*")
                    .name("GlobalNotFound")
                    .meta(RouteMeta::titled("页面未找到")),
            )
    }

    /// Adds a route; a later record with the same path replaces the earlier one
    pub fn route(mut self, record: RouteRecord) -> Self {
        self.routes.retain(|r| r.path != record.path);
        self.routes.push(record);
        self
    }

    /// Sets the catch-all record
    pub fn fallback(mut self, record: RouteRecord) -> Self {
        self.fallback = Some(record);
        self
    }

    /// All non-fallback records in definition order
    pub fn records(&self) -> &[RouteRecord] {
        &self.routes
    }

    /// Whether `path` matches a concrete (non-fallback) route
    pub fn contains(&self, path: &str) -> bool {
        let (path, _) = split_query(path);
        let path = normalize_path(path);
        self.routes.iter().any(|r| r.path == path)
    }

    /// Path of the route named `name`
    pub fn path_of(&self, name: &str) -> Option<&str> {
        self.routes
            .iter()
            .find(|r| r.name.as_deref() == Some(name))
            .map(|r| r.path.as_str())
    }

    /// Resolves `full_path` to a location
    ///
    /// Returns `None` only when nothing matches and the table has no
    /// catch-all.
    pub fn resolve(&self, full_path: &str) -> Option<RouteLocation> {
        let (raw_path, raw_query) = split_query(full_path);
        let path = normalize_path(raw_path);

        let record = self
            .routes
            .iter()
            .find(|r| r.path == path)
            .or(self.fallback.as_ref())?;

        Some(RouteLocation {
            full_path: match raw_query {
                Some(query) if !query.is_empty() => format!("{}?{}", path, query),
                _ => path.clone(),
            },
            path,
            name: record.name.clone(),
            meta: record.meta.clone(),
            query: raw_query.map(parse_query).unwrap_or_default(),
            redirect: record.redirect.clone(),
        })
    }
}

fn split_query(full_path: &str) -> (&str, Option<&str>) {
    // Fragments never reach the router
    let without_hash = full_path.split('#').next().unwrap_or(full_path);
    match without_hash.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (without_hash, None),
    }
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    let with_root = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    };

    if with_root.len() > 1 {
        with_root.trim_end_matches('/').to_string()
    } else {
        with_root
    }
}

fn parse_query(query: &str) -> BTreeMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("admin/users"), "/admin/users");
        assert_eq!(normalize_path("/admin/users/"), "/admin/users");
    }

    #[test]
    fn test_resolve_known_route() {
        let table = RouteTable::default_routes();
        let location = table.resolve("/admin/dashboard").unwrap();

        assert_eq!(location.name.as_deref(), Some("Dashboard"));
        assert_eq!(location.meta.closable, Some(false));
        assert!(location.meta.in_tab);
        assert_eq!(location.full_path, "/admin/dashboard");
    }

    #[test]
    fn test_resolve_root_carries_redirect() {
        let table = RouteTable::default_routes();
        let location = table.resolve("/").unwrap();
        assert_eq!(location.redirect.as_deref(), Some(DASHBOARD_PATH));
        assert_eq!(location.name, None);
    }

    #[test]
    fn test_resolve_unknown_hits_fallback() {
        let table = RouteTable::default_routes();
        let location = table.resolve("/nope/missing").unwrap();

        assert_eq!(location.path, "/nope/missing");
        assert_eq!(location.name.as_deref(), Some("GlobalNotFound"));
        assert!(!table.contains("/nope/missing"));
    }

    #[test]
    fn test_resolve_without_fallback() {
        let table = RouteTable::new().route(RouteRecord::new("/a").name("A"));
        assert!(table.resolve("/b").is_none());
    }

    #[test]
    fn test_query_decoding() {
        let table = RouteTable::default_routes();
        let location = table
            .resolve("/login?redirect=%2Fadmin%2Fusers%3Fpage%3D2&x=a+b")
            .unwrap();

        assert_eq!(
            location.query.get("redirect").map(String::as_str),
            Some("/admin/users?page=2")
        );
        assert_eq!(location.query.get("x").map(String::as_str), Some("a b"));
    }

    #[test]
    fn test_path_of_name() {
        let table = RouteTable::default_routes();
        assert_eq!(table.path_of("Login"), Some(LOGIN_PATH));
        assert_eq!(table.path_of("Register"), None);
    }

    #[test]
    fn test_route_replaces_same_path() {
        let table = RouteTable::new()
            .route(RouteRecord::new("/a").name("First"))
            .route(RouteRecord::new("/a").name("Second"));

        assert_eq!(table.records().len(), 1);
        assert_eq!(table.path_of("Second"), Some("/a"));
    }
}
