//! Navigation tabs

use serde::{Deserialize, Serialize};

/// Active-tab sentinel used when no tab remains
pub const HOME_PATH: &str = "/";

/// One open tab in the tab bar
///
/// `path` is the identity: the store never holds two tabs with the same path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    /// Route name
    pub name: String,

    /// Display label, defaults to the route name
    pub title: String,

    /// Route path, unique within the collection
    pub path: String,

    /// Whether the user may close the tab
    pub closable: bool,
}

/// The persisted tab-navigation state
///
/// Serialized exactly as `{"tabsList": [...], "activeTab": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabState {
    /// Open tabs in display order
    #[serde(rename = "tabsList", default)]
    pub tabs_list: Vec<Tab>,

    /// Path of the active tab
    #[serde(rename = "activeTab", default)]
    pub active_tab: String,
}
