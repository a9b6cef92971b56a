/// Integration tests for tab state persistence
///
/// These tests verify that the tab store survives a restart through a
/// file-backed store and that the persisted blob keeps its wire shape.

mod common;

use std::sync::Arc;

use adminboard_shared::models::{TabState, HOME_PATH};
use adminboard_shared::navigation::{RouteTable, Router};
use adminboard_shared::notify::MemoryNotifier;
use adminboard_shared::storage::{KeyValueStore, TAB_STATE_KEY};
use adminboard_shared::tabs::TabStore;
use common::{location, StorageContext};
use serde_json::json;

#[test]
fn test_round_trip_through_restart() {
    let ctx = StorageContext::new();

    let mut tabs = TabStore::restore(ctx.storage.clone());
    tabs.add_tab(&location("/admin/dashboard"));
    tabs.add_tab(&location("/admin/users"));
    tabs.set_active("/admin/dashboard");
    let before = tabs.snapshot();

    let restored = TabStore::restore(ctx.reopen());
    assert_eq!(restored.snapshot(), before);
    assert_eq!(restored.active_tab(), "/admin/dashboard");
}

#[test]
fn test_persisted_blob_shape() {
    let ctx = StorageContext::new();

    let mut tabs = TabStore::restore(ctx.storage.clone());
    tabs.add_tab(&location("/admin/dashboard"));

    let raw = ctx.storage.get(TAB_STATE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(
        value,
        json!({
            "tabsList": [{
                "name": "Dashboard",
                "title": "仪表盘",
                "path": "/admin/dashboard",
                "closable": false
            }],
            "activeTab": "/admin/dashboard"
        })
    );
}

#[test]
fn test_every_transition_is_persisted() {
    let ctx = StorageContext::new();
    let mut tabs = TabStore::restore(ctx.storage.clone());

    tabs.add_tab(&location("/admin/dashboard"));
    tabs.add_tab(&location("/admin/users"));
    tabs.remove_tab("/admin/users");
    assert_eq!(TabStore::restore(ctx.reopen()).snapshot(), tabs.snapshot());

    tabs.clear_tabs();
    let restored = TabStore::restore(ctx.reopen());
    assert!(restored.is_empty());
    assert_eq!(restored.active_tab(), HOME_PATH);
}

#[test]
fn test_stale_entries_restored_verbatim() {
    let ctx = StorageContext::new();
    let stale = json!({
        "tabsList": [
            {"name": "Reports", "title": "报表", "path": "/admin/reports", "closable": true},
            {"name": "Users", "title": "用户管理", "path": "/admin/users", "closable": true}
        ],
        "activeTab": "/admin/reports"
    });
    ctx.storage.set(TAB_STATE_KEY, &stale.to_string()).unwrap();

    let mut tabs = TabStore::restore(ctx.storage.clone());
    assert_eq!(tabs.len(), 2);
    assert_eq!(tabs.active_tab(), "/admin/reports");

    // Pruning is explicit
    assert_eq!(tabs.retain_routes(&RouteTable::default_routes()), 1);
    assert_eq!(tabs.active_tab(), "/admin/users");
}

#[test]
fn test_corrupt_blob_starts_empty() {
    let ctx = StorageContext::new();
    ctx.storage.set(TAB_STATE_KEY, "{not json").unwrap();

    let tabs = TabStore::restore(ctx.storage.clone());
    assert!(tabs.is_empty());
    assert_eq!(tabs.snapshot(), TabState {
        tabs_list: vec![],
        active_tab: HOME_PATH.to_string(),
    });
}

#[test]
fn test_router_restores_tabs_from_storage() {
    let ctx = StorageContext::new();
    ctx.storage.set("token", "abc").unwrap();

    {
        let mut router = Router::with_defaults(ctx.storage.clone(), Arc::new(MemoryNotifier::new()));
        router.push("/admin/users").unwrap();
        router.push("/").unwrap();
    }

    let router = Router::with_defaults(ctx.reopen(), Arc::new(MemoryNotifier::new()));
    let paths: Vec<&str> = router.tabs().tabs().iter().map(|t| t.path.as_str()).collect();
    assert_eq!(paths, vec!["/admin/users", "/admin/dashboard"]);
    assert_eq!(router.tabs().active_tab(), "/admin/dashboard");
}
