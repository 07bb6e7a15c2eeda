//! Cache creation, reuse and manual invalidation across process lifetimes.
//!
//! Each `start_router` call stands in for one process start: the table is
//! built exactly once per call, from the cache when a record exists.

use tempfile::TempDir;

use convention_router::routing::{RouteCache, RouteTable};

mod common;

#[tokio::test]
async fn test_first_start_writes_cache_record() {
    let tmp = TempDir::new().unwrap();
    let config = common::test_config(tmp.path());
    common::write_handler(&config.handlers.root, "user.js", "// @route /user/:id\n");

    let cache_path = config.cache.path.clone();
    assert!(!cache_path.exists());

    let addr = common::start_router(config, None).await;
    assert!(cache_path.exists());

    let res = reqwest::get(format!("http://{addr}/api/user/1")).await.unwrap();
    assert_eq!(res.status(), 200);
}

#[tokio::test]
async fn test_restart_serves_from_cache_after_handler_removal() {
    let tmp = TempDir::new().unwrap();
    let config = common::test_config(tmp.path());
    common::write_handler(&config.handlers.root, "user.js", "// @route /user/:id\n");

    // First start scans and persists.
    common::start_router(config.clone(), None).await;

    // The handler tree disappears; the cached table still routes. This is
    // the documented staleness contract, exercised in the direction that
    // proves the cache (not a rescan) was used.
    std::fs::remove_dir_all(&config.handlers.root).unwrap();
    std::fs::create_dir_all(&config.handlers.root).unwrap();

    let addr = common::start_router(config, None).await;
    let res = reqwest::get(format!("http://{addr}/api/user/7")).await.unwrap();
    assert_eq!(res.status(), 200);
}

#[tokio::test]
async fn test_cache_clear_forces_rescan() {
    let tmp = TempDir::new().unwrap();
    let config = common::test_config(tmp.path());
    common::write_handler(&config.handlers.root, "old.js", "// @route /old\n");

    common::start_router(config.clone(), None).await;

    // New handler is invisible until the record is cleared.
    common::write_handler(&config.handlers.root, "new.js", "// @route /new\n");
    let cache = RouteCache::new(&config.cache.path);
    assert!(cache.clear().unwrap());

    let addr = common::start_router(config, None).await;
    let res = reqwest::get(format!("http://{addr}/api/new")).await.unwrap();
    assert_eq!(res.status(), 200);
    let res = reqwest::get(format!("http://{addr}/api/old")).await.unwrap();
    assert_eq!(res.status(), 200);
}

#[tokio::test]
async fn test_cache_round_trips_full_descriptors() {
    let tmp = TempDir::new().unwrap();
    let config = common::test_config(tmp.path());
    common::write_handler(
        &config.handlers.root,
        "user.js",
        "// @route /user/:id [GET, POST]\n// @auth logged_in\n",
    );
    common::write_handler(&config.handlers.root, "root.js", "// @route /\n");

    let cache = RouteCache::new(&config.cache.path);
    let (scanned, _) = RouteTable::load_or_scan(
        &cache,
        &config.handlers.root,
        &config.handlers.convention,
    )
    .unwrap();

    let reloaded = RouteTable::new(cache.load().unwrap().unwrap());
    assert_eq!(reloaded, scanned);
}
