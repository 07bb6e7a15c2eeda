//! End-to-end dispatch tests over a served router.

use std::sync::Arc;
use tempfile::TempDir;

mod common;

#[tokio::test]
async fn test_parameter_extraction_end_to_end() {
    let tmp = TempDir::new().unwrap();
    let config = common::test_config(tmp.path());
    common::write_handler(
        &config.handlers.root,
        "user.js",
        "// @route /user/:id [GET]\n",
    );

    let addr = common::start_router(config, None).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("http://{addr}/api/user/42"))
        .send()
        .await
        .expect("Router unreachable");
    assert_eq!(res.status(), 200);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["params"]["id"], "42");
    assert_eq!(body["method"], "GET");
    assert!(body["handler"].as_str().unwrap().ends_with("user.js"));
}

#[tokio::test]
async fn test_method_filtering_end_to_end() {
    let tmp = TempDir::new().unwrap();
    let config = common::test_config(tmp.path());
    common::write_handler(
        &config.handlers.root,
        "user.js",
        "// @route /user/:id [GET]\n",
    );

    let addr = common::start_router(config, None).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("http://{addr}/api/user/42"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn test_not_found_body() {
    let tmp = TempDir::new().unwrap();
    let config = common::test_config(tmp.path());
    common::write_handler(&config.handlers.root, "user.js", "// @route /user/:id\n");

    let addr = common::start_router(config, None).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("http://{addr}/api/missing"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"error": "Route not found"}));
}

#[tokio::test]
async fn test_denied_route_yields_401_body() {
    let tmp = TempDir::new().unwrap();
    let config = common::test_config(tmp.path());
    common::write_handler(
        &config.handlers.root,
        "admin.js",
        "// @route /admin\n// @auth admin_only\n",
    );

    let predicate: convention_router::dispatch::AuthPredicate =
        Arc::new(|rule: &str| rule != "admin_only");
    let addr = common::start_router(config, Some(predicate)).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("http://{addr}/api/admin"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"error": "Unauthorized"}));
}

#[tokio::test]
async fn test_allowed_route_reaches_handler() {
    let tmp = TempDir::new().unwrap();
    let config = common::test_config(tmp.path());
    common::write_handler(
        &config.handlers.root,
        "admin.js",
        "// @route /admin\n// @auth admin_only\n",
    );

    let predicate: convention_router::dispatch::AuthPredicate =
        Arc::new(|rule: &str| rule == "admin_only");
    let addr = common::start_router(config, Some(predicate)).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("http://{addr}/api/admin"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
}

#[tokio::test]
async fn test_precedence_follows_scan_order() {
    let tmp = TempDir::new().unwrap();
    let config = common::test_config(tmp.path());
    // Sorted traversal: aa.js is discovered first and its parameter
    // template shadows the literal one in bb.js.
    common::write_handler(&config.handlers.root, "aa.js", "// @route /user/:id\n");
    common::write_handler(&config.handlers.root, "bb.js", "// @route /user/me\n");

    let addr = common::start_router(config, None).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("http://{addr}/api/user/me"))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["handler"].as_str().unwrap().ends_with("aa.js"));
    assert_eq!(body["params"]["id"], "me");
}
