//! Production mode: unmatched routes come from the frontend bundle.

use std::sync::Arc;

use phonebook::http::{self, AppState};
use phonebook::{Config, InMemoryContactStore, Mode};

use crate::support::serve;

async fn start_production(dir: &std::path::Path) -> String {
    let config = Config {
        mode: Mode::Production,
        frontend_dir: dir.to_path_buf(),
        ..Config::default()
    };
    let state = AppState::new(Arc::new(InMemoryContactStore::new()));
    serve(http::app(state, &config)).await
}

#[tokio::test]
async fn serves_bundle_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<div id=\"root\"></div>").unwrap();
    std::fs::write(dir.path().join("app.js"), "console.log('phonebook')").unwrap();
    let base = start_production(dir.path()).await;

    let resp = reqwest::get(format!("{base}/app.js")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "console.log('phonebook')");
}

#[tokio::test]
async fn unknown_paths_fall_back_to_index() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<div id=\"root\"></div>").unwrap();
    let base = start_production(dir.path()).await;

    let resp = reqwest::get(format!("{base}/contacts/ada")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "<div id=\"root\"></div>");
}

#[tokio::test]
async fn api_routes_still_answer() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<div id=\"root\"></div>").unwrap();
    let base = start_production(dir.path()).await;

    let resp = reqwest::get(format!("{base}/api/persons")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Vec<serde_json::Value> = resp.json().await.unwrap();
    assert!(body.is_empty());

    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn responses_carry_cors_headers() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "").unwrap();
    let base = start_production(dir.path()).await;

    let resp = reqwest::Client::new()
        .get(format!("{base}/health"))
        .header("origin", "http://localhost:3000")
        .send()
        .await
        .unwrap();
    assert!(resp.headers().contains_key("access-control-allow-origin"));
}
