//! Helpers shared by the integration suites: server startup and a sample
//! contact. Not every suite uses every helper.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use phonebook::http::{self, AppState};
use phonebook::InMemoryContactStore;
use serde_json::{json, Value};

/// A valid ObjectId that no store ever hands out in these tests.
pub const MISSING_ID: &str = "5f5b9f9b9b9b9b9b9b9b9b9b";

/// Bind to port 0 and return the actual address.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Start the API router over a fresh store. The store handle is returned so
/// tests can inspect what was persisted.
pub async fn start_server() -> (String, InMemoryContactStore) {
    let store = InMemoryContactStore::new();
    let app = http::router(AppState::new(Arc::new(store.clone())));
    (serve(app).await, store)
}

pub fn ada() -> Value {
    json!({ "name": "Ada Lovelace", "number": "12345678" })
}

/// POST a contact and return the response body.
pub async fn create(client: &reqwest::Client, base: &str, body: &Value) -> Value {
    let resp = client
        .post(format!("{base}/api/persons"))
        .json(body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    resp.json().await.unwrap()
}
