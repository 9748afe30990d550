//! PhonebookClient integration tests.
//!
//! Runs the client against a live axum server over an in-memory store.

#![cfg(feature = "client")]

#[path = "../support/mod.rs"]
mod support;

use phonebook::{ClientError, NewContact, PhonebookClient};

use support::{start_server, MISSING_ID};

async fn start_client() -> PhonebookClient {
    let (base, _) = start_server().await;
    PhonebookClient::new(base)
}

#[tokio::test]
async fn create_list_update_remove() {
    let client = start_client().await;

    let ada = client
        .create_entry(&NewContact::new("Ada Lovelace", "12345678"))
        .await
        .unwrap();
    assert!(!ada.id.is_empty());
    assert_eq!(ada.name.as_deref(), Some("Ada Lovelace"));

    let all = client.get_all().await.unwrap();
    assert_eq!(all, vec![ada.clone()]);

    let updated = client
        .update_entry(&NewContact::new("Ada Lovelace", "87654321"), &ada.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, ada.id);
    assert_eq!(updated.number.as_deref(), Some("87654321"));

    let resp = client.remove_entry(&ada.id).await.unwrap();
    assert_eq!(resp.status(), 200);

    assert!(client.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_unknown_id_is_none() {
    let client = start_client().await;

    let result = client
        .update_entry(&NewContact::new("Ada Lovelace", "12345678"), MISSING_ID)
        .await
        .unwrap();
    assert_eq!(result, None);
}

#[tokio::test]
async fn server_errors_carry_message() {
    let client = start_client().await;

    let err = client
        .create_entry(&NewContact::new("Al", "12345678"))
        .await
        .unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 400);
            assert!(message.unwrap().starts_with("Person validation failed"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn remove_unknown_id_is_404() {
    let client = start_client().await;

    let err = client.remove_entry(MISSING_ID).await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, None);
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn remove_malformed_id_is_400() {
    let client = start_client().await;

    let err = client.remove_entry("not-a-valid-id").await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Api { status: 400, message: Some(ref m) } if m == "malformatted id"
    ));
}
