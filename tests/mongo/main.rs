//! MongoContactStore against a live server.
//!
//! Set `MONGODB_TEST_URI` to run these; without it every test returns early.
//! Each test works in its own throwaway database.

#![cfg(feature = "mongo")]

use bson::oid::ObjectId;
use phonebook::{ContactInput, ContactStore, MongoContactStore, NewContact, StoreError};

const MISSING_ID: &str = "5f5b9f9b9b9b9b9b9b9b9b9b";

async fn connect() -> Option<MongoContactStore> {
    let uri = std::env::var("MONGODB_TEST_URI").ok()?;
    let database = format!("phonebook_test_{}", ObjectId::new().to_hex());
    Some(MongoContactStore::connect(&uri, Some(&database)).await.unwrap())
}

#[tokio::test]
async fn update_missing_id_ignores_taken_name() {
    let Some(store) = connect().await else { return };
    store
        .create(NewContact::new("Ada Lovelace", "12345678"))
        .await
        .unwrap();

    let result = store
        .update_by_id(MISSING_ID, NewContact::new("Ada Lovelace", "87654321").into())
        .await
        .unwrap();
    assert_eq!(result, None);
    assert_eq!(store.count().await.unwrap(), 1);
    store.close().await;
}

#[tokio::test]
async fn update_stores_absent_fields_as_null() {
    let Some(store) = connect().await else { return };
    let ada = store
        .create(NewContact::new("Ada Lovelace", "12345678"))
        .await
        .unwrap();
    let grace = store
        .create(NewContact::new("Grace Hopper", "87654321"))
        .await
        .unwrap();

    // Two nameless contacts must not trip the unique index on name.
    for id in [&ada.id, &grace.id] {
        let input = ContactInput {
            name: None,
            number: Some("12345678".into()),
        };
        let updated = store.update_by_id(id, input).await.unwrap().unwrap();
        assert_eq!(updated.name, None);
    }

    let found = store.find_by_id(&ada.id).await.unwrap().unwrap();
    assert_eq!(found.name, None);
    assert_eq!(found.number.as_deref(), Some("12345678"));
    store.close().await;
}

#[tokio::test]
async fn duplicate_name_rejected() {
    let Some(store) = connect().await else { return };
    store
        .create(NewContact::new("Ada Lovelace", "12345678"))
        .await
        .unwrap();

    let err = store
        .create(NewContact::new("Ada Lovelace", "87654321"))
        .await
        .unwrap_err();
    match err {
        StoreError::Validation(e) => assert!(e.has_field("name")),
        other => panic!("expected validation error, got {other:?}"),
    }
    store.close().await;
}
