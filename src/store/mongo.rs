//! MongoContactStore - contacts in a MongoDB collection.

use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::{Client, Collection, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{parse_id, ContactStore};
use crate::contact::{
    validate, validate_replacement, Contact, ContactInput, FieldError, NewContact, ValidationError,
    COLLECTION,
};
use crate::error::StoreError;

/// Database used when the connection string does not name one.
pub const DEFAULT_DATABASE: &str = "phonebook";

const DUPLICATE_KEY: i32 = 11000;

/// Stored document layout: `{_id, name, number, __v}`.
///
/// `name` and `number` are null after an update that omitted them.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersonDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    number: Option<String>,
    #[serde(rename = "__v", default)]
    revision: i64,
}

impl From<PersonDocument> for Contact {
    fn from(doc: PersonDocument) -> Self {
        Contact {
            id: doc.id.to_hex(),
            name: doc.name,
            number: doc.number,
        }
    }
}

impl From<MongoError> for StoreError {
    fn from(err: MongoError) -> Self {
        StoreError::storage(err)
    }
}

/// Contact store backed by a MongoDB collection.
///
/// The driver pools connections internally; clones share the pool.
#[derive(Clone)]
pub struct MongoContactStore {
    client: Client,
    people: Collection<PersonDocument>,
}

impl MongoContactStore {
    /// Connect, verify the server answers, and ensure the unique `name` index.
    ///
    /// The index only covers string names, so contacts whose name was
    /// cleared by an update do not collide.
    ///
    /// The database is taken from the connection string, falling back to
    /// `database` and then [`DEFAULT_DATABASE`].
    pub async fn connect(uri: &str, database: Option<&str>) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client = Client::with_options(options)?;
        let db = client
            .default_database()
            .unwrap_or_else(|| client.database(database.unwrap_or(DEFAULT_DATABASE)));

        info!(database = db.name(), "Connecting to MongoDB");
        db.run_command(doc! { "ping": 1 }, None).await?;

        let people = db.collection::<PersonDocument>(COLLECTION);
        let index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .partial_filter_expression(doc! { "name": { "$type": "string" } })
                    .build(),
            )
            .build();
        people.create_index(index, None).await?;

        info!(collection = COLLECTION, "Connected to MongoDB");
        Ok(Self { client, people })
    }

    async fn ensure_unique(&self, name: &str, except: Option<ObjectId>) -> Result<(), StoreError> {
        let mut filter = doc! { "name": name };
        if let Some(id) = except {
            filter.insert("_id", doc! { "$ne": id });
        }

        match self.people.find_one(filter, None).await? {
            Some(_) => Err(not_unique(name)),
            None => Ok(()),
        }
    }
}

fn by_id(id: ObjectId) -> Document {
    doc! { "_id": id }
}

fn not_unique(name: &str) -> StoreError {
    ValidationError::single(FieldError::not_unique("name", name)).into()
}

/// The unique index rejected a write that raced the lookup.
fn is_duplicate_key(err: &MongoError) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
        _ => false,
    }
}

fn write_error(err: MongoError, name: Option<&str>) -> StoreError {
    match name {
        Some(name) if is_duplicate_key(&err) => {
            warn!(name, "Duplicate name rejected by unique index");
            not_unique(name)
        }
        _ => err.into(),
    }
}

#[async_trait]
impl ContactStore for MongoContactStore {
    async fn list_all(&self) -> Result<Vec<Contact>, StoreError> {
        let mut cursor = self.people.find(None, None).await?;
        let mut contacts = Vec::new();
        while cursor.advance().await? {
            let doc = cursor.deserialize_current()?;
            contacts.push(Contact::from(doc));
        }
        Ok(contacts)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Contact>, StoreError> {
        let id = parse_id(id)?;
        let found = self.people.find_one(by_id(id), None).await?;
        Ok(found.map(Contact::from))
    }

    async fn create(&self, contact: NewContact) -> Result<Contact, StoreError> {
        validate(&contact)?;
        self.ensure_unique(&contact.name, None).await?;

        let doc = PersonDocument {
            id: ObjectId::new(),
            name: Some(contact.name),
            number: Some(contact.number),
            revision: 0,
        };
        self.people
            .insert_one(&doc, None)
            .await
            .map_err(|e| write_error(e, doc.name.as_deref()))?;

        debug!(id = %doc.id, "Contact created");
        Ok(doc.into())
    }

    async fn update_by_id(
        &self,
        id: &str,
        contact: ContactInput,
    ) -> Result<Option<Contact>, StoreError> {
        let id = parse_id(id)?;
        validate_replacement(&contact)?;

        if self.people.find_one(by_id(id), None).await?.is_none() {
            return Ok(None);
        }
        if let Some(name) = &contact.name {
            self.ensure_unique(name, Some(id)).await?;
        }

        let update = doc! {
            "$set": { "name": contact.name.as_deref(), "number": contact.number.as_deref() },
            "$inc": { "__v": 1 },
        };
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .people
            .find_one_and_update(by_id(id), update, options)
            .await
            .map_err(|e| write_error(e, contact.name.as_deref()))?;

        Ok(updated.map(Contact::from))
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Contact>, StoreError> {
        let id = parse_id(id)?;
        let deleted = self.people.find_one_and_delete(by_id(id), None).await?;
        Ok(deleted.map(Contact::from))
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.people.count_documents(None, None).await?)
    }

    async fn close(&self) {
        info!("Closing MongoDB connection");
        self.client.clone().shutdown().await;
    }
}
