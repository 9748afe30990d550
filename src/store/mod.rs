//! Contact store - the document collection holding every contact.
//!
//! `ContactStore` is the persistence seam. The HTTP layer only ever sees an
//! `Arc<dyn ContactStore>`, built once at startup and closed on shutdown.
//!
//! Backends:
//! - [`InMemoryContactStore`]: a locked map, for tests and database-less runs.
//! - [`MongoContactStore`]: a MongoDB collection (requires the `mongo` feature).
//!
//! Every backend uses MongoDB ObjectIds as identifiers, so the identifier
//! syntax (24 hex digits) is the same whichever one is running.
//!
//! ## Example
//!
//! ```ignore
//! use phonebook::{ContactStore, InMemoryContactStore, NewContact};
//!
//! let store = InMemoryContactStore::new();
//! let ada = store.create(NewContact::new("Ada Lovelace", "12345678")).await?;
//! let found = store.find_by_id(&ada.id).await?;
//! assert_eq!(found, Some(ada));
//! ```

mod in_memory;
#[cfg(feature = "mongo")]
mod mongo;

use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::contact::{Contact, ContactInput, NewContact};
use crate::error::StoreError;

pub use in_memory::InMemoryContactStore;
#[cfg(feature = "mongo")]
pub use mongo::{MongoContactStore, DEFAULT_DATABASE};

/// CRUD access to the contact collection.
///
/// `None` results mean no record has that id; they are not errors.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Every stored contact, in store-native order.
    async fn list_all(&self) -> Result<Vec<Contact>, StoreError>;

    /// Look up one contact.
    async fn find_by_id(&self, id: &str) -> Result<Option<Contact>, StoreError>;

    /// Persist a new contact and return it with its assigned id.
    async fn create(&self, contact: NewContact) -> Result<Contact, StoreError>;

    /// Replace name and number wholesale, returning the post-update record.
    ///
    /// Fields absent from `contact` are stored as absent. Present fields are
    /// length-checked, and a present name must be unique.
    async fn update_by_id(
        &self,
        id: &str,
        contact: ContactInput,
    ) -> Result<Option<Contact>, StoreError>;

    /// Remove a contact, returning what was removed.
    async fn delete_by_id(&self, id: &str) -> Result<Option<Contact>, StoreError>;

    /// Number of stored contacts.
    async fn count(&self) -> Result<u64, StoreError>;

    /// Release connections. Called once, after the server stops.
    async fn close(&self) {}
}

/// Parse an external id into an ObjectId.
pub fn parse_id(raw: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(raw).map_err(|_| StoreError::InvalidIdentifier(raw.to_string()))
}
