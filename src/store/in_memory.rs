//! InMemoryContactStore - map-backed contact store for tests and development.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use bson::oid::ObjectId;

use super::{parse_id, ContactStore};
use crate::contact::{
    validate, validate_replacement, Contact, ContactInput, FieldError, NewContact, ValidationError,
};
use crate::error::StoreError;

/// Internal stored representation of a contact.
struct StoredContact {
    name: Option<String>,
    number: Option<String>,
    revision: u64,
}

impl StoredContact {
    fn to_contact(&self, id: &ObjectId) -> Contact {
        Contact {
            id: id.to_hex(),
            name: self.name.clone(),
            number: self.number.clone(),
        }
    }
}

type Storage = BTreeMap<ObjectId, StoredContact>;

/// In-memory contact store.
///
/// Keyed by ObjectId, so listing returns contacts in creation order.
/// Clone-friendly via Arc; clones share the same contacts.
#[derive(Clone, Default)]
pub struct InMemoryContactStore {
    storage: Arc<RwLock<Storage>>,
}

impl InMemoryContactStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current internal revision of a contact, if it exists.
    pub fn revision(&self, id: &str) -> Result<Option<u64>, StoreError> {
        let id = parse_id(id)?;
        Ok(self.read()?.get(&id).map(|stored| stored.revision))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Storage>, StoreError> {
        self.storage
            .read()
            .map_err(|_| StoreError::storage("lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Storage>, StoreError> {
        self.storage
            .write()
            .map_err(|_| StoreError::storage("lock poisoned"))
    }
}

/// Fail if another contact (other than `except`) already has `name`.
///
/// Absent names are not compared.
fn ensure_unique(
    storage: &Storage,
    name: &str,
    except: Option<&ObjectId>,
) -> Result<(), ValidationError> {
    let taken = storage
        .iter()
        .any(|(id, stored)| stored.name.as_deref() == Some(name) && Some(id) != except);

    if taken {
        Err(ValidationError::single(FieldError::not_unique("name", name)))
    } else {
        Ok(())
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn list_all(&self) -> Result<Vec<Contact>, StoreError> {
        let storage = self.read()?;
        Ok(storage
            .iter()
            .map(|(id, stored)| stored.to_contact(id))
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Contact>, StoreError> {
        let id = parse_id(id)?;
        let storage = self.read()?;
        Ok(storage.get(&id).map(|stored| stored.to_contact(&id)))
    }

    async fn create(&self, contact: NewContact) -> Result<Contact, StoreError> {
        validate(&contact)?;

        let mut storage = self.write()?;
        ensure_unique(&storage, &contact.name, None)?;

        let id = ObjectId::new();
        let stored = StoredContact {
            name: Some(contact.name),
            number: Some(contact.number),
            revision: 0,
        };
        let created = stored.to_contact(&id);
        storage.insert(id, stored);

        Ok(created)
    }

    async fn update_by_id(
        &self,
        id: &str,
        contact: ContactInput,
    ) -> Result<Option<Contact>, StoreError> {
        let id = parse_id(id)?;
        validate_replacement(&contact)?;

        let mut storage = self.write()?;
        if !storage.contains_key(&id) {
            return Ok(None);
        }
        if let Some(name) = &contact.name {
            ensure_unique(&storage, name, Some(&id))?;
        }

        let updated = storage.get_mut(&id).map(|stored| {
            stored.name = contact.name;
            stored.number = contact.number;
            stored.revision += 1;
            stored.to_contact(&id)
        });

        Ok(updated)
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Contact>, StoreError> {
        let id = parse_id(id)?;
        let mut storage = self.write()?;
        Ok(storage.remove(&id).map(|stored| stored.to_contact(&id)))
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.read()?.len() as u64)
    }
}
