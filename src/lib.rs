//! Phonebook service: contacts with a unique name and a phone number.
//!
//! - [`contact`]: the record, the write payloads and their validation.
//! - [`store`]: the `ContactStore` seam with in-memory and MongoDB backends.
//! - [`http`]: axum routes over an injected store handle.
//! - [`client`]: reqwest wrapper over the contact routes (`client` feature).
//! - [`config`]: environment configuration for the server binary.

pub mod config;
pub mod contact;
mod error;
pub mod http;
pub mod store;

#[cfg(feature = "client")]
pub mod client;

pub use config::{Config, ConfigError, Mode};
pub use contact::{Contact, ContactInput, MissingContent, NewContact, ValidationError};
pub use error::StoreError;
pub use store::{parse_id, ContactStore, InMemoryContactStore};

#[cfg(feature = "mongo")]
pub use store::MongoContactStore;

#[cfg(feature = "client")]
pub use client::{ClientError, PhonebookClient};
