//! Contact - the phonebook entry and the payloads used to write one.
//!
//! `Contact` is the public shape of a stored record: the store-assigned id
//! (as a hex string), the name and the number. Internal storage fields such as
//! the revision counter never appear here.
//!
//! ## Example
//!
//! ```ignore
//! use phonebook::{ContactInput, NewContact};
//!
//! let input: ContactInput = serde_json::from_str(r#"{"name":"Ada Lovelace"}"#)?;
//! assert!(input.require().is_err());
//!
//! let draft = NewContact::new("Ada Lovelace", "12345678");
//! phonebook::contact::validate(&draft)?;
//! ```

mod validation;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use validation::{
    validate, validate_replacement, FieldError, ValidationError, MIN_NAME_LEN, MIN_NUMBER_LEN,
};

/// The collection contacts are stored in.
pub const COLLECTION: &str = "people";

/// A persisted phonebook entry.
///
/// `name` and `number` are always set by create. An update that omits one
/// of them leaves it `None`, serialized as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Store-assigned identifier, hex encoded.
    pub id: String,
    pub name: Option<String>,
    pub number: Option<String>,
}

/// The fields written by create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    pub name: String,
    pub number: String,
}

impl NewContact {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
        }
    }
}

/// Request body for create and update.
///
/// Create passes it through [`ContactInput::require`]; update stores it as
/// is, replacing both fields wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
}

/// A required field was absent or empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("content missing")]
pub struct MissingContent;

impl ContactInput {
    /// Turn the loose body into a `NewContact`.
    ///
    /// Both `name` and `number` must be present and non-empty.
    pub fn require(self) -> Result<NewContact, MissingContent> {
        match (non_empty(self.name), non_empty(self.number)) {
            (Some(name), Some(number)) => Ok(NewContact { name, number }),
            _ => Err(MissingContent),
        }
    }
}

impl From<NewContact> for ContactInput {
    fn from(contact: NewContact) -> Self {
        Self {
            name: Some(contact.name),
            number: Some(contact.number),
        }
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}
