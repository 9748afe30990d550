//! PhonebookClient - thin HTTP wrapper over the contact routes.
//!
//! Requires the `client` feature. One call per route; no retries, caching
//! or request deduplication.
//!
//! ## Example
//!
//! ```ignore
//! use phonebook::{NewContact, PhonebookClient};
//!
//! let client = PhonebookClient::new("http://localhost:3001");
//! let ada = client.create_entry(&NewContact::new("Ada Lovelace", "12345678")).await?;
//! let everyone = client.get_all().await?;
//! client.remove_entry(&ada.id).await?;
//! ```

use reqwest::{Client, Response};
use serde::Deserialize;
use thiserror::Error;

use crate::contact::{Contact, NewContact};

/// Resource path of the contact routes.
pub const PERSONS_PATH: &str = "api/persons";

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport or decode failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server answered {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        message: Option<String>,
    },
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for the four contact operations.
#[derive(Debug, Clone)]
pub struct PhonebookClient {
    http: Client,
    base_url: String,
}

impl PhonebookClient {
    /// `base_url` is the server root, e.g. `http://localhost:3001`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Use an existing reqwest client (shared pool, custom timeouts).
    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn persons_url(&self) -> String {
        format!("{}/{}", self.base_url, PERSONS_PATH)
    }

    fn person_url(&self, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, PERSONS_PATH, id)
    }

    /// Fetch every contact.
    pub async fn get_all(&self) -> Result<Vec<Contact>, ClientError> {
        let response = self.http.get(self.persons_url()).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// Create a contact and return it with its assigned id.
    pub async fn create_entry(&self, entry: &NewContact) -> Result<Contact, ClientError> {
        let response = self.http.post(self.persons_url()).json(entry).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// Delete a contact. Returns the raw response.
    pub async fn remove_entry(&self, id: &str) -> Result<Response, ClientError> {
        let response = self.http.delete(self.person_url(id)).send().await?;
        check(response).await
    }

    /// Replace a contact's name and number.
    ///
    /// `None` when the server reports no contact with that id.
    pub async fn update_entry(
        &self,
        entry: &NewContact,
        id: &str,
    ) -> Result<Option<Contact>, ClientError> {
        let response = self.http.put(self.person_url(id)).json(entry).send().await?;
        Ok(check(response).await?.json().await?)
    }
}

/// Pass success responses through; turn the rest into `ClientError::Api`.
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .map(|body| body.error);
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
