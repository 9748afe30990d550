use std::error::Error;

use thiserror::Error;

use crate::contact::ValidationError;

/// Error type for contact store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The id is not in the store's identifier syntax.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A write broke a field constraint.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Driver, connection or lock failure.
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn Error + Send + Sync>),
}

impl StoreError {
    pub fn storage(err: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        StoreError::Storage(err.into())
    }
}
