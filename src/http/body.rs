//! Request body extraction for contact writes.

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;

use super::error::ApiError;
use crate::contact::ContactInput;

/// A contact write body.
///
/// A request that is not JSON, or whose JSON body is empty, carries no
/// fields and yields `ContactInput::default()`.
#[derive(Debug)]
pub struct ContactBody(pub ContactInput);

#[async_trait]
impl<S> FromRequest<S> for ContactBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = is_json(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::MalformedPayload(e.body_text()))?;
        parse(json, &bytes).map(ContactBody)
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

fn parse(json: bool, bytes: &[u8]) -> Result<ContactInput, ApiError> {
    if !json || bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(ContactInput::default());
    }
    serde_json::from_slice(bytes).map_err(|e| {
        ApiError::MalformedPayload(format!("Failed to parse the request body as JSON: {e}"))
    })
}
