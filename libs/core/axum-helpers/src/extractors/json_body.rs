//! Lenient JSON body extractor.

use crate::errors::{AppError, messages};
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

/// JSON extractor that decodes the first JSON value in the body.
///
/// Unlike `axum::Json` it does not require a `Content-Type` header and
/// ignores anything after the first complete value. Every failure (unreadable
/// body, empty body, syntax or type error) rejects with
/// `400 Invalid request body`.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::JsonBody;
///
/// async fn create(JsonBody(input): JsonBody<CreateThing>) -> String {
///     format!("Creating {}", input.name)
/// }
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!("Failed to read request body: {}", e);
            invalid_body()
        })?;

        decode_first(&bytes).map(JsonBody)
    }
}

fn decode_first<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    serde_json::Deserializer::from_slice(bytes)
        .into_iter::<T>()
        .next()
        .ok_or_else(invalid_body)?
        .map_err(|e| {
            tracing::debug!("Failed to decode JSON body: {}", e);
            invalid_body()
        })
}

fn invalid_body() -> AppError {
    AppError::BadRequest(messages::INVALID_REQUEST_BODY.to_string())
}
