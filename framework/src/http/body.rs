//! Body collection and parsing for HTTP requests

use crate::error::FrameworkError;
use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use serde::de::DeserializeOwned;

/// Collect a full body, failing with 413 once `limit` bytes are exceeded
pub async fn collect_body<B>(body: B, limit: usize) -> Result<Bytes, FrameworkError>
where
    B: hyper::body::Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    Limited::new(body, limit)
        .collect()
        .await
        .map(|collected| collected.to_bytes())
        .map_err(|e| {
            if e.is::<LengthLimitError>() {
                FrameworkError::payload_too_large(limit)
            } else {
                FrameworkError::internal(format!("Failed to read request body: {}", e))
            }
        })
}

/// Parse the first JSON value in `bytes` into the target type
///
/// Anything after the first value is ignored. An empty body is a 400 `EOF`;
/// otherwise the parser's own message is the error text returned to the client.
pub fn parse_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, FrameworkError> {
    match serde_json::Deserializer::from_slice(bytes).into_iter::<T>().next() {
        Some(value) => value.map_err(|e| FrameworkError::bad_request(e.to_string())),
        None => Err(FrameworkError::bad_request("EOF")),
    }
}
