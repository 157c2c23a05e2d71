//! Startup self-probe
//!
//! Before the listener is bound the service GETs its own list endpoint once
//! and logs what came back. Nothing is listening yet, so this normally logs a
//! connection error; it never stops startup.

use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use std::time::Duration;
use thiserror::Error;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("invalid probe url: {0}")]
    InvalidUrl(#[from] hyper::http::uri::InvalidUri),

    #[error("error sending GET request: {0}")]
    Request(#[from] hyper_util::client::legacy::Error),

    #[error("error reading response body: {0}")]
    Body(#[from] hyper::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

/// GET `url` and return the response body as text
pub async fn trigger_get(url: &str) -> Result<String, ProbeError> {
    let uri: hyper::Uri = url.parse()?;
    let client = Client::builder(TokioExecutor::new()).build_http::<Empty<Bytes>>();

    let fetch = async {
        let response = client.get(uri).await?;
        let body = response.into_body().collect().await?.to_bytes();
        Ok::<_, ProbeError>(String::from_utf8_lossy(&body).into_owned())
    };

    tokio::time::timeout(PROBE_TIMEOUT, fetch)
        .await
        .map_err(|_| ProbeError::Timeout(PROBE_TIMEOUT))?
}

/// Run the probe and log the outcome
pub async fn run(url: &str) {
    match trigger_get(url).await {
        Ok(body) => tracing::info!("startup probe response body: {}", body),
        Err(err) => tracing::warn!("startup probe to {} failed: {}", url, err),
    }
}
