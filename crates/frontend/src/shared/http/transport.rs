use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::payload::Payload;
use super::request::ApiRequest;

/// Sends one [`ApiRequest`] and normalizes the outcome.
///
/// Single-threaded: futures are `!Send` and run on the browser event loop.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<Payload, ApiError>;
}

/// Sends and decodes the body into `T`
pub async fn fetch<T: DeserializeOwned>(
    transport: &dyn Transport,
    request: ApiRequest,
) -> Result<T, ApiError> {
    let url = request.path.clone();
    transport.send(request).await?.decode(&url)
}

/// Sends and discards whatever body comes back
pub async fn execute(transport: &dyn Transport, request: ApiRequest) -> Result<(), ApiError> {
    transport.send(request).await.map(|_| ())
}
