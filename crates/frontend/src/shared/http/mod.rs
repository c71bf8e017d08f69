//! HTTP access layer: request description, fetch client, typed errors.
//!
//! Feature API modules talk to [`Transport`] only, so they can run against the
//! browser client, the authenticated wrapper or an in-memory mock in tests.

pub mod cancel;
pub mod client;
pub mod error;
pub mod payload;
pub mod request;
pub mod transport;

#[cfg(test)]
pub mod mock;

pub use cancel::CancelToken;
pub use client::HttpClient;
pub use error::{ApiError, ApiErrorKind};
pub use payload::Payload;
pub use request::{ApiRequest, HttpMethod, RequestBody};
pub use transport::{execute, fetch, Transport};
