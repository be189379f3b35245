//! REST API client module for the wellness backend.
//!
//! This module provides the `ApiClient` for talking to the backend's
//! analytics, AI, collaboration and speech endpoints, the closed `ApiError`
//! taxonomy every call fails with, and the fallback plumbing that lets most
//! endpoints keep working offline.
//!
//! The API uses bearer token authentication; the token is held by the
//! client's `Session`.

pub mod client;
pub mod error;
pub mod fallback;
pub mod network;
pub mod request;

pub use client::ApiClient;
pub use error::{ApiError, NETWORK_ERROR_MESSAGE, TIMEOUT_ERROR_MESSAGE};
pub use fallback::{handle_api_error, with_fallback};
pub use network::{is_offline, NetworkStatus};
pub use request::ApiRequest;
