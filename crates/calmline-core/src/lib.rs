//! Calmline core - a typed client for the wellness backend.
//!
//! The `ApiClient` wraps every backend endpoint. When the backend cannot be
//! used, most endpoints return a locally synthesized payload marked
//! `offline: true` instead of an error; see `heuristics` for how those are
//! built.

pub mod api;
pub mod auth;
pub mod config;
pub mod heuristics;
pub mod models;

pub use api::{is_offline, ApiClient, ApiError, ApiRequest, NetworkStatus};
pub use auth::{FileTokenStore, KeyringTokenStore, MemoryTokenStore, Session, TokenStore};
pub use config::Config;
