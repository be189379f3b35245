//! Authentication module for holding and persisting the session token.
//!
//! This module provides:
//! - `Session`: the in-memory bearer token plus the store it mirrors into
//! - `TokenStore`: load/save/clear hooks supplied by the embedding program
//! - `FileTokenStore`, `KeyringTokenStore`, `MemoryTokenStore`: stock stores
//!
//! The token is read once when the session is created and only written back
//! on explicit set/remove.

pub mod session;
pub mod store;

pub use session::Session;
pub use store::{FileTokenStore, KeyringTokenStore, MemoryTokenStore, TokenStore, TOKEN_KEY};
