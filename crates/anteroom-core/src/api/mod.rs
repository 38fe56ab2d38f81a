//! Auth client module for the Anteroom account service.
//!
//! This module provides the `AuthClient` for registering accounts,
//! exchanging credentials for a bearer token, and ending the local
//! session. The client owns the observable login state and writes the
//! token through an injected `KeyValueStore`.

pub mod client;
pub mod error;

pub use client::AuthClient;
pub use error::ApiError;
