//! Data models for the Anteroom account API.
//!
//! This module contains the payloads exchanged with the account endpoints:
//!
//! - `UserCreate`, `UserRetrieve`: registration and login request bodies
//! - `UserProfile`: full user record returned by registration
//! - `Token`: bearer token issued after authentication

pub mod token;
pub mod user;

pub use token::Token;
pub use user::{UserCreate, UserProfile, UserRetrieve};
