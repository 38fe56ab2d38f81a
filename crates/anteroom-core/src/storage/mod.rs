//! Local key-value storage for the persisted session token.
//!
//! This module provides:
//! - `KeyValueStore`: the storage seam the auth client writes through
//! - `MemoryStore`: in-process store for tests and ephemeral sessions
//! - `FileStore`: one JSON file per key under a storage directory
//! - `KeyringStore`: OS keychain storage via keyring
//!
//! The session token lives under the fixed `TOKEN_KEY` key; an absent key
//! means logged out.

pub mod file;
pub mod keychain;
pub mod memory;

pub use file::FileStore;
pub use keychain::KeyringStore;
pub use memory::MemoryStore;

use anyhow::Result;

/// Storage key for the persisted access token.
pub const TOKEN_KEY: &str = "token";

/// Minimal key-value storage seam used by the auth client.
///
/// `set` is a whole-value overwrite and `remove` of an absent key succeeds,
/// so callers never need to check for a prior value.
pub trait KeyValueStore: Send + Sync {
    /// Read the value for `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` for `key`, replacing any existing value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> Result<()>;
}
