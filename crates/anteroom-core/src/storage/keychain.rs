use anyhow::{Context, Result};
use keyring::Entry;

use super::KeyValueStore;

/// Service name entries are filed under in the OS keychain.
const SERVICE_NAME: &str = "anteroom";

/// OS keychain store via the `keyring` crate, one entry per key.
///
/// Preferred on platforms with a real keychain; shells without one fall
/// back to `FileStore`.
pub struct KeyringStore {
    service: &'static str,
}

impl KeyringStore {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME,
        }
    }

    fn entry(&self, key: &str) -> Result<Entry> {
        Entry::new(self.service, key).context("Failed to create keyring entry")
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for KeyringStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).context("Failed to read value from keychain"),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entry(key)?
            .set_password(value)
            .context("Failed to store value in keychain")
    }

    fn remove(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete value from keychain"),
        }
    }
}
