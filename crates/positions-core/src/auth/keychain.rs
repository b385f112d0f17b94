use keyring::Entry;
use tracing::warn;

use crate::models::Credential;

use super::{StorageError, TokenStore};

const SERVICE_NAME: &str = "positions-tui";
const TOKEN_ENTRY: &str = "access_token";
const DISPLAY_NAME_ENTRY: &str = "display_name";

/// Stores the credential in the OS keychain, token and display name as two
/// separate entries.
#[derive(Debug, Clone)]
pub struct KeyringTokenStore {
    service: String,
}

impl Default for KeyringTokenStore {
    fn default() -> Self {
        Self::new(SERVICE_NAME)
    }
}

impl KeyringTokenStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<Entry, StorageError> {
        Ok(Entry::new(&self.service, key)?)
    }

    fn get(&self, key: &str) -> Option<String> {
        let result = self
            .entry(key)
            .and_then(|e| e.get_password().map_err(StorageError::from));
        match result {
            Ok(value) => Some(value),
            Err(StorageError::Keyring(keyring::Error::NoEntry)) => None,
            Err(e) => {
                warn!(error = %e, key, "Failed to read keychain entry");
                None
            }
        }
    }

    /// Delete an entry, treating a missing one as already deleted
    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl TokenStore for KeyringTokenStore {
    fn save(&self, credential: &Credential) -> Result<(), StorageError> {
        self.entry(TOKEN_ENTRY)?.set_password(&credential.token)?;
        match credential.display_name {
            Some(ref name) => self.entry(DISPLAY_NAME_ENTRY)?.set_password(name)?,
            None => self.remove(DISPLAY_NAME_ENTRY)?,
        }
        Ok(())
    }

    fn read(&self) -> Option<Credential> {
        let token = self.get(TOKEN_ENTRY).filter(|t| !t.is_empty())?;
        Some(Credential {
            token,
            display_name: self.get(DISPLAY_NAME_ENTRY),
        })
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.remove(TOKEN_ENTRY)?;
        self.remove(DISPLAY_NAME_ENTRY)
    }
}
