use std::sync::{PoisonError, RwLock};

use crate::models::Credential;

use super::{StorageError, TokenStore};

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    credential: RwLock<Option<Credential>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential: RwLock::new(Some(credential)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, credential: &Credential) -> Result<(), StorageError> {
        *self.credential.write().unwrap_or_else(PoisonError::into_inner) = Some(credential.clone());
        Ok(())
    }

    fn read(&self) -> Option<Credential> {
        self.credential
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.credential.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_after_save() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.read(), None);

        let credential = Credential::new("abc").with_display_name("alice");
        store.save(&credential).unwrap();
        assert_eq!(store.read(), Some(credential));
        assert!(store.has_session());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = MemoryTokenStore::with_credential(Credential::new("abc"));
        store.clear().unwrap();
        assert_eq!(store.read(), None);
        store.clear().unwrap();
        assert_eq!(store.read(), None);
    }
}
