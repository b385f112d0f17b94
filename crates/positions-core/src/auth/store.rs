use thiserror::Error;

use crate::models::Credential;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to access token file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode token file: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Keychain error: {0}")]
    Keyring(#[from] keyring::Error),
}

/// Persistent home of the bearer credential.
///
/// Implementations must make a saved credential visible to every reader of
/// the same backend until `clear` is called, and must not hold a private
/// copy that could go stale: `read` always reflects the last `save`/`clear`.
pub trait TokenStore: Send + Sync {
    /// Persist the token and, separately, the display name.
    /// A credential without a display name removes any previously stored one.
    fn save(&self, credential: &Credential) -> Result<(), StorageError>;

    /// The stored credential, if a token is present. Never mutates storage.
    fn read(&self) -> Option<Credential>;

    /// Remove token and display name. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), StorageError>;

    /// Check if a session currently exists
    fn has_session(&self) -> bool {
        self.read().is_some()
    }
}
