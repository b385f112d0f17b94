use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::models::Credential;

use super::{StorageError, TokenStore};

/// Session file name in cache directory
const SESSION_FILE: &str = "session.json";

/// Stores the credential as JSON in the cache directory.
///
/// The file is read on every call, so several processes (or a CLI logout
/// while the TUI runs) always agree on the current session.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(cache_dir: impl AsRef<Path>) -> Self {
        Self {
            path: cache_dir.as_ref().join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn save(&self, credential: &Credential) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(credential)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }

    fn read(&self) -> Option<Credential> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(error = %e, path = ?self.path, "Failed to read session file");
                return None;
            }
        };

        match serde_json::from_str::<Credential>(&contents) {
            Ok(credential) if !credential.token.is_empty() => Some(credential),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, path = ?self.path, "Failed to parse session file");
                None
            }
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "positions-file-store-{}-{}",
            std::process::id(),
            name
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_read_missing_file_is_absent() {
        let store = FileTokenStore::new(scratch_dir("missing"));
        assert_eq!(store.read(), None);
        assert!(!store.has_session());
    }

    #[test]
    fn test_save_then_read() {
        let dir = scratch_dir("roundtrip");
        let store = FileTokenStore::new(&dir);
        let credential = Credential::new("abc").with_display_name("alice");
        store.save(&credential).unwrap();
        assert_eq!(store.read(), Some(credential.clone()));

        // A second handle on the same directory sees the same session
        assert_eq!(FileTokenStore::new(&dir).read(), Some(credential));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_save_without_name_drops_old_name() {
        let dir = scratch_dir("rename");
        let store = FileTokenStore::new(&dir);
        store.save(&Credential::new("abc").with_display_name("alice")).unwrap();
        store.save(&Credential::new("def")).unwrap();
        assert_eq!(store.read(), Some(Credential::new("def")));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = scratch_dir("clear");
        let store = FileTokenStore::new(&dir);
        store.save(&Credential::new("abc")).unwrap();
        store.clear().unwrap();
        assert_eq!(store.read(), None);
        store.clear().unwrap();
        assert_eq!(store.read(), None);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_corrupt_file_reads_as_absent() {
        let dir = scratch_dir("corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        let store = FileTokenStore::new(&dir);
        std::fs::write(store.path(), "{not json").unwrap();
        assert_eq!(store.read(), None);
        let _ = std::fs::remove_dir_all(dir);
    }
}
