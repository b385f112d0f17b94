//! Authentication module for managing the stored credential.
//!
//! This module provides:
//! - `TokenStore`: persistence contract for the bearer token and display name
//! - `FileTokenStore`, `KeyringTokenStore`, `MemoryTokenStore`: its backends
//! - `SessionGuard`: the per-view check that keeps protected views hidden
//!   from visitors without a credential
//!
//! A session is not stored on its own: it exists exactly when the store
//! holds a credential.

pub mod file;
pub mod guard;
pub mod keychain;
pub mod memory;
pub mod store;

pub use file::FileTokenStore;
pub use guard::{GuardState, SessionGuard};
pub use keychain::KeyringTokenStore;
pub use memory::MemoryTokenStore;
pub use store::{StorageError, TokenStore};
