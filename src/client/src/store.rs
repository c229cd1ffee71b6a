//! Persisted client session (bearer token and user record)
//!
//! Permissions are never persisted; they are re-fetched with the profile.

use crate::error::{ClientError, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use taskboard_core::User;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl PersistedSession {
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.user.is_none()
    }
}

/// Storage for the persisted session
pub trait SessionStore: Send + Sync {
    /// Current contents; `None` when nothing is stored
    fn load(&self) -> Result<Option<PersistedSession>>;

    fn save_token(&self, token: &str) -> Result<()>;

    fn save_user(&self, user: &User) -> Result<()>;

    /// Forget both the token and the user
    fn clear(&self) -> Result<()>;

    fn token(&self) -> Result<Option<String>> {
        Ok(self.load()?.and_then(|session| session.token))
    }
}

/// JSON file store
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    // serializes read-modify-write within the process
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<PersistedSession>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<PersistedSession>(&contents) {
            Ok(session) if session.is_empty() => Ok(None),
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(
                    "Discarding malformed session file {}: {}",
                    self.path.display(),
                    e
                );
                self.remove()?;
                Ok(None)
            }
        }
    }

    fn write(&self, session: &PersistedSession) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, contents)?;
        debug!("Session written to {}", self.path.display());
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Store(format!(
                "failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn update(&self, apply: impl FnOnce(&mut PersistedSession)) -> Result<()> {
        let _guard = self.lock.lock();
        let mut session = self.read()?.unwrap_or_default();
        apply(&mut session);
        self.write(&session)
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<PersistedSession>> {
        let _guard = self.lock.lock();
        self.read()
    }

    fn save_token(&self, token: &str) -> Result<()> {
        self.update(|session| session.token = Some(token.to_string()))
    }

    fn save_user(&self, user: &User) -> Result<()> {
        self.update(|session| session.user = Some(user.clone()))
    }

    fn clear(&self) -> Result<()> {
        let _guard = self.lock.lock();
        self.remove()
    }
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<PersistedSession>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<PersistedSession>> {
        let session = self.session.lock();
        Ok((!session.is_empty()).then(|| session.clone()))
    }

    fn save_token(&self, token: &str) -> Result<()> {
        self.session.lock().token = Some(token.to_string());
        Ok(())
    }

    fn save_user(&self, user: &User) -> Result<()> {
        self.session.lock().user = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.session.lock() = PersistedSession::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::Role;

    #[test]
    fn test_memory_store() {
        let store = MemorySessionStore::new();
        assert_eq!(store.load().unwrap(), None);

        store.save_token("abc").unwrap();
        assert_eq!(store.token().unwrap().as_deref(), Some("abc"));

        store.save_user(&User::new("u1", "Ana", "ana@x.com", Role::Admin)).unwrap();
        let session = store.load().unwrap().unwrap();
        assert_eq!(session.user.unwrap().id, "u1");

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(store.token().unwrap(), None);
    }
}
