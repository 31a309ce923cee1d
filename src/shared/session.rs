use std::{
  fs,
  io::ErrorKind,
  path::{Path, PathBuf},
  sync::RwLock,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::SessionError;

/// Where a bearer token lives. `Local` survives restarts, `Session` does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenScope {
  Local,
  Session,
}

pub trait TokenStore: Send + Sync {
  fn read(&self) -> Result<Option<String>, SessionError>;
  fn write(&self, token: &str) -> Result<(), SessionError>;
  fn clear(&self) -> Result<(), SessionError>;
}

#[derive(Default)]
pub struct MemoryTokenStore {
  token: RwLock<Option<String>>,
}

impl TokenStore for MemoryTokenStore {
  fn read(&self) -> Result<Option<String>, SessionError> {
    let token = self.token.read().map_err(|_| SessionError::Poisoned)?;
    Ok(token.clone())
  }

  fn write(&self, token: &str) -> Result<(), SessionError> {
    *self.token.write().map_err(|_| SessionError::Poisoned)? =
      Some(token.to_string());
    Ok(())
  }

  fn clear(&self) -> Result<(), SessionError> {
    *self.token.write().map_err(|_| SessionError::Poisoned)? = None;
    Ok(())
  }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
  token: String,
  saved_at: DateTime<Utc>,
}

/// Token persisted as a small JSON document on disk.
pub struct FileTokenStore {
  path: PathBuf,
}

impl FileTokenStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl TokenStore for FileTokenStore {
  fn read(&self) -> Result<Option<String>, SessionError> {
    let content = match fs::read_to_string(&self.path) {
      Ok(content) => content,
      Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
      Err(error) => return Err(error.into()),
    };
    let stored: StoredToken = serde_json::from_str(&content)?;
    Ok(Some(stored.token).filter(|token| !token.is_empty()))
  }

  fn write(&self, token: &str) -> Result<(), SessionError> {
    if let Some(parent) = self.path.parent() {
      fs::create_dir_all(parent)?;
    }
    let stored = StoredToken {
      token: token.to_string(),
      saved_at: Utc::now(),
    };
    fs::write(&self.path, serde_json::to_vec_pretty(&stored)?)?;
    Ok(())
  }

  fn clear(&self) -> Result<(), SessionError> {
    match fs::remove_file(&self.path) {
      Err(error) if error.kind() != ErrorKind::NotFound => Err(error.into()),
      _ => Ok(()),
    }
  }
}

/// Holds the bearer token for the auth service and the session hook. Reading,
/// storing and clearing are the only ways to touch it.
pub struct SessionContext {
  local: Box<dyn TokenStore>,
  session: Box<dyn TokenStore>,
}

impl SessionContext {
  pub fn new(local: Box<dyn TokenStore>, session: Box<dyn TokenStore>) -> Self {
    Self { local, session }
  }

  pub fn with_token_file(path: impl Into<PathBuf>) -> Self {
    Self::new(
      Box::new(FileTokenStore::new(path)),
      Box::new(MemoryTokenStore::default()),
    )
  }

  pub fn in_memory() -> Self {
    Self::new(
      Box::new(MemoryTokenStore::default()),
      Box::new(MemoryTokenStore::default()),
    )
  }

  fn store(&self, scope: TokenScope) -> &dyn TokenStore {
    match scope {
      TokenScope::Local => self.local.as_ref(),
      TokenScope::Session => self.session.as_ref(),
    }
  }

  /// Current token, long-lived scope first. An unreadable store counts as no
  /// token at all.
  pub fn token(&self) -> Option<String> {
    [TokenScope::Local, TokenScope::Session]
      .into_iter()
      .find_map(|scope| match self.store(scope).read() {
        Ok(token) => token,
        Err(error) => {
          tracing::warn!(?scope, %error, "could not read stored token");
          None
        }
      })
  }

  pub fn store_token(
    &self,
    scope: TokenScope,
    token: &str,
  ) -> Result<(), SessionError> {
    self.store(scope).write(token)
  }

  /// Removes the token from both scopes.
  pub fn clear(&self) -> Result<(), SessionError> {
    let local = self.local.clear();
    let session = self.session.clear();
    local.and(session)
  }
}
