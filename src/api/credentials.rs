//! Storage for the bearer token attached to API requests.
//!
//! The token is written by an external login flow and only read or evicted here.

use async_trait::async_trait;
use log::debug;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::entity::{BoardError, BoardResult};

/// Storage key of the bearer token
pub const ACCESS_TOKEN_KEY: &str = "ACCESS_TOKEN";

/// Source of the per-request credential.
#[async_trait]
pub trait CredentialProvider: Send + Sync + std::fmt::Debug {
    /// Loads the stored token, if any.
    async fn get(&self) -> BoardResult<Option<String>>;

    /// Saves a token, replacing the previous one.
    async fn store(&self, token: &str) -> BoardResult<()>;

    /// Removes the stored token.
    async fn clear(&self) -> BoardResult<()>;
}

/// In-memory token storage for testing and development.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: RwLock<Option<String>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl CredentialProvider for MemoryCredentialStore {
    async fn get(&self) -> BoardResult<Option<String>> {
        let guard = self
            .token
            .read()
            .map_err(|e| BoardError::Credentials(format!("Lock poisoned: {e}")))?;
        Ok(guard.clone())
    }

    async fn store(&self, token: &str) -> BoardResult<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|e| BoardError::Credentials(format!("Lock poisoned: {e}")))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> BoardResult<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|e| BoardError::Credentials(format!("Lock poisoned: {e}")))?;
        *guard = None;
        Ok(())
    }
}

/// Durable key/value storage in a JSON file, the token lives under `ACCESS_TOKEN`.
///
/// Other keys in the file are preserved on every write.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> BoardResult<Map<String, Value>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Map::new()),
            Ok(bytes) => match serde_json::from_slice::<Value>(&bytes)? {
                Value::Object(entries) => Ok(entries),
                _ => Err(BoardError::Credentials(format!(
                    "{} does not hold a JSON object",
                    self.path.display()
                ))),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_entries(&self, entries: Map<String, Value>) -> BoardResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let bytes = serde_json::to_vec_pretty(&Value::Object(entries))?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl CredentialProvider for FileCredentialStore {
    async fn get(&self) -> BoardResult<Option<String>> {
        let entries = self.read_entries().await?;
        Ok(entries
            .get(ACCESS_TOKEN_KEY)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_string))
    }

    async fn store(&self, token: &str) -> BoardResult<()> {
        let mut entries = self.read_entries().await?;
        entries.insert(ACCESS_TOKEN_KEY.to_string(), Value::String(token.to_string()));
        self.write_entries(entries).await
    }

    async fn clear(&self) -> BoardResult<()> {
        let mut entries = self.read_entries().await?;
        if entries.remove(ACCESS_TOKEN_KEY).is_none() {
            debug!("No access token stored in {}", self.path.display());
            return Ok(());
        }
        self.write_entries(entries).await
    }
}
