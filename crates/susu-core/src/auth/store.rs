//! Persisted credential storage.
//!
//! Stores the bearer credential pair in `<SUSU_HOME>/tokens.json` with
//! restricted permissions (0600). Tokens are never logged or displayed in
//! full. An in-memory copy mirrors the file so the gateway's request path
//! never touches the filesystem; mutations write through.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// A bearer credential pair as issued by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
    /// The access token (short-lived, carries role/subject claims).
    pub access_token: String,
    /// The refresh token (longer-lived, opaque).
    pub refresh_token: String,
}

/// Process-wide credential slot backed by a JSON file.
#[derive(Debug)]
pub struct TokenStore {
    path: PathBuf,
    cached: RwLock<Option<CredentialPair>>,
}

impl TokenStore {
    /// Opens the store at the default location.
    ///
    /// # Errors
    /// Returns an error if an existing credential file cannot be read or parsed.
    pub fn open_default() -> Result<Self> {
        Self::open(paths::tokens_path())
    }

    /// Opens a store backed by a specific file, loading it if present.
    ///
    /// # Errors
    /// Returns an error if an existing credential file cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let cached = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read credentials from {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse credentials from {}", path.display()))?
        } else {
            None
        };

        Ok(Self {
            path,
            cached: RwLock::new(cached),
        })
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the current access token, if any.
    pub fn access_token(&self) -> Option<String> {
        self.read_cache().map(|pair| pair.access_token)
    }

    /// Returns the current refresh token, if any.
    pub fn refresh_token(&self) -> Option<String> {
        self.read_cache().map(|pair| pair.refresh_token)
    }

    /// Returns the full credential pair, if any.
    pub fn credentials(&self) -> Option<CredentialPair> {
        self.read_cache()
    }

    /// Returns true if a credential pair is currently stored.
    pub fn is_authenticated(&self) -> bool {
        self.read_cache().is_some()
    }

    /// Stores a new credential pair and persists it with 0600 permissions.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn set(&self, pair: CredentialPair) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(&pair).context("Failed to serialize credentials")?;
        self.write_file(&contents)?;
        *self.write_cache() = Some(pair);
        Ok(())
    }

    /// Clears the stored credential pair. Returns true if one was present.
    ///
    /// # Errors
    /// Returns an error if the file cannot be removed.
    pub fn clear(&self) -> Result<bool> {
        let had_creds = self.write_cache().take().is_some();
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        }
        Ok(had_creds)
    }

    fn read_cache(&self) -> Option<CredentialPair> {
        self.cached
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn write_cache(&self) -> std::sync::RwLockWriteGuard<'_, Option<CredentialPair>> {
        self.cached
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write_file(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        // Write with restricted permissions
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }
}

/// Returns a masked version of a token for display (first 12 chars + ...).
pub fn mask_token(token: &str) -> String {
    if token.len() <= 16 {
        return "***".to_string();
    }
    format!("{}...", &token[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(access: &str, refresh: &str) -> CredentialPair {
        CredentialPair {
            access_token: access.to_string(),
            refresh_token: refresh.to_string(),
        }
    }

    /// Test: set then reopen round-trips through the file.
    #[test]
    fn test_persistence_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");

        let store = TokenStore::open(&path).unwrap();
        assert!(!store.is_authenticated());

        store.set(pair("access-1", "refresh-1")).unwrap();

        let reopened = TokenStore::open(&path).unwrap();
        assert_eq!(reopened.access_token().as_deref(), Some("access-1"));
        assert_eq!(reopened.refresh_token().as_deref(), Some("refresh-1"));
    }

    /// Test: clear removes both the cache and the file.
    #[test]
    fn test_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");

        let store = TokenStore::open(&path).unwrap();
        store.set(pair("a", "r")).unwrap();
        assert!(path.exists());

        assert!(store.clear().unwrap());
        assert!(!path.exists());
        assert!(store.access_token().is_none());

        // Clearing an empty store reports nothing was present.
        assert!(!store.clear().unwrap());
    }

    /// Test: credential file has restricted permissions on Unix.
    #[cfg(unix)]
    #[test]
    fn test_token_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");

        let store = TokenStore::open(&path).unwrap();
        store.set(pair("access", "refresh")).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600, "tokens.json should have 0600 permissions");
    }

    /// Test: token masking never reveals short tokens.
    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("susu-access-token-1234567890"), "susu-access-...");
        assert_eq!(mask_token("short"), "***");
    }
}
