//! Bearer-token persistence.
//!
//! One string value under a fixed per-user path, the terminal analogue of
//! the browser's origin-scoped key-value storage. No expiry logic lives
//! here; this layer is storage only, [`super::claims`] interprets the
//! token.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use tracing::debug;

/// File name of the persisted token inside the runtime directory.
const TOKEN_FILE: &str = "token";

/// Reads, writes, and clears the persisted bearer token.
#[derive(Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("path", &self.path)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl TokenStore {
    /// A store backed by an explicit file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The default store at `~/.aerodesk/token`.
    ///
    /// # Errors
    ///
    /// Returns an error when the home directory cannot be resolved.
    pub fn default_store() -> anyhow::Result<Self> {
        let paths = crate::config::runtime_paths()?;
        Ok(Self::new(paths.runtime_dir.join(TOKEN_FILE)))
    }

    /// Persist the token, creating the parent directory when needed.
    ///
    /// The file is restricted to the current user on Unix.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory or file cannot be written.
    pub fn save(&self, token: &str) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&self.path, token)
            .with_context(|| format!("failed to write token to {}", self.path.display()))?;
        enforce_private_permissions(&self.path)?;
        debug!(path = %self.path.display(), "token saved");
        Ok(())
    }

    /// The stored token, or `None` when absent, empty, or unreadable.
    pub fn read(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(trimmed.to_owned())
    }

    /// Remove the stored token. Clearing an absent token is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be removed.
    pub fn clear(&self) -> anyhow::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "token cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to remove {}", self.path.display())),
        }
    }
}

#[cfg(unix)]
fn enforce_private_permissions(path: &std::path::Path) -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let perms = fs::Permissions::from_mode(0o600);
    fs::set_permissions(path, perms)
        .with_context(|| format!("failed to set permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn enforce_private_permissions(_path: &std::path::Path) -> anyhow::Result<()> {
    Ok(())
}
