//! On-disk session (bearer token + cached user).
//!
//! Only the login/logout commands write here. The discovery pipeline gets
//! an already-loaded [`SessionContext`].

use std::fs;
use std::path::{Path, PathBuf};

use skillbridge_core::SessionContext;
use tracing::debug;

use crate::config::SkillBridgeConfig;
use crate::error::{ClientError, Result};

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &SkillBridgeConfig) -> Self {
        Self::new(config.session_path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load(&self) -> Result<SessionContext> {
        if !self.path.exists() {
            return Err(ClientError::MissingSession(self.path.display().to_string()));
        }
        let text = fs::read_to_string(&self.path)?;
        let session: SessionContext = serde_json::from_str(&text)?;
        debug!(user.id = session.user_id(), path = %self.path.display(), "Session loaded");
        Ok(session)
    }

    pub fn save(&self, session: &SessionContext) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, text)?;
        restrict_permissions(&self.path)?;
        Ok(())
    }

    /// Remove the stored session. Returns whether a file was removed.
    pub fn clear(&self) -> Result<bool> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
