//! Explicit session state for the remote task service.
//!
//! The bearer token lives in a `token` file under the data directory:
//! read on startup, written on login/signup, removed on logout. The
//! session is injected into [`crate::api::ApiClient`] rather than
//! looked up ambiently, so there is exactly one place that knows
//! where the token comes from.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};
use crate::storage::data_dir;

const TOKEN_FILE: &str = "token";

/// Current authentication state.
#[derive(Debug, Clone)]
pub struct Session {
    token: Option<String>,
    path: Option<PathBuf>,
}

impl Session {
    /// Load the session from the default token file.
    pub fn load() -> Result<Self> {
        let dir = data_dir().map_err(CoreError::Io)?;
        Self::load_from(dir.join(TOKEN_FILE))
    }

    /// Load the session from a specific token file. A missing file
    /// means an unauthenticated session, not an error.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let token = match fs::read_to_string(&path) {
            Ok(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            token,
            path: Some(path),
        })
    }

    /// An in-memory session that never touches disk.
    pub fn with_token(token: Option<String>) -> Self {
        Self { token, path: None }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Store a new token, persisting it when the session is backed
    /// by a file.
    pub fn store(&mut self, token: &str) -> Result<()> {
        if let Some(path) = &self.path {
            fs::write(path, token)?;
        }
        self.token = Some(token.to_string());
        Ok(())
    }

    /// Forget the token and remove the token file.
    pub fn clear(&mut self) -> Result<()> {
        if let Some(path) = &self.path {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }
        self.token = None;
        Ok(())
    }
}
