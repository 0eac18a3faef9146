//! Stable per-profile client identity.
//!
//! The server keys its sessions on an opaque token sent with every request.
//! The token is created once, persisted in a profile file, and reused for
//! the lifetime of that profile. It correlates requests to a session; it is
//! not a credential.

use std::fmt;
use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::Result;

/// Opaque client identity token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientIdentity(Uuid);

impl ClientIdentity {
    /// Generate a fresh random identity that is not persisted anywhere.
    pub fn ephemeral() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing token.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Load the identity stored at `path`, creating and persisting a new one
    /// if the file is missing or unreadable as a token.
    ///
    /// # Errors
    ///
    /// Returns [`OthelloError::Io`](crate::OthelloError::Io) if a new identity
    /// cannot be written to `path`.
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(contents) => match Uuid::parse_str(contents.trim()) {
                Ok(id) => {
                    debug!(path = %path.display(), "loaded client identity");
                    return Ok(Self(id));
                }
                Err(e) => {
                    warn!(path = %path.display(), "stored client identity is corrupt, replacing: {e}");
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let identity = Self::ephemeral();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, identity.to_string())?;
        info!(path = %path.display(), "created client identity");
        Ok(identity)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}
