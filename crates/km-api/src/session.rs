use std::{
    fmt,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    constants::FALLBACK_EMAIL,
    error::{ActionError, LoadError, SaveError},
};

/// A logged-in user: the bearer token and the email it belongs to.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    token: String,
    email: String,
}

impl Session {
    /// Falls back to a placeholder email when none is known.
    pub fn new(token: &str, email: Option<&str>) -> Self {
        let email = email
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .unwrap_or(FALLBACK_EMAIL);
        Self {
            token: token.to_owned(),
            email: email.to_owned(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Display name: the part of the email before `@`.
    pub fn username(&self) -> &str {
        self.email.split('@').next().unwrap_or_default()
    }

    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let file_contents = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(file_contents.as_str())?)
    }

    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SaveError> {
        let serialized = serde_json::to_string(self)?;
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(path, serialized).await?;
        Ok(())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("email", &self.email)
            .finish()
    }
}

/// Owns the current session and its on-disk copy.
///
/// `login` and `logout` are the only ways in and out of a session; nothing
/// else holds the token.
#[derive(Debug, Default)]
pub struct SessionManager {
    path: Option<PathBuf>,
    current: Option<Session>,
}

impl SessionManager {
    /// A manager that never touches the disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Restore the session saved at `path`. A missing file means logged out.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, LoadError> {
        let path = path.into();
        let current = match Session::load(&path).await {
            Ok(session) => Some(session),
            Err(LoadError::ReadError(e)) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e),
        };
        Ok(Self {
            path: Some(path),
            current,
        })
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// The current session, or [`ActionError::NotLoggedIn`].
    pub fn require(&self) -> Result<&Session, ActionError> {
        self.current.as_ref().ok_or(ActionError::NotLoggedIn)
    }

    pub async fn login(&mut self, session: Session) -> Result<&Session, SaveError> {
        if let Some(path) = &self.path {
            session.save(path).await?;
        }
        info!(email = session.email(), "logged in");
        Ok(&*self.current.insert(session))
    }

    pub async fn logout(&mut self) -> Result<(), std::io::Error> {
        if let Some(path) = &self.path {
            match tokio::fs::remove_file(path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
        if let Some(session) = self.current.take() {
            info!(email = session.email(), "logged out");
        }
        Ok(())
    }
}
