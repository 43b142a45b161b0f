//! Authenticated session state and its on-disk form.
//!
//! [`SessionState`] is owned by the caller and mutated through explicit methods.
//! Persistence is a separate step: only [`PersistedSession`] (everything but the
//! transient loading flag) is written, as JSON, by [`SessionStore`].

use crate::types::{StudentProfile, User};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default file name for the persisted session
pub const DEFAULT_SESSION_FILE: &str = "lessonmark-session.json";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Failed to access session file at {path}: {source}")]
    IoError { source: io::Error, path: String },

    #[error("Failed to parse session file at {path}: {source}")]
    ParseError { source: serde_json::Error, path: String },
}

/// Partial profile edit; `None` fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language: Option<String>,
    pub current_grade: Option<String>,
}

impl ProfileUpdate {
    fn apply(self, profile: &mut StudentProfile) {
        let fields = [
            (self.username, &mut profile.username),
            (self.email, &mut profile.email),
            (self.first_name, &mut profile.first_name),
            (self.last_name, &mut profile.last_name),
            (self.language, &mut profile.language),
            (self.current_grade, &mut profile.current_grade),
        ];
        for (update, field) in fields {
            if let Some(value) = update {
                *field = value;
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<User>,
    pub profile: Option<StudentProfile>,
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

impl SessionState {
    pub fn set_auth(&mut self, user: User, token: impl Into<String>, refresh_token: impl Into<String>) {
        log::debug!("session authenticated as {}", user.username);
        self.user = Some(user);
        self.token = Some(token.into());
        self.refresh_token = Some(refresh_token.into());
        self.is_authenticated = true;
        self.is_loading = false;
    }

    pub fn set_profile(&mut self, profile: StudentProfile) {
        self.profile = Some(profile);
    }

    /// Merge `update` into the current profile. Does nothing without a profile.
    pub fn update_profile(&mut self, update: ProfileUpdate) {
        match self.profile.as_mut() {
            Some(profile) => update.apply(profile),
            None => log::debug!("ignoring profile update: no profile loaded"),
        }
    }

    /// Log out.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub fn persisted(&self) -> PersistedSession {
        PersistedSession {
            user: self.user.clone(),
            profile: self.profile.clone(),
            token: self.token.clone(),
            refresh_token: self.refresh_token.clone(),
            is_authenticated: self.is_authenticated,
        }
    }
}

/// The subset of [`SessionState`] that survives a restart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub profile: Option<StudentProfile>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub is_authenticated: bool,
}

impl From<PersistedSession> for SessionState {
    fn from(saved: PersistedSession) -> Self {
        Self {
            user: saved.user,
            profile: saved.profile,
            token: saved.token,
            refresh_token: saved.refresh_token,
            is_authenticated: saved.is_authenticated,
            is_loading: false,
        }
    }
}

/// JSON file holding a [`PersistedSession`]
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved session. A missing file is an empty, logged-out session.
    pub fn load(&self) -> Result<SessionState, SessionError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("no session file at {}", self.path.display());
                return Ok(SessionState::default());
            }
            Err(source) => return Err(self.io_error(source)),
        };
        let saved: PersistedSession = serde_json::from_str(&content).map_err(|source| SessionError::ParseError {
            source,
            path: self.path.display().to_string(),
        })?;
        Ok(saved.into())
    }

    pub fn save(&self, state: &SessionState) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }
        let json = serde_json::to_string_pretty(&state.persisted()).map_err(|source| SessionError::ParseError {
            source,
            path: self.path.display().to_string(),
        })?;
        fs::write(&self.path, json).map_err(|source| self.io_error(source))?;
        log::debug!("saved session to {}", self.path.display());
        Ok(())
    }

    /// Delete the saved session, if any.
    pub fn remove(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn io_error(&self, source: io::Error) -> SessionError {
        SessionError::IoError {
            source,
            path: self.path.display().to_string(),
        }
    }
}
