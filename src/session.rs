//! Authenticated session state.
//!
//! A session is created by `rolodex login`, read on every outgoing request,
//! and cleared on logout or when the backend rejects the token. It is passed
//! explicitly to the HTTP client factory rather than looked up ambiently, so
//! tests can substitute their own.
//!
//! The bearer token is held in a [`SecretString`] so debug output and logs
//! never leak it.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Result, RolodexError};

/// Role granted by the backend at login time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Customer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Customer => write!(f, "customer"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = RolodexError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "customer" => Ok(Role::Customer),
            _ => Err(RolodexError::Config(format!(
                "unknown role '{}', expected 'admin' or 'customer'",
                s
            ))),
        }
    }
}

/// An authenticated session
#[derive(Clone)]
pub struct Session {
    token: SecretString,
    pub role: Role,
    pub user_id: i64,
    pub username: String,
}

/// On-disk mirror of [`Session`]. Kept separate so the in-memory type can
/// redact the token in `Debug` output.
#[derive(Serialize, Deserialize)]
struct SessionFile {
    token: String,
    role: Role,
    user_id: i64,
    username: String,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("role", &self.role)
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .finish()
    }
}

impl Session {
    pub fn new(token: String, role: Role, user_id: i64, username: String) -> Self {
        Self {
            token: SecretString::from(token),
            role,
            user_id,
            username,
        }
    }

    /// The raw bearer token, for building the Authorization header
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }

    /// Path to the persisted session file
    pub fn session_path() -> Result<PathBuf> {
        Ok(Config::config_dir()?.join("session.yaml"))
    }

    /// Load the persisted session, if any
    pub fn load() -> Result<Option<Self>> {
        let path = Self::session_path()?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let file: SessionFile = serde_yaml_ng::from_str(&content)?;
        Ok(Some(Session::new(
            file.token,
            file.role,
            file.user_id,
            file.username,
        )))
    }

    /// Load the persisted session, failing if there is none
    pub fn require() -> Result<Self> {
        Self::load()?.ok_or(RolodexError::NotLoggedIn)
    }

    /// Persist the session to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::session_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = SessionFile {
            token: self.token.expose_secret().to_string(),
            role: self.role,
            user_id: self.user_id,
            username: self.username.clone(),
        };
        fs::write(&path, serde_yaml_ng::to_string(&file)?)?;
        Ok(())
    }

    /// Remove the persisted session. Used by logout and by the HTTP client
    /// when the backend reports the token is no longer valid.
    pub fn clear() -> Result<()> {
        let path = Self::session_path()?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    fn test_role_from_str() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("Customer".parse::<Role>().unwrap(), Role::Customer);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::new("tok-secret".to_string(), Role::Admin, 1, "admin".to_string());
        let debug = format!("{:?}", session);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("tok-secret"));
    }

    #[test]
    #[serial]
    fn test_session_roundtrip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        unsafe { env::set_var("ROLODEX_CONFIG_DIR", dir.path()) };

        let session = Session::new("tok-1".to_string(), Role::Customer, 42, "jane".to_string());
        session.save().unwrap();

        let loaded = Session::require().unwrap();
        assert_eq!(loaded.token(), "tok-1");
        assert_eq!(loaded.role, Role::Customer);
        assert_eq!(loaded.user_id, 42);
        assert_eq!(loaded.username, "jane");

        Session::clear().unwrap();
        assert!(Session::load().unwrap().is_none());
        assert!(matches!(
            Session::require(),
            Err(RolodexError::NotLoggedIn)
        ));

        unsafe { env::remove_var("ROLODEX_CONFIG_DIR") };
    }
}
