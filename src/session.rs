use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type SharedSession = Arc<RwLock<Session>>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session file io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("session file is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl Session {
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            username: Some(username.into()),
        }
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.bearer_token()
            .is_some_and(|token| validate_token(token, chrono::Utc::now().timestamp()))
    }

    pub fn clear(&mut self) {
        self.token = None;
        self.username = None;
    }

    pub fn into_shared(self) -> SharedSession {
        Arc::new(RwLock::new(self))
    }
}

fn token_claims(token: &str) -> Option<serde_json::Map<String, serde_json::Value>> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    let payload = URL_SAFE_NO_PAD.decode(parts[1].trim_end_matches('=')).ok()?;
    match serde_json::from_slice(&payload).ok()? {
        serde_json::Value::Object(claims) => Some(claims),
        _ => None,
    }
}

/// `exp` claim in seconds, if the token carries one.
pub fn token_expiry(token: &str) -> Option<i64> {
    token_claims(token)?.get("exp")?.as_i64()
}

/// Structural JWT check plus expiry. The signature is the backend's business.
pub fn validate_token(token: &str, now_secs: i64) -> bool {
    let Some(claims) = token_claims(token) else {
        return false;
    };
    match claims.get("exp").and_then(|v| v.as_i64()) {
        Some(exp) => exp >= now_secs,
        None => true,
    }
}

/// File-backed home of the session between invocations.
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

    pub fn load(&self) -> Result<Session, SessionError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Session::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(session)?)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes the session back, or removes the file once it holds no token.
    pub fn persist(&self, session: &Session) -> Result<(), SessionError> {
        if session.bearer_token().is_some() {
            self.save(session)
        } else {
            self.clear()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt(claims: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{header}.{payload}.signature")
    }

    #[test]
    fn test_validate_token_shape() {
        assert!(!validate_token("", 0));
        assert!(!validate_token("a.b", 0));
        assert!(!validate_token("a.!!!.c", 0));
        assert!(validate_token(&jwt(serde_json::json!({"sub": "ada"})), 0));
    }

    #[test]
    fn test_validate_token_expiry() {
        let token = jwt(serde_json::json!({"sub": "ada", "exp": 1_000}));
        assert!(validate_token(&token, 999));
        assert!(!validate_token(&token, 1_001));
        assert_eq!(token_expiry(&token), Some(1_000));
    }

    #[test]
    fn test_unauthenticated_without_token() {
        assert!(!Session::default().is_authenticated());
        let session = Session {
            token: Some(String::new()),
            username: Some("ada".into()),
        };
        assert!(session.bearer_token().is_none());
    }

    #[test]
    fn test_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested").join("session.json"));

        assert_eq!(store.load().unwrap(), Session::default());

        let session = Session::new("tok", "ada");
        store.save(&session).unwrap();
        assert_eq!(store.load().unwrap(), session);

        store.clear().unwrap();
        assert!(!store.path().exists());
        store.clear().unwrap();
    }

    #[test]
    fn test_persist_clears_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));

        store.persist(&Session::new("tok", "ada")).unwrap();
        assert!(store.path().exists());

        store.persist(&Session::default()).unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"{not json").unwrap();

        assert!(matches!(SessionStore::new(path).load(), Err(SessionError::Json(_))));
    }
}
