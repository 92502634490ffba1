// Client-side auth context
// In-process mirror of the current token/user for API consumers: keeps the
// session in memory, persists it through a SessionStore, and refreshes
// opportunistically on load and on a 401

use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::user::UserInfo;
use crate::services::token::TokenService;

// Reissue on load once less than this much lifetime remains
const REFRESH_THRESHOLD_MINUTES: u64 = 60;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Not authenticated")]
    Unauthorized,

    #[error("Session store error: {0}")]
    Store(String),

    #[error("No active session")]
    NoSession,
}

/// A persisted authentication session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: UserInfo,
}

/// Persistent storage for the session, the stand-in for browser storage
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<Session>, ClientError>;
    fn save(&self, session: &Session) -> Result<(), ClientError>;
    fn clear(&self) -> Result<(), ClientError>;
}

/// File-backed session store (JSON on disk)
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, ClientError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map(Some)
                .map_err(|e| ClientError::Store(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ClientError::Store(e.to_string())),
        }
    }

    fn save(&self, session: &Session) -> Result<(), ClientError> {
        let contents =
            serde_json::to_string_pretty(session).map_err(|e| ClientError::Store(e.to_string()))?;
        std::fs::write(&self.path, contents).map_err(|e| ClientError::Store(e.to_string()))
    }

    fn clear(&self) -> Result<(), ClientError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Store(e.to_string())),
        }
    }
}

/// In-memory session store for tests
#[derive(Default)]
pub struct MemorySessionStore {
    inner: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, ClientError> {
        Ok(self.inner.lock().expect("session store poisoned").clone())
    }

    fn save(&self, session: &Session) -> Result<(), ClientError> {
        *self.inner.lock().expect("session store poisoned") = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.inner.lock().expect("session store poisoned") = None;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    #[allow(dead_code)]
    success: bool,
    data: Option<T>,
    message: String,
}

#[derive(Debug, Deserialize)]
struct TokenPayload {
    token: String,
    user: UserInfo,
}

/// Signup form details
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub school: String,
    pub year: String,
}

/// Holds the current user/token and drives login/logout/refresh against the
/// backend
pub struct AuthContext {
    base_url: String,
    http: reqwest::Client,
    store: Box<dyn SessionStore>,
    session: Option<Session>,
}

impl AuthContext {
    pub fn new(
        base_url: impl Into<String>,
        store: Box<dyn SessionStore>,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            store,
            session: None,
        })
    }

    pub fn current_user(&self) -> Option<&UserInfo> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn set_session(&mut self, session: Session) -> Result<(), ClientError> {
        self.store.save(&session)?;
        self.session = Some(session);
        Ok(())
    }

    fn clear_session(&mut self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!("Failed to clear session store: {}", e);
        }
        self.session = None;
    }

    /// Restore the persisted session, refreshing opportunistically when the
    /// stored token is near expiry. A failed refresh logs the session out.
    pub async fn load(&mut self) -> Result<Option<&UserInfo>, ClientError> {
        let stored = self.store.load()?;

        let session = match stored {
            Some(session) => session,
            None => return Ok(None),
        };

        let near_expiry = match TokenService::decode_unverified(&session.token) {
            Some(claims) => claims.remaining_seconds() < REFRESH_THRESHOLD_MINUTES * 60,
            None => true,
        };

        self.session = Some(session);

        if near_expiry {
            if let Err(e) = self.refresh().await {
                tracing::warn!("Session refresh on load failed, logging out: {}", e);
                self.clear_session();
                return Ok(None);
            }
        }

        Ok(self.current_user())
    }

    /// Create an account and adopt the returned session
    pub async fn signup(&mut self, details: &SignupDetails) -> Result<&UserInfo, ClientError> {
        let response = self
            .http
            .post(self.url("/api/auth/signup"))
            .json(details)
            .send()
            .await?;

        let session = Self::session_from_response(response).await?;
        self.set_session(session)?;
        Ok(self.current_user().expect("session just set"))
    }

    /// Authenticate and adopt the returned session
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&UserInfo, ClientError> {
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let session = Self::session_from_response(response).await?;
        self.set_session(session)?;
        Ok(self.current_user().expect("session just set"))
    }

    /// Exchange the current token for a fresh one
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let token = self
            .session
            .as_ref()
            .map(|s| s.token.clone())
            .ok_or(ClientError::NoSession)?;

        let response = self
            .http
            .post(self.url("/api/auth/refresh"))
            .bearer_auth(&token)
            .send()
            .await?;

        match Self::session_from_response(response).await {
            Ok(session) => self.set_session(session),
            Err(e) => {
                self.clear_session();
                Err(e)
            },
        }
    }

    /// Tell the server goodbye and drop the local session either way
    pub async fn logout(&mut self) {
        let request = self.http.post(self.url("/api/auth/logout"));
        let request = match self.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        if let Err(e) = request.send().await {
            tracing::warn!("Logout request failed: {}", e);
        }

        self.clear_session();
    }

    /// Fetch the current profile; on a 401 the token is refreshed once and
    /// the call retried before giving up and logging out locally
    pub async fn fetch_profile(&mut self) -> Result<UserInfo, ClientError> {
        match self.try_fetch_profile().await {
            Err(ClientError::Unauthorized) => {
                self.refresh().await?;
                self.try_fetch_profile().await
            },
            other => other,
        }
    }

    async fn try_fetch_profile(&self) -> Result<UserInfo, ClientError> {
        let token = self.token().ok_or(ClientError::NoSession)?;

        let response = self
            .http
            .get(self.url("/api/user/profile"))
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 401 {
            return Err(ClientError::Unauthorized);
        }

        let envelope: ApiEnvelope<UserInfo> = response.json().await?;
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: envelope.message,
            });
        }

        envelope.data.ok_or(ClientError::Api {
            status: status.as_u16(),
            message: "Response carried no profile data".to_string(),
        })
    }

    async fn session_from_response(response: reqwest::Response) -> Result<Session, ClientError> {
        let status = response.status();
        if status.as_u16() == 401 {
            return Err(ClientError::Unauthorized);
        }

        let envelope: ApiEnvelope<TokenPayload> = response.json().await?;

        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: envelope.message,
            });
        }

        let payload = envelope.data.ok_or(ClientError::Api {
            status: status.as_u16(),
            message: "Response carried no token data".to_string(),
        })?;

        Ok(Session {
            token: payload.token,
            user: payload.user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_session() -> Session {
        Session {
            token: "header.payload.signature".to_string(),
            user: UserInfo {
                id: "c9a45f7e-0000-4000-8000-123456789abc".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                school: "Analytical Engine University".to_string(),
                graduation_year: "2027".to_string(),
                trial_started_at: Utc::now(),
                trial_ends_at: Utc::now(),
                subscription_status: "trial".to_string(),
                subscription_plan: None,
                subscription_ends_at: None,
                created_at: Utc::now(),
            },
        }
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemorySessionStore::new();
        assert_eq!(store.load().unwrap(), None);

        let session = sample_session();
        store.save(&session).unwrap();
        assert_eq!(store.load().unwrap(), Some(session));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::new(&path);

        assert_eq!(store.load().unwrap(), None);

        let session = sample_session();
        store.save(&session).unwrap();
        assert!(path.exists());
        assert_eq!(store.load().unwrap(), Some(session));

        store.clear().unwrap();
        assert!(!path.exists());
        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_rejects_corrupt_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileSessionStore::new(&path);
        assert!(matches!(store.load(), Err(ClientError::Store(_))));
    }

    #[tokio::test]
    async fn test_load_without_stored_session() {
        let mut ctx =
            AuthContext::new("http://localhost:0", Box::new(MemorySessionStore::new())).unwrap();

        let user = ctx.load().await.unwrap();
        assert!(user.is_none());
        assert!(!ctx.is_authenticated());
    }

    #[tokio::test]
    async fn test_refresh_without_session_errors() {
        let mut ctx =
            AuthContext::new("http://localhost:0", Box::new(MemorySessionStore::new())).unwrap();

        assert!(matches!(ctx.refresh().await, Err(ClientError::NoSession)));
    }
}
